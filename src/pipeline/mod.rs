//! Request-scoped analysis pipeline.
//!
//! Every submission flows through:
//! 1. `Document::new()`: input validation
//! 2. `TextExtractor::extract()`: raw text, `.txt` decoding or PDF text
//! 3. `TextNormalizer::normalize()`: cleanup, stopwords, stemming
//! 4. `EmailAnalyzer::analyze()`: classification, then reply suggestion
//!
//! The first failure ends the request; nothing is retried.

pub mod orchestrator;

pub use orchestrator::{AnalysisOrchestrator, UploadedFile};
