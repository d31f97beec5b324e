//! Email analysis against remote models.
//!
//! Two calls per email, strictly in order:
//! 1. zero-shot classification of the normalized text
//! 2. reply generation from the original text, steered by the category
//!
//! A failed classification never reaches the generation endpoint.

pub mod client;
pub mod prompts;
pub mod transport;
pub mod types;

use async_trait::async_trait;

use crate::error::Error;

pub use client::HttpEmailAnalyzer;
pub use types::{AnalysisResult, Category};

/// Classifies an email and suggests a reply.
#[async_trait]
pub trait EmailAnalyzer: Send + Sync {
    /// `normalized_text` feeds the classifier; `original_text` feeds the prompt.
    async fn analyze(&self, normalized_text: &str, original_text: &str) -> Result<(Category, String), Error>;
}
