//! Orchestrator: runs one submission through extraction, normalization
//! and analysis.

use std::sync::Arc;

use tracing::{debug, info};

use crate::analysis::{AnalysisResult, EmailAnalyzer};
use crate::document::Document;
use crate::error::{Error, ProcessingError};
use crate::extract::TextExtractor;
use crate::nlp::TextNormalizer;

/// A file part received from a client.
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: Some(filename.into()),
            bytes,
        }
    }
}

/// Composes the extractor, normalizer and analyzer.
///
/// Shared read-only across requests; holds no per-request state.
pub struct AnalysisOrchestrator {
    extractor: Arc<dyn TextExtractor>,
    normalizer: Arc<dyn TextNormalizer>,
    analyzer: Arc<dyn EmailAnalyzer>,
}

impl AnalysisOrchestrator {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        normalizer: Arc<dyn TextNormalizer>,
        analyzer: Arc<dyn EmailAnalyzer>,
    ) -> Self {
        Self {
            extractor,
            normalizer,
            analyzer,
        }
    }

    /// Analyze an uploaded file and/or raw text.
    ///
    /// Extraction and normalization are CPU-bound and run on the blocking
    /// pool; only the analyzer call stays on the async worker.
    pub async fn execute(
        &self,
        file: Option<UploadedFile>,
        text: Option<String>,
    ) -> Result<AnalysisResult, Error> {
        let document = match file {
            Some(UploadedFile { filename, bytes }) => {
                let size = bytes.len();
                Document::new(filename, Some(size), Some(bytes), text)?
            }
            None => Document::new(None, None, None, text)?,
        };

        info!(
            filename = document.filename().unwrap_or("-"),
            size = document.size().unwrap_or(0),
            kind = ?document.kind(),
            "Analyzing submission"
        );

        let extractor = Arc::clone(&self.extractor);
        let normalizer = Arc::clone(&self.normalizer);
        let (original, normalized) = tokio::task::spawn_blocking(move || {
            let original = extractor.extract(&document)?;
            let normalized = normalizer.normalize(&original)?;
            Ok::<_, Error>((original, normalized))
        })
        .await
        .map_err(|e| ProcessingError::Interrupted(e.to_string()))??;

        debug!(
            original_chars = original.chars().count(),
            normalized_chars = normalized.chars().count(),
            "Text prepared for analysis"
        );

        let (category, suggestion) = self.analyzer.analyze(&normalized, &original).await?;

        info!(category = %category, "Submission analyzed");

        Ok(AnalysisResult {
            category,
            suggestion,
        })
    }
}
