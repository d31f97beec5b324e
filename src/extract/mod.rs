//! Text extraction from submitted documents.
//!
//! Raw text always wins; otherwise the uploaded bytes are decoded according
//! to the file kind inferred from the extension.

pub mod pdf;
pub mod txt;

use tracing::debug;

use crate::document::{Document, FileKind};
use crate::error::{Error, ExtractionError, ValidationError};

pub use pdf::extract_pdf_text;
pub use txt::decode_text;

/// Turns a [`Document`] into plain text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, document: &Document) -> Result<String, Error>;
}

/// Extractor for raw text, `.txt` and `.pdf` uploads.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentTextExtractor;

impl DocumentTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for DocumentTextExtractor {
    fn extract(&self, document: &Document) -> Result<String, Error> {
        if let Some(text) = document.text() {
            return Ok(text.to_string());
        }

        match document.kind() {
            FileKind::Text => {
                let bytes = document.content().ok_or(ExtractionError::MissingContent)?;
                debug!(bytes = bytes.len(), "Decoding text upload");
                Ok(decode_text(bytes))
            }
            FileKind::Pdf => {
                let bytes = document.content().ok_or(ExtractionError::MissingContent)?;
                Ok(extract_pdf_text(bytes)?)
            }
            FileKind::Unset => Err(ValidationError::UnsupportedFileType.into()),
        }
    }
}
