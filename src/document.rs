//! Inbound document: raw text or an uploaded file, validated on construction.

use crate::error::ValidationError;

/// Largest accepted upload: 10 MiB.
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// File kind inferred from the upload's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Pdf,
    /// No file was uploaded.
    Unset,
}

impl FileKind {
    /// Map a file extension (case-insensitive) to a supported kind.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Some(Self::Text),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }
}

/// A single email submitted for analysis.
///
/// Either `text` or a file (`filename` + `content`) must be present. When both
/// are given the file is still validated, but extraction uses the text.
#[derive(Debug, Clone)]
pub struct Document {
    filename: Option<String>,
    size: Option<usize>,
    content: Option<Vec<u8>>,
    text: Option<String>,
    kind: FileKind,
}

impl Document {
    /// Validate and build a document.
    ///
    /// An empty `text` counts as absent.
    pub fn new(
        filename: Option<String>,
        size: Option<usize>,
        content: Option<Vec<u8>>,
        text: Option<String>,
    ) -> Result<Self, ValidationError> {
        let text = text.filter(|t| !t.is_empty());
        let filename = filename.filter(|f| !f.is_empty());

        if filename.is_none() && text.is_none() {
            return Err(ValidationError::MissingInput);
        }

        if let Some(size) = size {
            if size > MAX_FILE_SIZE {
                return Err(ValidationError::FileTooLarge {
                    size,
                    max: MAX_FILE_SIZE,
                });
            }
        }

        let kind = match &filename {
            Some(name) => {
                let ext = name.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
                FileKind::from_extension(&ext)
                    .ok_or(ValidationError::UnsupportedExtension(ext))?
            }
            None => FileKind::Unset,
        };

        Ok(Self {
            filename,
            size,
            content,
            text,
            kind,
        })
    }

    /// Document carrying only raw text.
    pub fn from_text(text: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(None, None, None, Some(text.into()))
    }

    /// Document for an uploaded file; the declared size is the byte length.
    pub fn from_upload(filename: impl Into<String>, content: Vec<u8>) -> Result<Self, ValidationError> {
        let size = content.len();
        Self::new(Some(filename.into()), Some(size), Some(content), None)
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn size(&self) -> Option<usize> {
        self.size
    }

    pub fn content(&self) -> Option<&[u8]> {
        self.content.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }
}
