//! Error types for the email classifier.

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Processing error: {0}")]
    Processing(#[from] ProcessingError),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Route not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Stable kind name reported to HTTP clients in `error_type`.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::Extraction(_) => "ExtractionError",
            Self::Processing(_) => "ProcessingError",
            Self::Service(_) => "ServiceError",
            Self::Config(_) => "ConfigError",
            Self::NotFound(_) => "NotFound",
            Self::Internal(_) => "InternalError",
        }
    }

    /// Message that is safe to show to a client.
    ///
    /// Local checks are reported verbatim. Upstream and internal failures are
    /// collapsed into a fixed message so provider details never leak.
    pub fn public_detail(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Extraction(e) => e.to_string(),
            Self::Processing(e) => e.to_string(),
            Self::NotFound(path) => format!("Route not found: {path}"),
            Self::Service(_) => ServiceError::PUBLIC_MESSAGE.to_string(),
            Self::Config(_) | Self::Internal(_) => "Internal error".to_string(),
        }
    }
}

/// Bad or missing client input.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("A document needs either an uploaded file or a text")]
    MissingInput,

    #[error("File size {size} bytes exceeds the {max} byte limit (10 MB)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Unsupported file format: {0}")]
    UnsupportedExtension(String),

    #[error("Unsupported file type for text extraction")]
    UnsupportedFileType,

    #[error("Invalid text for preprocessing: input is empty")]
    EmptyText,

    #[error("Invalid multipart request: {0}")]
    Multipart(String),
}

/// Uploaded content that could not be turned into text.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Uploaded file has no content")]
    MissingContent,

    #[error("The PDF has no extractable text")]
    NoText,

    #[error("Failed to read PDF: {0}")]
    Pdf(String),
}

/// Failures inside the normalization pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Text processing was interrupted: {0}")]
    Interrupted(String),
}

/// Failures talking to the classifier or suggestion endpoints.
///
/// Each variant names what went wrong so it can be logged; clients only ever
/// see [`ServiceError::PUBLIC_MESSAGE`].
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),

    #[error("Request to {endpoint} failed: {reason}")]
    Transport {
        endpoint: &'static str,
        reason: String,
    },

    #[error("Request to {endpoint} timed out")]
    Timeout { endpoint: &'static str },

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },

    #[error("Malformed response from {endpoint}: {reason}")]
    MalformedResponse {
        endpoint: &'static str,
        reason: String,
    },

    #[error("Classifier returned no labels")]
    EmptyLabels,

    #[error("Suggestion endpoint returned no choices")]
    EmptyChoices,

    #[error("Classifier returned unexpected label: {0}")]
    UnexpectedLabel(String),
}

impl ServiceError {
    pub const PUBLIC_MESSAGE: &'static str = "Error while processing email";
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
