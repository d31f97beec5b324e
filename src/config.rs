//! Configuration types.
//!
//! Everything is read once from the environment at startup (an optional
//! `.env` file is loaded first by `main`) and passed down explicitly.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

pub const DEFAULT_CLASSIFIER_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-mnli";
pub const DEFAULT_SUGGESTION_URL: &str = "https://router.huggingface.co/nebius/v1/chat/completions";
pub const DEFAULT_SUGGESTION_MODEL: &str = "google/gemma-2-2b-it";

/// Outbound request timeout applied to both endpoints.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Whole-process configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub analysis: AnalysisConfig,
    /// Verbose logging on the console only; when off, logs also go to a file.
    pub debug: bool,
    /// Directory for the rolling log file.
    pub log_dir: PathBuf,
}

/// HTTP listener settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; `*` allows any.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["*".to_string()],
        }
    }
}

/// Settings for the classifier and suggestion endpoints.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub classifier_url: String,
    pub suggestion_url: String,
    /// Bearer token sent to both endpoints.
    pub api_token: SecretString,
    /// Model id sent in the chat-completions payload.
    pub suggestion_model: String,
    pub request_timeout: Duration,
    /// Accept classifier labels outside the known category set.
    pub allow_unknown_labels: bool,
}

impl AnalysisConfig {
    /// Config with explicit endpoints and defaults for everything else.
    pub fn new(
        classifier_url: impl Into<String>,
        suggestion_url: impl Into<String>,
        api_token: SecretString,
    ) -> Self {
        Self {
            classifier_url: classifier_url.into(),
            suggestion_url: suggestion_url.into(),
            api_token,
            suggestion_model: DEFAULT_SUGGESTION_MODEL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            allow_unknown_labels: false,
        }
    }
}

impl AppConfig {
    /// Build config from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_token = var("API_TOKEN")
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar("API_TOKEN".to_string()))?;

        let timeout_secs: u64 = parse_or(var("REQUEST_TIMEOUT_SECS"), "REQUEST_TIMEOUT_SECS", 30)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "REQUEST_TIMEOUT_SECS".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        let analysis = AnalysisConfig {
            classifier_url: var("API_URL_CLASSIFIER")
                .unwrap_or_else(|| DEFAULT_CLASSIFIER_URL.to_string()),
            suggestion_url: var("API_URL_SUGGESTION")
                .unwrap_or_else(|| DEFAULT_SUGGESTION_URL.to_string()),
            api_token,
            suggestion_model: var("SUGGESTION_MODEL")
                .unwrap_or_else(|| DEFAULT_SUGGESTION_MODEL.to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
            allow_unknown_labels: parse_bool(var("ALLOW_UNKNOWN_LABELS"), "ALLOW_UNKNOWN_LABELS", false)?,
        };

        let defaults = ServerConfig::default();
        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server = ServerConfig {
            host: var("HOST").unwrap_or(defaults.host),
            port: parse_or(var("PORT"), "PORT", defaults.port)?,
            cors_origins,
        };

        Ok(Self {
            server,
            analysis,
            debug: parse_bool(var("DEBUG"), "DEBUG", true)?,
            log_dir: var("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("logs")),
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{raw:?}: {e}"),
        }),
    }
}

fn parse_bool(value: Option<String>, key: &str, default: bool) -> Result<bool, ConfigError> {
    let Some(raw) = value else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{raw:?} is not a boolean"),
        }),
    }
}
