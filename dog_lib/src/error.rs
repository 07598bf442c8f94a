//! Error types for dogshell operations.

use thiserror::Error;

/// Base error type for dogshell operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Raised while resolving credentials, before any network call.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file: {0}")]
    Parse(String),

    #[error("no section: '{0}'")]
    MissingSection(String),

    #[error("no option '{key}' in section: '{section}'")]
    MissingKey { section: String, key: String },

    #[error("'{0}' is empty")]
    Empty(String),

    #[error("no config file given and no home directory to look for ~/.dogrc")]
    NoConfigPath,
}

/// Raised when the API rejects the key pair (401/403).
#[derive(Error, Debug)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
}

/// Raised when the API returns a non-success status.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status_code: Option<u16>,
    /// Messages from the response's `errors` field, in server order.
    pub errors: Vec<String>,
}

impl ApiError {
    pub fn new(message: impl Into<String>, status_code: Option<u16>, errors: Vec<String>) -> Self {
        Self {
            message: message.into(),
            status_code,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_display() {
        let err = ConfigError::MissingKey {
            section: "Connection".into(),
            key: "appkey".into(),
        };
        assert_eq!(err.to_string(), "no option 'appkey' in section: 'Connection'");
    }

    #[test]
    fn config_error_wraps_into_error() {
        let err: Error = ConfigError::MissingSection("Connection".into()).into();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
