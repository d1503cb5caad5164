//! Error types

use std::path::PathBuf;

use thiserror::Error;

/// Why a quote could not be fetched
///
/// Every variant is recoverable: the widget logs it and falls back to a
/// default quote.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("quote request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("quote API returned HTTP {code}")]
    HttpStatus { code: u16 },

    #[error("quote API returned an empty body")]
    EmptyBody,

    #[error("quote request failed: {0}")]
    Network(#[source] reqwest::Error),
}

impl FetchError {
    /// Short machine-readable reason, used as a log field
    pub fn reason(&self) -> &'static str {
        match self {
            FetchError::Timeout(_) => "timeout",
            FetchError::HttpStatus { .. } => "http_status",
            FetchError::EmptyBody => "empty_body",
            FetchError::Network(_) => "network",
        }
    }
}

/// Configuration loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_names() {
        assert_eq!(
            FetchError::Timeout(std::time::Duration::from_millis(5000)).reason(),
            "timeout"
        );
        assert_eq!(FetchError::HttpStatus { code: 503 }.reason(), "http_status");
        assert_eq!(FetchError::EmptyBody.reason(), "empty_body");
    }

    #[test]
    fn test_http_status_display() {
        let err = FetchError::HttpStatus { code: 404 };
        assert_eq!(err.to_string(), "quote API returned HTTP 404");
    }
}
