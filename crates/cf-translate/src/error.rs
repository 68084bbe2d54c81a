//! Error types for cf-translate

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching, translating or filing a problem
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    ConnectError(#[source] reqwest::Error),

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    /// Response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Problem index is not one or two letters with an optional digit
    #[error("Invalid problem index: {0:?}")]
    InvalidProblemIndex(String),

    /// Problem page did not contain a problem statement
    #[error("Page does not look like a problem statement")]
    UnrecognizedPage,

    /// Translation backend reported an error
    #[error("Translation via {backend} failed: {reason}")]
    TranslationFailed {
        backend: &'static str,
        reason: String,
    },

    /// Translation backend answered with empty text
    #[error("Translation via {backend} returned no text")]
    EmptyTranslation { backend: &'static str },

    /// Filesystem error
    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Batch list is missing or malformed
    #[error("Batch config error: {0}")]
    BatchConfig(String),

    /// Batch list is not valid JSON
    #[error("Batch config is not valid JSON")]
    BatchConfigParse(#[source] serde_json::Error),
}

impl Error {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else if err.is_connect() {
            Error::ConnectError(err)
        } else {
            Error::RequestError(err.to_string())
        }
    }

    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
