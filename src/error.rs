//! Error types for the ETL run.
//!
//! Every stage reports failures through [`EtlError`]. Only the network-facing
//! variants are eligible for retry (see [`EtlError::is_retryable`]); everything
//! else aborts the run as soon as it surfaces.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ETL operations
pub type Result<T> = std::result::Result<T, EtlError>;

/// Main error type for the pipeline.
#[derive(Debug, Error)]
pub enum EtlError {
    /// The listing API answered with a non-2xx status
    #[error("HTTP {status} from {url}")]
    Http {
        /// Status code returned by the service
        status: u16,
        /// Full request URL, query string included
        url: String,
    },

    /// Connection, timeout, or body-read failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body was not a JSON array of objects
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A record lacked one of the projected fields
    #[error("record {index} is missing required field `{field}`")]
    MissingField {
        /// Column name, dotted for nested fields (`user.username`)
        field: &'static str,
        /// Zero-based position in the concatenated record sequence
        index: usize,
    },

    /// Filesystem failure while writing or checking the output location
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid configuration value or config file
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl EtlError {
    /// Whether the fetch retry loop should try again after this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, EtlError::Http { .. } | EtlError::Network(_))
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EtlError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        EtlError::Config {
            message: message.into(),
        }
    }
}
