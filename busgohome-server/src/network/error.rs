//! Route data loading errors.

use std::path::PathBuf;

use crate::domain::ServiceKey;

/// Errors that can occur when loading route data.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// A data file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data file is not valid JSON of the expected shape
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A record holds a value that fails domain validation
    #[error("invalid record in {file}: {message}")]
    InvalidRecord { file: &'static str, message: String },

    /// A route stop references a service that is not listed
    #[error("route stop references unknown service {0}")]
    UnknownService(ServiceKey),
}
