use std::path::PathBuf;

use thiserror::Error;

/// Error type for remote sync operations.
///
/// - `RequestFailed` — network/transport errors (wraps `reqwest::Error`)
/// - `Authentication` — HTTP 401
/// - `PermissionDenied` — HTTP 403
/// - `NotFound` — HTTP 404
/// - `Api` — any other non-2xx status code
#[derive(Debug, Error)]
pub enum SyncApiError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, SyncApiError>;

/// Error type for the one-shot dataset conversion.
///
/// Malformed or missing input is fatal: the run aborts without writing any
/// partial output.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to read raw scrape file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse raw scrape file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write dataset '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
