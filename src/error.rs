//! # Client Error Types
//!
//! Unified error handling for the fireblob facade. Service failures are
//! surfaced verbatim from the backing SDK crates; nothing is retried or
//! reclassified here.

use thiserror::Error;

/// Facade operation result type
pub type ClientResult<T> = Result<T, ClientError>;

/// Error types for facade operations
///
/// The two service variants carry the backing SDK error unchanged. `Config`
/// only occurs during client construction, and `Io` only on the local side of
/// the streaming copy helpers.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("document store error: {0}")]
    Document(#[from] firestore::errors::FirestoreError),

    #[error("object store error: {0}")]
    Object(#[from] google_cloud_storage::http::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
