// crates/snapask-types/src/error.rs
// Standardized error types for snapask

use thiserror::Error;

use crate::models::CatalogError;
use crate::storage::StorageError;
use crate::transport::TransportError;

/// Umbrella error for everything the composer talks to
#[derive(Error, Debug)]
pub enum SnapaskError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Result using SnapaskError
pub type Result<T> = std::result::Result<T, SnapaskError>;

impl SnapaskError {
    /// Text suitable for a system message in the chat log
    pub fn to_user_string(&self) -> String {
        match self {
            SnapaskError::Transport(e) => e.system_message(),
            other => other.to_string(),
        }
    }
}

impl From<SnapaskError> for String {
    fn from(err: SnapaskError) -> Self {
        err.to_user_string()
    }
}
