//! Error types for Blooming Health

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors surfaced by the store and its storage backends
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid value: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
