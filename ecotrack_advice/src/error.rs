use std::time::Duration;

use ecotrack_core::StoreError;
use thiserror::Error;

/// Failure reported by a model adapter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("model service unavailable: {0}")]
    Unavailable(String),
    #[error("model rejected the request: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum AdviceError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("model call timed out after {0:?}")]
    Timeout(Duration),
    #[error("malformed model reply: {0}")]
    Malformed(String),
    #[error("message must not be empty")]
    EmptyMessage,
    #[error(transparent)]
    Store(#[from] StoreError),
}
