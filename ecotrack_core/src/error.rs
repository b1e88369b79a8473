use thiserror::Error;

/// Errors raised by snapshot backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("snapshot path has no parent directory: {0}")]
    MissingParent(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown transport mode: {0} (expected Car, Bike, Bus, Train or Flight)")]
pub struct UnknownTransportMode(pub String);
