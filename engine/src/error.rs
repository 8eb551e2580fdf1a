//! Error types for the shipment engine.

use crate::TrackingNumber;
use thiserror::Error;

/// All possible errors from the shipment engine.
#[derive(Debug, Error)]
pub enum Error {
    // Caller errors
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("shipment not found: {0}")]
    NotFound(TrackingNumber),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Internal faults
    #[error("failed to persist store: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("failed to render receipt: {0}")]
    Render(String),

    #[error("failed to rasterize receipt: {0}")]
    Rasterize(String),
}

impl Error {
    /// Whether the caller can fix this by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::NotFound(_) | Error::InvalidInput(_)
        )
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
