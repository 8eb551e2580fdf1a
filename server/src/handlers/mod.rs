//! Request handlers for tracking, administration and receipts.

mod import;
mod receipt;
mod shipments;
mod track;

pub use import::*;
pub use receipt::*;
pub use shipments::*;
pub use track::*;

use crate::error::{AppError, Result};

/// Run blocking engine work (file I/O, rendering) off the async runtime.
pub(crate) async fn blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> shiptrack_engine::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal(format!("blocking task failed: {}", e)))?
        .map_err(AppError::from)
}
