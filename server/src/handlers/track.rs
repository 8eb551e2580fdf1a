//! Track handler - looks up a shipment for a client.

use super::blocking;
use crate::error::{AppError, Result};
use serde::Deserialize;
use shiptrack_engine::{RecordStore, ShipmentRecord};
use std::sync::Arc;

/// Query parameters for tracking.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackQuery {
    pub tracking_number: Option<String>,
}

/// Resolve a tracking identifier to its shipment.
pub async fn handle_track(store: Arc<RecordStore>, identifier: String) -> Result<ShipmentRecord> {
    let identifier = identifier.trim().to_string();
    if identifier.is_empty() {
        return Err(AppError::BadRequest("trackingNumber is required".to_string()));
    }

    let lookup = identifier.clone();
    let record = blocking(move || Ok(store.resolve(&lookup))).await?;

    record.ok_or_else(|| {
        tracing::debug!("No shipment for {}", identifier);
        AppError::NotFound(format!("Shipment not found: {}", identifier))
    })
}
