//! Shipment administration handlers - upsert, partial update and listing.

use super::blocking;
use crate::error::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use shiptrack_engine::{RecordStore, ShipmentRecord};
use std::sync::Arc;

/// Response for an upsert.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertResponse {
    pub ok: bool,
    pub tracking_number: String,
}

/// Insert or fully replace a shipment. The body must carry `trackingNumber`.
pub async fn handle_upsert(
    store: Arc<RecordStore>,
    body: Map<String, Value>,
) -> Result<UpsertResponse> {
    let record = ShipmentRecord::from_fields(body);
    let key = record.tracking_number.clone();
    let tracking_number = blocking(move || store.upsert(&key, record)).await?;

    Ok(UpsertResponse {
        ok: true,
        tracking_number,
    })
}

/// Merge `body` over the shipment stored under `tracking_number`.
pub async fn handle_merge(
    store: Arc<RecordStore>,
    tracking_number: String,
    body: Map<String, Value>,
) -> Result<ShipmentRecord> {
    let partial = ShipmentRecord::from_fields(body);
    blocking(move || store.merge(&tracking_number, partial)).await
}

/// All shipments in key order.
pub async fn handle_list(store: Arc<RecordStore>) -> Result<Vec<ShipmentRecord>> {
    blocking(move || Ok(store.list())).await
}
