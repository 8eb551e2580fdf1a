//! Shipment administration routes.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::{Map, Value};
use shiptrack_engine::ShipmentRecord;

use crate::error::Result;
use crate::handlers::{handle_list, handle_merge, handle_upsert, UpsertResponse};
use crate::AppState;

/// Create shipment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/shipments", get(list_handler).post(upsert_handler))
        .route("/api/shipments/{tracking_number}", put(merge_handler))
}

/// GET /api/shipments - List all shipments.
async fn list_handler(State(state): State<AppState>) -> Result<Json<Vec<ShipmentRecord>>> {
    let records = handle_list(state.store.clone()).await?;
    Ok(Json(records))
}

/// POST /api/shipments - Create or replace a shipment.
async fn upsert_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<(StatusCode, Json<UpsertResponse>)> {
    let Json(body) = body?;
    let response = handle_upsert(state.store.clone(), body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// PUT /api/shipments/{trackingNumber} - Update some fields of a shipment.
async fn merge_handler(
    State(state): State<AppState>,
    Path(tracking_number): Path<String>,
    body: std::result::Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<ShipmentRecord>> {
    let Json(body) = body?;
    let record = handle_merge(state.store.clone(), tracking_number, body).await?;
    Ok(Json(record))
}
