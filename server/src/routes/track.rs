//! Tracking routes.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use shiptrack_engine::ShipmentRecord;

use crate::error::Result;
use crate::handlers::{handle_track, TrackQuery};
use crate::AppState;

/// Create tracking routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/track", get(track_query_handler))
        .route("/api/track/{tracking_number}", get(track_path_handler))
}

/// GET /api/track?trackingNumber= - Track a shipment.
async fn track_query_handler(
    State(state): State<AppState>,
    Query(query): Query<TrackQuery>,
) -> Result<Json<ShipmentRecord>> {
    let identifier = query.tracking_number.unwrap_or_default();
    let record = handle_track(state.store.clone(), identifier).await?;
    Ok(Json(record))
}

/// GET /api/track/{trackingNumber} - Track a shipment.
async fn track_path_handler(
    State(state): State<AppState>,
    Path(tracking_number): Path<String>,
) -> Result<Json<ShipmentRecord>> {
    let record = handle_track(state.store.clone(), tracking_number).await?;
    Ok(Json(record))
}
