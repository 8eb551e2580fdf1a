//! HTTP route definitions.

mod health;
mod import;
mod receipt;
mod shipments;
mod track;

use crate::AppState;
use axum::Router;

/// Create all application routes.
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(track::routes())
        .merge(shipments::routes())
        .merge(import::routes())
        .merge(receipt::routes())
}
