//! Bulk import route.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};

use crate::error::{AppError, Result};
use crate::handlers::{handle_import, ImportResponse};
use crate::AppState;

/// Multipart form field carrying the CSV file.
const FILE_FIELD: &str = "file";

/// Largest accepted upload.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Create import routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/import", post(import_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// POST /api/import - Import shipments from an uploaded CSV file.
async fn import_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>> {
    let mut csv = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() == Some(FILE_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Unreadable file: {}", e.body_text())))?;
            csv = Some(bytes);
        }
    }

    let csv = csv.ok_or_else(|| AppError::BadRequest("file is required".to_string()))?;
    tracing::info!("Importing {} byte CSV upload", csv.len());

    let response = handle_import(state.store.clone(), csv).await?;
    Ok(Json(response))
}
