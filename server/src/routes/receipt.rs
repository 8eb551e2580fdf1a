//! Receipt routes.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::error::Result;
use crate::handlers::{handle_receipt_image, handle_receipt_pdf, ReceiptFile};
use crate::AppState;

/// Create receipt routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/receipt/{tracking_number}", get(pdf_handler))
        .route("/api/receipt/{tracking_number}/image", get(image_handler))
}

/// GET /api/receipt/{trackingNumber} - Download the PDF receipt.
async fn pdf_handler(
    State(state): State<AppState>,
    Path(tracking_number): Path<String>,
) -> Result<Response> {
    let file = handle_receipt_pdf(state.store.clone(), state.company.clone(), tracking_number).await?;
    Ok(attachment(file))
}

/// GET /api/receipt/{trackingNumber}/image - Download the receipt as an image.
async fn image_handler(
    State(state): State<AppState>,
    Path(tracking_number): Path<String>,
) -> Result<Response> {
    let file = handle_receipt_image(
        state.store.clone(),
        state.company.clone(),
        state.rasterizer.clone(),
        tracking_number,
    )
    .await?;
    Ok(attachment(file))
}

fn attachment(file: ReceiptFile) -> Response {
    (
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.file_name),
            ),
        ],
        file.bytes,
    )
        .into_response()
}
