//! Receipt handlers - render a shipment as a PDF or an image.

use super::blocking;
use crate::error::{AppError, Result};
use shiptrack_engine::{receipt, CompanyProfile, Rasterizer, RecordStore};
use std::sync::Arc;

/// A rendered receipt ready to be sent.
#[derive(Debug)]
pub struct ReceiptFile {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub content_type: &'static str,
}

/// Render the receipt for `identifier` as a PDF.
pub async fn handle_receipt_pdf(
    store: Arc<RecordStore>,
    company: Arc<CompanyProfile>,
    identifier: String,
) -> Result<ReceiptFile> {
    let (tracking_number, bytes) = render_pdf(store, company, identifier).await?;

    Ok(ReceiptFile {
        bytes,
        file_name: receipt::file_name(&tracking_number, "pdf"),
        content_type: "application/pdf",
    })
}

/// Render the receipt for `identifier` and rasterize it.
pub async fn handle_receipt_image(
    store: Arc<RecordStore>,
    company: Arc<CompanyProfile>,
    rasterizer: Arc<dyn Rasterizer>,
    identifier: String,
) -> Result<ReceiptFile> {
    let (tracking_number, pdf) = render_pdf(store, company, identifier).await?;

    let extension = rasterizer.extension();
    let content_type = rasterizer.content_type();
    let bytes = blocking(move || rasterizer.rasterize(&pdf)).await?;

    Ok(ReceiptFile {
        bytes,
        file_name: receipt::file_name(&tracking_number, extension),
        content_type,
    })
}

/// Resolve `identifier` and render its PDF. Returns the record's own
/// tracking number alongside the document.
async fn render_pdf(
    store: Arc<RecordStore>,
    company: Arc<CompanyProfile>,
    identifier: String,
) -> Result<(String, Vec<u8>)> {
    let lookup = identifier.clone();
    let rendered = blocking(move || {
        store
            .resolve(&lookup)
            .map(|record| {
                let bytes = receipt::render(&record, &company)?;
                Ok((record.tracking_number, bytes))
            })
            .transpose()
    })
    .await?;

    rendered.ok_or_else(|| AppError::NotFound(format!("Shipment not found: {}", identifier)))
}
