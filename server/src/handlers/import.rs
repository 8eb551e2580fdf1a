//! Import handler - applies an uploaded CSV file to the store.

use super::blocking;
use axum::body::Bytes;
use crate::error::Result;
use serde::Serialize;
use shiptrack_engine::{parse_csv, RecordStore, RowError};
use std::sync::Arc;

/// Response for a bulk import.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub ok: bool,
    pub imported: usize,
    pub errors: Vec<RowError>,
}

/// Parse `csv` and merge every row into the store with a single write.
pub async fn handle_import(store: Arc<RecordStore>, csv: Bytes) -> Result<ImportResponse> {
    let report = blocking(move || {
        let rows = parse_csv(&csv)?;
        store.import(rows)
    })
    .await?;

    if !report.errors.is_empty() {
        tracing::warn!("Import skipped {} row(s)", report.errors.len());
    }

    Ok(ImportResponse {
        ok: true,
        imported: report.imported,
        errors: report.errors,
    })
}
