//! Bulk import of flat rows into the store.
//!
//! Rows usually come from an uploaded CSV file (see [`parse_csv`]), one
//! shipment update per row. A bad row is reported and skipped; it never
//! aborts the batch.

use crate::record::{numeric_or_text, TRACKING_NUMBER_FIELD};
use crate::{error::Result, Error, Shipments, ShipmentRecord};
use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One flat input row: column name to cell text.
pub type Row = BTreeMap<String, String>;

/// Columns that may carry the tracking key, in priority order.
pub const KEY_COLUMNS: [&str; 3] = [TRACKING_NUMBER_FIELD, "tracking", "id"];

/// Columns stored as numbers when their text is numeric.
pub const NUMERIC_COLUMNS: [&str; 2] = ["quantity", "cbm"];

/// Error message for a row without any key column.
pub const MISSING_KEY: &str = "missing trackingNumber";

/// A row that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// 1-based position of the row in the input
    pub row: usize,
    /// Why the row was skipped
    pub error: String,
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Rows merged into the store
    pub imported: usize,
    /// Rows skipped, in input order
    pub errors: Vec<RowError>,
}

/// Parse CSV into rows. The first line names the columns.
///
/// Cells are trimmed and short lines are accepted; missing trailing cells are
/// simply absent from the row. Input that is not UTF-8 is rejected with
/// [`Error::InvalidInput`].
pub fn parse_csv(input: impl AsRef<[u8]>) -> Result<Vec<Row>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(input.as_ref());

    let headers = reader
        .headers()
        .map_err(|e| Error::InvalidInput(format!("unreadable CSV header: {}", e)))?
        .clone();

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| Error::InvalidInput(format!("malformed CSV at row {}: {}", index + 1, e)))?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(name, cell)| (name.to_string(), cell.to_string()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// The tracking key of a row: the first non-blank key column, trimmed.
pub fn row_key(row: &Row) -> Option<&str> {
    KEY_COLUMNS
        .iter()
        .filter_map(|column| row.get(*column))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
}

/// Merge `rows` into `shipments`, in order.
pub fn apply_rows(shipments: &mut Shipments, rows: Vec<Row>) -> ImportReport {
    let mut report = ImportReport::default();

    for (index, row) in rows.into_iter().enumerate() {
        let Some(key) = row_key(&row).map(str::to_string) else {
            report.errors.push(RowError {
                row: index + 1,
                error: MISSING_KEY.to_string(),
            });
            continue;
        };

        let mut update = ShipmentRecord::default();
        for (column, cell) in row {
            let value = if NUMERIC_COLUMNS.contains(&column.as_str()) {
                numeric_or_text(&cell)
            } else {
                cell.into()
            };
            update.set(column, value);
        }
        update.tracking_number = key.clone();

        shipments
            .entry(key.clone())
            .or_insert_with(|| ShipmentRecord::new(key))
            .merge_from(update);
        report.imported += 1;
    }

    report
}
