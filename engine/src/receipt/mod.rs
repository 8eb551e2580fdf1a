//! Receipt documents.
//!
//! A receipt is produced in two steps: [`layout`] positions the text, then
//! [`pdf::encode`] turns the layout into a PDF. A [`Rasterizer`] can turn the
//! PDF into an image.

pub mod layout;
pub mod pdf;
pub mod raster;

pub use layout::{layout, CompanyProfile, FontWeight, Page, ReceiptLayout, TextRun, FIELD_ROWS};
pub use raster::{Pdftoppm, Rasterizer};

use crate::{error::Result, ShipmentRecord};

/// Render `record` as a PDF receipt.
pub fn render(record: &ShipmentRecord, company: &CompanyProfile) -> Result<Vec<u8>> {
    pdf::encode(&layout(record, company))
}

/// File name for a receipt download, e.g. `TRK1-receipt.pdf`.
pub fn file_name(tracking_number: &str, extension: &str) -> String {
    let safe: String = tracking_number
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}-receipt.{}", safe, extension)
}
