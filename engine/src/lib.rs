//! # Shiptrack Engine
//!
//! Core of a small shipment-tracking service: a file-backed record store,
//! tracking-number resolution, bulk CSV import and receipt rendering.
//!
//! ## Design Principles
//!
//! - **Whole-file persistence**: the store is one pretty-printed JSON file,
//!   read fully on every operation and replaced atomically on every write
//! - **Serialized writers**: every load-modify-save cycle runs under one lock
//! - **Open records**: a shipment is a tracking number plus any other fields
//! - **Deterministic receipts**: the same record always lays out and encodes
//!   to the same document
//!
//! ## Core Concepts
//!
//! ### Records
//!
//! A [`ShipmentRecord`] is keyed by its tracking number. Every other field is
//! kept in an open bag; numeric-looking `quantity` and `cbm` cells from an
//! import are stored as numbers.
//!
//! ### Store
//!
//! [`RecordStore`] maps tracking numbers to records:
//! - [`RecordStore::upsert`] - insert or fully replace a record
//! - [`RecordStore::merge`] - shallow partial update of an existing record
//! - [`RecordStore::import`] - apply a batch of rows with a single write
//! - [`RecordStore::resolve`] - look up by key or by declared tracking number
//!
//! ### Receipts
//!
//! [`receipt::render`] lays out a record on A4 pages and encodes it as PDF.
//! A [`Rasterizer`] turns that PDF into an image.
//!
//! ## Quick Start
//!
//! ```rust
//! use shiptrack_engine::{receipt, CompanyProfile, RecordStore, ShipmentRecord};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let store = RecordStore::open(dir.path().join("shipments.json"));
//!
//! let record = ShipmentRecord::new("TRK1")
//!     .with("status", "In Transit")
//!     .with("origin", "Shanghai")
//!     .with("destination", "Lagos");
//! store.upsert("TRK1", record.clone()).unwrap();
//!
//! assert_eq!(store.resolve("TRK1"), Some(record.clone()));
//!
//! let pdf = receipt::render(&record, &CompanyProfile::default()).unwrap();
//! assert!(pdf.starts_with(b"%PDF"));
//! ```

pub mod error;
pub mod import;
pub mod lookup;
pub mod receipt;
pub mod record;
pub mod store;

// Re-export main types at crate root
pub use error::{Error, Result};
pub use import::{apply_rows, parse_csv, ImportReport, Row, RowError};
pub use receipt::{CompanyProfile, Pdftoppm, Rasterizer};
pub use record::{numeric_or_text, value_text, ShipmentRecord};
pub use store::{RecordStore, Shipments};

/// Primary key of a shipment.
pub type TrackingNumber = String;
