//! RecordStore - the on-disk mapping of tracking number to shipment record.
//!
//! The whole mapping is read on every operation and written back wholesale
//! after every mutation. Writes go to a temporary file in the same directory
//! which is then renamed over the backing file, so a reader only ever sees
//! the previous or the next complete state.
//!
//! Mutations are serialized by a single lock around the load-modify-save
//! cycle, so concurrent writers cannot drop each other's updates.

use crate::{
    error::Result, import, lookup, Error, ImportReport, Row, ShipmentRecord, TrackingNumber,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// All shipments, keyed by tracking number. Iteration order is key order.
pub type Shipments = BTreeMap<TrackingNumber, ShipmentRecord>;

/// File-backed shipment store.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl RecordStore {
    /// Create a store backed by the file at `path`.
    ///
    /// Nothing is read or created until the first operation.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full mapping.
    ///
    /// A missing, unreadable or corrupt file yields an empty mapping.
    pub fn load(&self) -> Shipments {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "store file absent, starting empty");
                return Shipments::new();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "store file unreadable, treating as empty");
                return Shipments::new();
            }
        };

        let entries: BTreeMap<TrackingNumber, Value> = match serde_json::from_str(&contents) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "store file corrupt, treating as empty");
                return Shipments::new();
            }
        };

        // One malformed entry must not cost the rest of the file.
        entries
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::Object(fields) => Some((key, ShipmentRecord::from_fields(fields))),
                _ => {
                    tracing::warn!(path = %self.path.display(), key = %key, "skipping non-object store entry");
                    None
                }
            })
            .collect()
    }

    /// Replace the backing file with `shipments`.
    pub fn save(&self, shipments: &Shipments) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let json = serde_json::to_vec_pretty(shipments)
            .map_err(|e| Error::Persistence(io::Error::new(io::ErrorKind::InvalidData, e)))?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| Error::Persistence(e.error))?;

        tracing::debug!(path = %self.path.display(), records = shipments.len(), "store persisted");
        Ok(())
    }

    /// Run `f` against the current mapping and persist the result.
    ///
    /// This is the critical section every mutation goes through. When `f`
    /// fails nothing is written.
    pub fn update<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Shipments) -> Result<T>,
    {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut shipments = self.load();
        let output = f(&mut shipments)?;
        self.save(&shipments)?;
        Ok(output)
    }

    /// Get a record by its exact key.
    pub fn get(&self, tracking_number: &str) -> Option<ShipmentRecord> {
        self.load().remove(tracking_number)
    }

    /// All records in key order.
    pub fn list(&self) -> Vec<ShipmentRecord> {
        self.load().into_values().collect()
    }

    /// Find a record by key, falling back to its declared tracking number.
    pub fn resolve(&self, identifier: &str) -> Option<ShipmentRecord> {
        lookup::resolve(&self.load(), identifier).cloned()
    }

    /// Insert or fully replace the record stored under `tracking_number`.
    ///
    /// Surrounding whitespace is not part of a key. Returns the key the record
    /// was stored under.
    pub fn upsert(&self, tracking_number: &str, mut record: ShipmentRecord) -> Result<TrackingNumber> {
        let key = tracking_number.trim();
        if key.is_empty() {
            return Err(Error::Validation("trackingNumber is required".into()));
        }
        record.tracking_number = key.to_string();

        self.update(|shipments| {
            shipments.insert(key.to_string(), record);
            Ok(())
        })?;
        tracing::info!(tracking_number = key, "shipment upserted");
        Ok(key.to_string())
    }

    /// Shallow-merge `partial` over an existing record.
    ///
    /// The key field cannot be changed this way: a partial carrying a
    /// different `trackingNumber` is rejected.
    pub fn merge(&self, tracking_number: &str, partial: ShipmentRecord) -> Result<ShipmentRecord> {
        let key = tracking_number.trim();
        let declared = partial.tracking_number.trim();
        if !declared.is_empty() && declared != key {
            return Err(Error::Validation(format!(
                "trackingNumber cannot be changed from '{}' to '{}'",
                key, declared
            )));
        }

        let merged = self.update(|shipments| {
            let existing = shipments
                .get_mut(key)
                .ok_or_else(|| Error::NotFound(key.to_string()))?;
            let mut partial = partial;
            partial.tracking_number.clear();
            existing.merge_from(partial);
            Ok(existing.clone())
        })?;
        tracing::info!(tracking_number = key, "shipment updated");
        Ok(merged)
    }

    /// Apply a batch of import rows with a single write.
    pub fn import(&self, rows: Vec<Row>) -> Result<ImportReport> {
        let report = self.update(|shipments| Ok(import::apply_rows(shipments, rows)))?;
        tracing::info!(
            imported = report.imported,
            failed = report.errors.len(),
            "bulk import applied"
        );
        Ok(report)
    }
}
