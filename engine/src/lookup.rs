//! Tracking-number resolution.

use crate::{ShipmentRecord, Shipments};

/// Find the record a client means by `identifier`.
///
/// An exact key match wins. Otherwise the first record (in key order) whose
/// own `trackingNumber` equals the identifier is returned, which covers
/// records stored under a key other than their declared tracking number.
/// An empty identifier never matches.
pub fn resolve<'a>(shipments: &'a Shipments, identifier: &str) -> Option<&'a ShipmentRecord> {
    if identifier.is_empty() {
        return None;
    }

    shipments.get(identifier).or_else(|| {
        shipments
            .values()
            .find(|record| record.tracking_number == identifier)
    })
}
