//! Shipment record types.

use crate::TrackingNumber;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// Name of the primary-key field as it appears on the wire and on disk.
pub const TRACKING_NUMBER_FIELD: &str = "trackingNumber";

/// A single shipment.
///
/// Only the tracking number is structural. Every other field lives in an open
/// bag so records can carry whatever columns an import or client supplies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    /// Primary key. Non-string values on the wire are coerced to text.
    #[serde(
        rename = "trackingNumber",
        default,
        deserialize_with = "deserialize_tracking_number"
    )]
    pub tracking_number: TrackingNumber,
    /// All remaining fields, keyed by their wire name
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl ShipmentRecord {
    /// Create an empty record for a tracking number.
    pub fn new(tracking_number: impl Into<TrackingNumber>) -> Self {
        Self {
            tracking_number: tracking_number.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field setter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Build a record from a loose JSON object.
    ///
    /// `trackingNumber` is lifted out of the bag and coerced to text; if it is
    /// absent the tracking number is empty.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        let mut record = Self::default();
        for (name, value) in fields {
            record.set(name, value);
        }
        record
    }

    /// Set a field. Writing `trackingNumber` updates the key field.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        if name == TRACKING_NUMBER_FIELD {
            self.tracking_number = value_text(&value);
        } else {
            self.fields.insert(name, value);
        }
    }

    /// Raw field value. `trackingNumber` is reported like any other field.
    pub fn get(&self, name: &str) -> Option<Value> {
        if name == TRACKING_NUMBER_FIELD {
            return Some(Value::String(self.tracking_number.clone()));
        }
        self.fields.get(name).cloned()
    }

    /// Display text of a field; absent fields render as an empty string.
    pub fn text(&self, name: &str) -> String {
        if name == TRACKING_NUMBER_FIELD {
            return self.tracking_number.clone();
        }
        self.fields.get(name).map(value_text).unwrap_or_default()
    }

    /// Shallow-merge `partial` over this record.
    pub fn merge_from(&mut self, partial: ShipmentRecord) {
        if !partial.tracking_number.is_empty() {
            self.tracking_number = partial.tracking_number;
        }
        self.fields.extend(partial.fields);
    }
}

fn deserialize_tracking_number<'de, D>(deserializer: D) -> Result<TrackingNumber, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| value_text(&value))
}

/// Coerce any JSON value to the text shown to a reader.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Store `raw` as a number when it is one, otherwise keep the original text.
///
/// `"12"` becomes `12`, `"2.5"` becomes `2.5`, `"12 boxes"` stays a string.
pub fn numeric_or_text(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::String(raw.to_string());
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::from(int);
    }
    // Non-finite parses ("inf", "NaN") have no JSON number and stay text.
    match trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(number) => Value::Number(number),
        None => Value::String(raw.to_string()),
    }
}
