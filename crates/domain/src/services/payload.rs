//! Splits a submitted form payload into offering columns, resolved attribute
//! values and the free-form custom attributes bucket.

use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

use crate::models::form::FormValues;
use crate::models::offering::OfferingColumns;
use crate::models::resolved_field::ResolvedFormField;
use crate::services::default_fields::{column_for, STANDARD_COLUMNS};

/// Submitted keys the offering schema recognizes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnownKeys {
    /// Field name to offering column.
    columns: BTreeMap<String, &'static str>,
    /// Non-standard field names of the resolved form.
    attributes: BTreeSet<String>,
}

impl KnownKeys {
    /// Only the standard product fields.
    pub fn standard() -> Self {
        Self {
            columns: STANDARD_COLUMNS
                .iter()
                .map(|(name, column)| (name.to_string(), *column))
                .collect(),
            attributes: BTreeSet::new(),
        }
    }

    /// Standard fields plus every resolved field of a form.
    pub fn for_fields(fields: &[ResolvedFormField]) -> Self {
        let mut known = Self::standard();
        for field in fields {
            if column_for(&field.attribute_name).is_none() {
                known.attributes.insert(field.attribute_name.clone());
            }
        }
        known
    }

    pub fn column(&self, key: &str) -> Option<&'static str> {
        self.columns.get(key).copied()
    }

    pub fn is_attribute(&self, key: &str) -> bool {
        self.attributes.contains(key)
    }
}

/// Result of [`partition`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionedPayload {
    /// Keyed by offering column name.
    pub structured: Map<String, Value>,
    pub attributes: Map<String, Value>,
    pub custom_attributes: Map<String, Value>,
}

/// Partition submitted values by the keys the schema knows.
///
/// Unknown keys are isolated in `custom_attributes`, never dropped. Null
/// values are only kept for structured columns, where they clear the column.
pub fn partition(values: &FormValues, known: &KnownKeys) -> PartitionedPayload {
    let mut payload = PartitionedPayload::default();

    for (key, value) in values {
        let json = Value::from(value);
        if let Some(column) = known.column(key) {
            payload.structured.insert(column.to_string(), json);
        } else if json.is_null() {
            continue;
        } else if known.is_attribute(key) {
            payload.attributes.insert(key.clone(), json);
        } else {
            payload.custom_attributes.insert(key.clone(), json);
        }
    }

    payload
}

impl PartitionedPayload {
    /// Converts the structured part into typed offering columns.
    pub fn into_columns(self) -> OfferingColumns {
        let structured = self.structured;

        OfferingColumns {
            name: text(structured.get("name")).unwrap_or_default(),
            description: text(structured.get("description")),
            price: structured.get("price").and_then(number),
            vendor_id: text(structured.get("vendor_id")),
            images: structured.get("images").map(image_urls).unwrap_or_default(),
            is_available: structured
                .get("is_available")
                .and_then(boolean)
                .unwrap_or(true),
            attributes: self.attributes,
            custom_attributes: self.custom_attributes,
        }
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn image_urls(value: &Value) -> Vec<String> {
    fn url(item: &Value) -> Option<String> {
        match item {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Object(map) => map.get("url").and_then(Value::as_str).map(str::to_string),
            _ => None,
        }
    }

    match value {
        Value::Array(items) => items.iter().filter_map(url).collect(),
        other => url(other).into_iter().collect(),
    }
}
