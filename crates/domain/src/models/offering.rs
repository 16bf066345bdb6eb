//! Offerings (products) persisted from submitted attribute forms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::form::FormValues;
use super::scope::FormScope;

/// Offering domain model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offering {
    pub id: Uuid,
    pub service_type_id: String,
    pub category_id: String,
    pub subcategory_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub vendor_id: Option<String>,
    pub images: Vec<String>,
    pub is_available: bool,
    /// Values of resolved non-standard fields.
    pub attributes: serde_json::Map<String, serde_json::Value>,
    /// Submitted keys that matched no resolved field.
    pub custom_attributes: serde_json::Map<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values extracted from a partitioned submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferingColumns {
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub vendor_id: Option<String>,
    pub images: Vec<String>,
    pub is_available: bool,
    pub attributes: serde_json::Map<String, serde_json::Value>,
    pub custom_attributes: serde_json::Map<String, serde_json::Value>,
}

/// Request to save an offering from form values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitOfferingRequest {
    #[serde(flatten)]
    pub scope: FormScope,
    #[serde(default)]
    pub values: FormValues,
}
