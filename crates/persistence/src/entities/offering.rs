//! Offering entity (database row mapping).

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the offerings table.
#[derive(Debug, Clone, FromRow)]
pub struct OfferingEntity {
    pub id: Uuid,
    pub service_type_id: String,
    pub category_id: String,
    pub subcategory_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub vendor_id: Option<String>,
    pub images: Json<Vec<String>>,
    pub is_available: bool,
    pub attributes: Json<Map<String, Value>>,
    pub custom_attributes: Json<Map<String, Value>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OfferingEntity> for domain::models::Offering {
    fn from(entity: OfferingEntity) -> Self {
        Self {
            id: entity.id,
            service_type_id: entity.service_type_id,
            category_id: entity.category_id,
            subcategory_id: entity.subcategory_id,
            name: entity.name,
            description: entity.description,
            price: entity.price,
            vendor_id: entity.vendor_id,
            images: entity.images.0,
            is_available: entity.is_available,
            attributes: entity.attributes.0,
            custom_attributes: entity.custom_attributes.0,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
