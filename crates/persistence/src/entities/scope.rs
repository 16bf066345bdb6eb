//! Scope entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the service_types table.
#[derive(Debug, Clone, FromRow)]
pub struct ServiceTypeEntity {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<ServiceTypeEntity> for domain::models::ServiceType {
    fn from(entity: ServiceTypeEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            created_at: entity.created_at,
        }
    }
}

/// Database row mapping for the categories table.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryEntity {
    pub id: String,
    pub service_type_id: String,
    pub name: String,
}

impl From<CategoryEntity> for domain::models::Category {
    fn from(entity: CategoryEntity) -> Self {
        Self {
            id: entity.id,
            service_type_id: entity.service_type_id,
            name: entity.name,
        }
    }
}

/// Database row mapping for the subcategories table.
#[derive(Debug, Clone, FromRow)]
pub struct SubcategoryEntity {
    pub id: String,
    pub category_id: String,
    pub name: String,
}

impl From<SubcategoryEntity> for domain::models::Subcategory {
    fn from(entity: SubcategoryEntity) -> Self {
        Self {
            id: entity.id,
            category_id: entity.category_id,
            name: entity.name,
        }
    }
}
