//! Field template entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{FieldOption, ValidationRules};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use super::field_definition::FieldTypeDb;

/// Database row mapping for the field_templates table.
#[derive(Debug, Clone, FromRow)]
pub struct FieldTemplateEntity {
    pub id: Uuid,
    pub name: String,
    pub bundle: Option<String>,
    pub field_label: String,
    pub field_type: FieldTypeDb,
    pub field_group: String,
    pub help_text: Option<String>,
    pub placeholder: Option<String>,
    pub validation_rules: Json<ValidationRules>,
    pub field_options: Option<Json<Vec<FieldOption>>>,
    pub default_value: Option<String>,
    pub is_required: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl From<FieldTemplateEntity> for domain::models::FieldTemplate {
    fn from(entity: FieldTemplateEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            bundle: entity.bundle,
            field_label: entity.field_label,
            field_type: entity.field_type.into(),
            field_group: entity.field_group,
            help_text: entity.help_text,
            placeholder: entity.placeholder,
            validation_rules: entity.validation_rules.0,
            field_options: entity.field_options.map(|options| options.0),
            default_value: entity.default_value,
            is_required: entity.is_required,
            sort_order: entity.sort_order,
            created_at: entity.created_at,
        }
    }
}
