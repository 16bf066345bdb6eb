//! Field definition entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{FieldOption, FieldType, InputType, ValidationRules};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for field_type that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "field_type", rename_all = "lowercase")]
pub enum FieldTypeDb {
    Text,
    Textarea,
    Number,
    Boolean,
    Select,
    Multiselect,
    Date,
    Datetime,
    Url,
    Email,
    Tel,
}

impl From<FieldTypeDb> for FieldType {
    fn from(db: FieldTypeDb) -> Self {
        match db {
            FieldTypeDb::Text => FieldType::Text,
            FieldTypeDb::Textarea => FieldType::Textarea,
            FieldTypeDb::Number => FieldType::Number,
            FieldTypeDb::Boolean => FieldType::Boolean,
            FieldTypeDb::Select => FieldType::Select,
            FieldTypeDb::Multiselect => FieldType::Multiselect,
            FieldTypeDb::Date => FieldType::Date,
            FieldTypeDb::Datetime => FieldType::Datetime,
            FieldTypeDb::Url => FieldType::Url,
            FieldTypeDb::Email => FieldType::Email,
            FieldTypeDb::Tel => FieldType::Tel,
        }
    }
}

impl From<FieldType> for FieldTypeDb {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Text => FieldTypeDb::Text,
            FieldType::Textarea => FieldTypeDb::Textarea,
            FieldType::Number => FieldTypeDb::Number,
            FieldType::Boolean => FieldTypeDb::Boolean,
            FieldType::Select => FieldTypeDb::Select,
            FieldType::Multiselect => FieldTypeDb::Multiselect,
            FieldType::Date => FieldTypeDb::Date,
            FieldType::Datetime => FieldTypeDb::Datetime,
            FieldType::Url => FieldTypeDb::Url,
            FieldType::Email => FieldTypeDb::Email,
            FieldType::Tel => FieldTypeDb::Tel,
        }
    }
}

/// Database enum for input_type that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "input_type", rename_all = "lowercase")]
pub enum InputTypeDb {
    Text,
    Textarea,
    Number,
    Boolean,
    Select,
    Multiselect,
    Date,
    Datetime,
    Time,
    Email,
    Tel,
    Url,
    File,
}

impl From<InputTypeDb> for InputType {
    fn from(db: InputTypeDb) -> Self {
        match db {
            InputTypeDb::Text => InputType::Text,
            InputTypeDb::Textarea => InputType::Textarea,
            InputTypeDb::Number => InputType::Number,
            InputTypeDb::Boolean => InputType::Boolean,
            InputTypeDb::Select => InputType::Select,
            InputTypeDb::Multiselect => InputType::Multiselect,
            InputTypeDb::Date => InputType::Date,
            InputTypeDb::Datetime => InputType::Datetime,
            InputTypeDb::Time => InputType::Time,
            InputTypeDb::Email => InputType::Email,
            InputTypeDb::Tel => InputType::Tel,
            InputTypeDb::Url => InputType::Url,
            InputTypeDb::File => InputType::File,
        }
    }
}

impl From<InputType> for InputTypeDb {
    fn from(input_type: InputType) -> Self {
        match input_type {
            InputType::Text => InputTypeDb::Text,
            InputType::Textarea => InputTypeDb::Textarea,
            InputType::Number => InputTypeDb::Number,
            InputType::Boolean => InputTypeDb::Boolean,
            InputType::Select => InputTypeDb::Select,
            InputType::Multiselect => InputTypeDb::Multiselect,
            InputType::Date => InputTypeDb::Date,
            InputType::Datetime => InputTypeDb::Datetime,
            InputType::Time => InputTypeDb::Time,
            InputType::Email => InputTypeDb::Email,
            InputType::Tel => InputTypeDb::Tel,
            InputType::Url => InputTypeDb::Url,
            InputType::File => InputTypeDb::File,
        }
    }
}

/// Database row mapping for the field_definitions table.
#[derive(Debug, Clone, FromRow)]
pub struct FieldDefinitionEntity {
    pub id: Uuid,
    pub service_type_id: String,
    pub category_id: Option<String>,
    pub subcategory_id: Option<String>,
    pub field_name: String,
    pub field_label: String,
    pub field_type: FieldTypeDb,
    pub input_type: Option<InputTypeDb>,
    pub field_group: String,
    pub validation_rules: Json<ValidationRules>,
    pub field_options: Option<Json<Vec<FieldOption>>>,
    pub default_value: Option<String>,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
    pub is_required: bool,
    pub is_searchable: bool,
    pub is_filterable: bool,
    pub is_translatable: bool,
    pub is_visible: bool,
    pub is_mandatory: bool,
    pub inherit_flags: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FieldDefinitionEntity> for domain::models::FieldDefinition {
    fn from(entity: FieldDefinitionEntity) -> Self {
        Self {
            id: entity.id,
            service_type_id: entity.service_type_id,
            category_id: entity.category_id,
            subcategory_id: entity.subcategory_id,
            field_name: entity.field_name,
            field_label: entity.field_label,
            field_type: entity.field_type.into(),
            input_type: entity.input_type.map(Into::into),
            field_group: entity.field_group,
            validation_rules: entity.validation_rules.0,
            field_options: entity.field_options.map(|options| options.0),
            default_value: entity.default_value,
            placeholder: entity.placeholder,
            help_text: entity.help_text,
            is_required: entity.is_required,
            is_searchable: entity.is_searchable,
            is_filterable: entity.is_filterable,
            is_translatable: entity.is_translatable,
            is_visible: entity.is_visible,
            is_mandatory: entity.is_mandatory,
            inherit_flags: entity.inherit_flags,
            sort_order: entity.sort_order,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Row returned by a template upsert: the stored definition and whether it was new.
#[derive(Debug, Clone, FromRow)]
pub struct UpsertedFieldEntity {
    #[sqlx(flatten)]
    pub field: FieldDefinitionEntity,
    pub inserted: bool,
}
