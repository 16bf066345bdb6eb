//! Reusable field definition presets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::field_definition::{
    FieldDefinition, FieldDefinitionRequest, FieldOption, FieldType, ValidationRules,
};

/// A named field preset. Templates sharing a `bundle` are applied together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldTemplate {
    pub id: Uuid,
    pub name: String,
    pub bundle: Option<String>,
    pub field_label: String,
    pub field_type: FieldType,
    pub field_group: String,
    pub help_text: Option<String>,
    pub placeholder: Option<String>,
    pub validation_rules: ValidationRules,
    pub field_options: Option<Vec<FieldOption>>,
    pub default_value: Option<String>,
    pub is_required: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl FieldTemplate {
    /// Definition request creating this preset at the service-type tier.
    pub fn to_request(&self) -> FieldDefinitionRequest {
        FieldDefinitionRequest {
            category_id: None,
            subcategory_id: None,
            field_name: self.name.clone(),
            field_label: self.field_label.clone(),
            field_type: Some(self.field_type.as_str().to_string()),
            input_type: None,
            field_group: Some(self.field_group.clone()),
            validation_rules: Some(self.validation_rules.clone()),
            field_options: self.field_options.clone(),
            default_value: self.default_value.clone(),
            placeholder: self.placeholder.clone(),
            help_text: self.help_text.clone(),
            is_required: self.is_required,
            is_searchable: false,
            is_filterable: false,
            is_translatable: false,
            is_visible: true,
            is_mandatory: false,
            inherit_flags: false,
            sort_order: self.sort_order,
        }
    }
}

/// Response for listing templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTemplatesResponse {
    pub data: Vec<FieldTemplate>,
}

/// Request to apply a template (or bundle) to a service type.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplyTemplateRequest {
    #[validate(length(min = 1, max = 100, message = "Template name is required"))]
    pub template_name: String,
}

/// Response after applying a template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyTemplateResponse {
    pub template_name: String,
    pub service_type_id: String,
    pub inserted: Vec<String>,
    pub updated: Vec<String>,
    pub fields: Vec<FieldDefinition>,
}
