//! Resolved form fields produced by the attribute inheritance merge.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::field_definition::{
    DataType, FieldDefinition, FieldOption, InputType, ValidationRules,
};

/// Provenance recorded for global and service-type definitions.
pub const DEFAULT_PROVENANCE: &str = "default";

/// A field definition after inheritance merge, annotated with provenance and lock status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFormField {
    /// Store id of the winning definition; built-in defaults have none.
    pub attribute_id: Option<Uuid>,
    pub attribute_name: String,
    pub attribute_label: String,
    pub data_type: DataType,
    pub input_type: InputType,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
    pub is_required: bool,
    pub is_visible: bool,
    pub display_order: i32,
    pub field_group: String,
    pub validation_rules: ValidationRules,
    pub options: Vec<FieldOption>,
    pub default_value: Option<String>,
    pub is_system_field: bool,
    pub is_mandatory: bool,
    pub inherited_from: String,
    pub is_searchable: bool,
    pub is_filterable: bool,
    pub is_translatable: bool,
}

impl ResolvedFormField {
    /// Builds a resolved field from a stored definition.
    ///
    /// Only service-type definitions are system fields and only they may be mandatory.
    pub fn from_definition(definition: &FieldDefinition, inherited_from: &str) -> Self {
        let is_system_field = definition.category_id.is_none();
        Self {
            attribute_id: Some(definition.id),
            attribute_name: definition.field_name.clone(),
            attribute_label: definition.field_label.clone(),
            data_type: definition.field_type.data_type(),
            input_type: definition.effective_input_type(),
            placeholder: definition.placeholder.clone(),
            help_text: definition.help_text.clone(),
            is_required: definition.is_required,
            is_visible: definition.is_visible,
            display_order: definition.sort_order,
            field_group: definition.field_group.clone(),
            validation_rules: definition.validation_rules.clone(),
            options: definition.field_options.clone().unwrap_or_default(),
            default_value: definition.default_value.clone(),
            is_system_field,
            is_mandatory: is_system_field && definition.is_mandatory,
            inherited_from: inherited_from.to_string(),
            is_searchable: definition.is_searchable,
            is_filterable: definition.is_filterable,
            is_translatable: definition.is_translatable,
        }
    }

    /// Locked fields render disabled and always submit their default value.
    pub fn is_locked(&self) -> bool {
        self.is_system_field && self.is_mandatory
    }

    pub fn group_name(&self) -> &str {
        if self.field_group.trim().is_empty() {
            super::field_definition::DEFAULT_FIELD_GROUP
        } else {
            &self.field_group
        }
    }
}

/// Query parameters for resolving a form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveFormQuery {
    pub service_type_id: String,
    pub category_id: String,
    pub subcategory_id: Option<String>,
}

/// Response for form resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveFormResponse {
    pub service_type_id: String,
    pub category_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory_id: Option<String>,
    /// False when no store tier defines any field for this scope.
    pub configured: bool,
    pub fields: Vec<ResolvedFormField>,
}
