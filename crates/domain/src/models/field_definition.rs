//! Attribute field definitions scoped to service types, categories and subcategories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Group assigned to fields that do not name one.
pub const DEFAULT_FIELD_GROUP: &str = "general";

/// Declared type of a field definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
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

impl FieldType {
    pub const ALL: [FieldType; 11] = [
        FieldType::Text,
        FieldType::Textarea,
        FieldType::Number,
        FieldType::Boolean,
        FieldType::Select,
        FieldType::Multiselect,
        FieldType::Date,
        FieldType::Datetime,
        FieldType::Url,
        FieldType::Email,
        FieldType::Tel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Select => "select",
            FieldType::Multiselect => "multiselect",
            FieldType::Date => "date",
            FieldType::Datetime => "datetime",
            FieldType::Url => "url",
            FieldType::Email => "email",
            FieldType::Tel => "tel",
        }
    }

    /// Select-like types must carry at least one option.
    pub fn requires_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Multiselect)
    }

    pub fn is_textual(&self) -> bool {
        matches!(self, FieldType::Text | FieldType::Textarea)
    }

    pub fn data_type(&self) -> DataType {
        match self {
            FieldType::Number => DataType::Number,
            FieldType::Boolean => DataType::Boolean,
            FieldType::Multiselect => DataType::Array,
            FieldType::Date => DataType::Date,
            FieldType::Datetime => DataType::Datetime,
            FieldType::Text
            | FieldType::Textarea
            | FieldType::Select
            | FieldType::Url
            | FieldType::Email
            | FieldType::Tel => DataType::String,
        }
    }

    /// Render strategy used when the definition carries no explicit input type.
    pub fn default_input_type(&self) -> InputType {
        match self {
            FieldType::Text => InputType::Text,
            FieldType::Textarea => InputType::Textarea,
            FieldType::Number => InputType::Number,
            FieldType::Boolean => InputType::Boolean,
            FieldType::Select => InputType::Select,
            FieldType::Multiselect => InputType::Multiselect,
            FieldType::Date => InputType::Date,
            FieldType::Datetime => InputType::Datetime,
            FieldType::Url => InputType::Url,
            FieldType::Email => InputType::Email,
            FieldType::Tel => InputType::Tel,
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported field type '{0}'")]
pub struct UnknownFieldType(pub String);

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownFieldType(s.to_string()))
    }
}

/// Control kind a field is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
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

impl InputType {
    pub const ALL: [InputType; 13] = [
        InputType::Text,
        InputType::Textarea,
        InputType::Number,
        InputType::Boolean,
        InputType::Select,
        InputType::Multiselect,
        InputType::Date,
        InputType::Datetime,
        InputType::Time,
        InputType::Email,
        InputType::Tel,
        InputType::Url,
        InputType::File,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Textarea => "textarea",
            InputType::Number => "number",
            InputType::Boolean => "boolean",
            InputType::Select => "select",
            InputType::Multiselect => "multiselect",
            InputType::Date => "date",
            InputType::Datetime => "datetime",
            InputType::Time => "time",
            InputType::Email => "email",
            InputType::Tel => "tel",
            InputType::Url => "url",
            InputType::File => "file",
        }
    }
}

impl std::fmt::Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported input type '{0}'")]
pub struct UnknownInputType(pub String);

impl FromStr for InputType {
    type Err = UnknownInputType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownInputType(s.to_string()))
    }
}

/// Shape of the value a field stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Number,
    Boolean,
    Array,
    Date,
    Datetime,
}

/// Type-dependent constraint bag attached to a definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ValidationRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_selections: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_selections: Option<u32>,
}

impl ValidationRules {
    pub fn is_empty(&self) -> bool {
        *self == ValidationRules::default()
    }
}

/// A selectable option of a select or multiselect field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Scope level a definition lives at, from broadest to narrowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeTier {
    ServiceType,
    Category,
    Subcategory,
}

/// Field definition domain model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub id: Uuid,
    pub service_type_id: String,
    pub category_id: Option<String>,
    pub subcategory_id: Option<String>,
    pub field_name: String,
    pub field_label: String,
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,
    pub field_group: String,
    pub validation_rules: ValidationRules,
    pub field_options: Option<Vec<FieldOption>>,
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

impl FieldDefinition {
    pub fn tier(&self) -> ScopeTier {
        match (&self.category_id, &self.subcategory_id) {
            (_, Some(_)) => ScopeTier::Subcategory,
            (Some(_), None) => ScopeTier::Category,
            (None, None) => ScopeTier::ServiceType,
        }
    }

    pub fn effective_input_type(&self) -> InputType {
        self.input_type
            .unwrap_or_else(|| self.field_type.default_input_type())
    }
}

/// Request body to create or replace a field definition.
///
/// `field_type` and `input_type` stay strings so an unsupported value is
/// reported alongside every other violation instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct FieldDefinitionRequest {
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub subcategory_id: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_field_name"))]
    pub field_name: String,
    #[serde(default)]
    #[validate(custom(function = "validate_field_label"))]
    pub field_label: String,
    #[serde(default)]
    pub field_type: Option<String>,
    #[serde(default)]
    pub input_type: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100, message = "Field group must be at most 100 characters"))]
    pub field_group: Option<String>,
    #[serde(default)]
    pub validation_rules: Option<ValidationRules>,
    #[serde(default)]
    pub field_options: Option<Vec<FieldOption>>,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255, message = "Placeholder must be at most 255 characters"))]
    pub placeholder: Option<String>,
    #[serde(default)]
    #[validate(length(max = 2000, message = "Help text must be at most 2000 characters"))]
    pub help_text: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub is_searchable: bool,
    #[serde(default)]
    pub is_filterable: bool,
    #[serde(default)]
    pub is_translatable: bool,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    #[serde(default)]
    pub is_mandatory: bool,
    #[serde(default)]
    pub inherit_flags: bool,
    #[serde(default)]
    #[validate(range(min = -10000, max = 10000, message = "Sort order must be between -10000 and 10000"))]
    pub sort_order: i32,
}

fn default_true() -> bool {
    true
}

fn validate_field_label(label: &str) -> Result<(), validator::ValidationError> {
    if label.trim().is_empty() {
        return Err(shared::validation::error_with_message(
            "field_label_required",
            "Field label is required",
        ));
    }
    if label.len() > 255 {
        return Err(shared::validation::error_with_message(
            "field_label_too_long",
            "Field label must be at most 255 characters",
        ));
    }
    Ok(())
}

/// A definition that passed validation, ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinitionDraft {
    pub category_id: Option<String>,
    pub subcategory_id: Option<String>,
    pub field_name: String,
    pub field_label: String,
    pub field_type: FieldType,
    pub input_type: Option<InputType>,
    pub field_group: String,
    pub validation_rules: ValidationRules,
    pub field_options: Option<Vec<FieldOption>>,
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
}

/// Query parameters for listing the fields of a service type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListFieldsQuery {
    pub category_id: Option<String>,
    pub subcategory_id: Option<String>,
}

/// Response for listing field definitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldListResponse {
    pub service_type_id: String,
    pub data: Vec<FieldDefinition>,
}

/// Response for a field mutation, carrying the re-listed scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldMutationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_id: Option<Uuid>,
    pub fields: FieldListResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_type_round_trip_names() {
        for field_type in FieldType::ALL {
            assert_eq!(field_type.as_str().parse::<FieldType>(), Ok(field_type));
        }
        assert_eq!(
            "dropdown".parse::<FieldType>().unwrap_err().to_string(),
            "Unsupported field type 'dropdown'"
        );
    }

    #[test]
    fn test_input_type_includes_time_and_file() {
        assert_eq!("time".parse::<InputType>(), Ok(InputType::Time));
        assert_eq!("file".parse::<InputType>(), Ok(InputType::File));
        assert!("file".parse::<FieldType>().is_err());
    }

    #[test]
    fn test_field_type_helpers() {
        assert!(FieldType::Select.requires_options());
        assert!(FieldType::Multiselect.requires_options());
        assert!(!FieldType::Text.requires_options());
        assert!(FieldType::Textarea.is_textual());
        assert!(!FieldType::Email.is_textual());
        assert_eq!(FieldType::Multiselect.data_type(), DataType::Array);
        assert_eq!(FieldType::Tel.default_input_type(), InputType::Tel);
    }

    #[test]
    fn test_validation_rules_camel_case() {
        let rules: ValidationRules =
            serde_json::from_value(json!({"minLength": 2, "maxLength": 10})).unwrap();
        assert_eq!(rules.min_length, Some(2));
        assert_eq!(rules.max_length, Some(10));
        assert!(!rules.is_empty());

        let serialized = serde_json::to_value(&rules).unwrap();
        assert_eq!(serialized, json!({"minLength": 2, "maxLength": 10}));
    }

    #[test]
    fn test_validation_rules_reject_unknown_keys() {
        let result: Result<ValidationRules, _> = serde_json::from_value(json!({"minimum": 2}));
        assert!(result.is_err());
    }

    #[test]
    fn test_request_defaults() {
        let request: FieldDefinitionRequest = serde_json::from_value(json!({
            "field_name": "brand",
            "field_label": "Brand",
            "field_type": "text"
        }))
        .unwrap();
        assert!(request.is_visible);
        assert!(!request.is_required);
        assert_eq!(request.sort_order, 0);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_blank_label_rejected() {
        let request = FieldDefinitionRequest {
            field_name: "brand".to_string(),
            field_label: "   ".to_string(),
            ..Default::default()
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("field_label"));
    }

    #[test]
    fn test_definition_tier() {
        let now = Utc::now();
        let mut definition = FieldDefinition {
            id: Uuid::new_v4(),
            service_type_id: "cleaning".to_string(),
            category_id: None,
            subcategory_id: None,
            field_name: "duration".to_string(),
            field_label: "Duration".to_string(),
            field_type: FieldType::Number,
            input_type: None,
            field_group: DEFAULT_FIELD_GROUP.to_string(),
            validation_rules: ValidationRules::default(),
            field_options: None,
            default_value: None,
            placeholder: None,
            help_text: None,
            is_required: false,
            is_searchable: false,
            is_filterable: false,
            is_translatable: false,
            is_visible: true,
            is_mandatory: false,
            inherit_flags: false,
            sort_order: 0,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(definition.tier(), ScopeTier::ServiceType);
        assert_eq!(definition.effective_input_type(), InputType::Number);

        definition.category_id = Some("deep-clean".to_string());
        assert_eq!(definition.tier(), ScopeTier::Category);

        definition.subcategory_id = Some("kitchen".to_string());
        assert_eq!(definition.tier(), ScopeTier::Subcategory);
    }
}
