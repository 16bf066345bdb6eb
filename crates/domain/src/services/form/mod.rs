//! Schema-driven form rendering, validation and submission.
//!
//! Each input type has one [`RenderStrategy`] that owns both its control
//! shape and its value checks.

mod render;
mod state;
mod strategy;
mod submission;
mod validate;

pub use render::render_form;
pub use state::FormState;
pub use strategy::RenderStrategy;
pub use submission::{prepare_submission, FormValidationErrors};
pub use validate::{validate_field, validate_form, MESSAGE_SEPARATOR};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::field_definition::{DataType, InputType, ValidationRules};
    use crate::models::resolved_field::{ResolvedFormField, DEFAULT_PROVENANCE};

    pub fn field(name: &str, input_type: InputType) -> ResolvedFormField {
        let data_type = match input_type {
            InputType::Number => DataType::Number,
            InputType::Boolean => DataType::Boolean,
            InputType::Multiselect => DataType::Array,
            InputType::Date => DataType::Date,
            InputType::Datetime => DataType::Datetime,
            _ => DataType::String,
        };
        ResolvedFormField {
            attribute_id: None,
            attribute_name: name.to_string(),
            attribute_label: name.replace('_', " "),
            data_type,
            input_type,
            placeholder: None,
            help_text: None,
            is_required: false,
            is_visible: true,
            display_order: 0,
            field_group: "general".to_string(),
            validation_rules: ValidationRules::default(),
            options: Vec::new(),
            default_value: None,
            is_system_field: false,
            is_mandatory: false,
            inherited_from: DEFAULT_PROVENANCE.to_string(),
            is_searchable: false,
            is_filterable: false,
            is_translatable: false,
        }
    }
}
