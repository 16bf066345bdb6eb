//! Built-in standard product fields every form starts from.

use crate::models::field_definition::{DataType, FieldOption, InputType, ValidationRules};
use crate::models::resolved_field::{ResolvedFormField, DEFAULT_PROVENANCE};

/// Standard field names and the offering column each one is stored in.
pub const STANDARD_COLUMNS: &[(&str, &str)] = &[
    ("product_name", "name"),
    ("description", "description"),
    ("price", "price"),
    ("vendor_id", "vendor_id"),
    ("images", "images"),
    ("is_available", "is_available"),
];

/// Offering column for a standard field name.
pub fn column_for(field_name: &str) -> Option<&'static str> {
    STANDARD_COLUMNS
        .iter()
        .find(|(name, _)| *name == field_name)
        .map(|(_, column)| *column)
}

/// The global default tier of the attribute merge.
pub fn default_form_fields() -> Vec<ResolvedFormField> {
    vec![
        standard(
            "product_name",
            "Product Name",
            DataType::String,
            InputType::Text,
            10,
            "basic",
        )
        .required()
        .rules(ValidationRules {
            min_length: Some(2),
            max_length: Some(200),
            ..Default::default()
        }),
        standard(
            "description",
            "Description",
            DataType::String,
            InputType::Textarea,
            20,
            "basic",
        )
        .rules(ValidationRules {
            max_length: Some(5000),
            ..Default::default()
        }),
        standard("price", "Price", DataType::Number, InputType::Number, 30, "pricing")
            .required()
            .rules(ValidationRules {
                min: Some(0.0),
                step: Some(0.01),
                ..Default::default()
            }),
        standard(
            "vendor_id",
            "Vendor",
            DataType::String,
            InputType::Text,
            40,
            "basic",
        ),
        standard("images", "Images", DataType::Array, InputType::File, 50, "media")
            .help("JPEG, PNG, WebP or GIF images"),
        standard(
            "is_available",
            "Available",
            DataType::Boolean,
            InputType::Boolean,
            60,
            "basic",
        )
        .default_value("true"),
    ]
}

fn standard(
    name: &str,
    label: &str,
    data_type: DataType,
    input_type: InputType,
    display_order: i32,
    group: &str,
) -> ResolvedFormField {
    ResolvedFormField {
        attribute_id: None,
        attribute_name: name.to_string(),
        attribute_label: label.to_string(),
        data_type,
        input_type,
        placeholder: None,
        help_text: None,
        is_required: false,
        is_visible: true,
        display_order,
        field_group: group.to_string(),
        validation_rules: ValidationRules::default(),
        options: Vec::<FieldOption>::new(),
        default_value: None,
        is_system_field: true,
        is_mandatory: false,
        inherited_from: DEFAULT_PROVENANCE.to_string(),
        is_searchable: matches!(name, "product_name" | "description"),
        is_filterable: matches!(name, "price" | "vendor_id" | "is_available"),
        is_translatable: matches!(name, "product_name" | "description"),
    }
}

impl ResolvedFormField {
    fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    fn rules(mut self, rules: ValidationRules) -> Self {
        self.validation_rules = rules;
        self
    }

    fn help(mut self, text: &str) -> Self {
        self.help_text = Some(text.to_string());
        self
    }

    fn default_value(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }
}
