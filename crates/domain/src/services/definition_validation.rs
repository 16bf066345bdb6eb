//! Consistency validation for field definitions.
//!
//! Every violated rule is collected so a caller can report all problems at once.

use validator::{Validate, ValidationErrors};

use crate::models::field_definition::{
    FieldDefinitionDraft, FieldDefinitionRequest, FieldOption, FieldType, InputType,
    DEFAULT_FIELD_GROUP,
};
use shared::validation::error_with_message;

/// Validate a create/update request and turn it into a persistable draft.
pub fn validate_definition(
    request: &FieldDefinitionRequest,
) -> Result<FieldDefinitionDraft, ValidationErrors> {
    let mut errors = match request.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };

    let field_type = match request.field_type.as_deref().map(str::trim) {
        None | Some("") => {
            errors.add(
                "field_type",
                error_with_message("field_type_required", "Field type is required"),
            );
            None
        }
        Some(raw) => match raw.parse::<FieldType>() {
            Ok(field_type) => Some(field_type),
            Err(e) => {
                errors.add(
                    "field_type",
                    error_with_message("field_type_unsupported", e.to_string()),
                );
                None
            }
        },
    };

    let input_type = match request.input_type.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match raw.parse::<InputType>() {
            Ok(input_type) => Some(input_type),
            Err(e) => {
                errors.add(
                    "input_type",
                    error_with_message("input_type_unsupported", e.to_string()),
                );
                None
            }
        },
    };

    if request.subcategory_id.is_some() && request.category_id.is_none() {
        errors.add(
            "subcategory_id",
            error_with_message(
                "subcategory_without_category",
                "Subcategory fields must also name a category",
            ),
        );
    }

    let rules = request.validation_rules.clone().unwrap_or_default();
    let options: Vec<FieldOption> = request.field_options.clone().unwrap_or_default();

    if let Some(field_type) = field_type {
        if field_type.requires_options() {
            check_options(&options, field_type, &mut errors);
        }

        if field_type == FieldType::Number {
            if let (Some(min), Some(max)) = (rules.min, rules.max) {
                if min >= max {
                    errors.add(
                        "validation_rules",
                        error_with_message(
                            "min_not_less_than_max",
                            "Minimum value must be less than maximum value",
                        ),
                    );
                }
            }
            if rules.step.is_some_and(|step| step <= 0.0) {
                errors.add(
                    "validation_rules",
                    error_with_message("step_not_positive", "Step must be greater than zero"),
                );
            }
        }

        if field_type.is_textual() {
            if let (Some(min), Some(max)) = (rules.min_length, rules.max_length) {
                if min >= max {
                    errors.add(
                        "validation_rules",
                        error_with_message(
                            "min_length_not_less_than_max_length",
                            "Minimum length must be less than maximum length",
                        ),
                    );
                }
            }
        }

        if field_type == FieldType::Multiselect {
            if let (Some(min), Some(max)) = (rules.min_selections, rules.max_selections) {
                if min > max {
                    errors.add(
                        "validation_rules",
                        error_with_message(
                            "min_selections_exceed_max",
                            "Minimum selections cannot exceed maximum selections",
                        ),
                    );
                }
            }
        }
    }

    if let Some(pattern) = rules.pattern.as_deref() {
        if regex::Regex::new(pattern).is_err() {
            errors.add(
                "validation_rules",
                error_with_message(
                    "pattern_invalid",
                    "Pattern is not a valid regular expression",
                ),
            );
        }
    }

    // A locked field always submits its default, so a required one needs a value to submit.
    let locks_at_service_type = request.is_mandatory && request.category_id.is_none();
    if locks_at_service_type
        && request.is_required
        && field_type != Some(FieldType::Boolean)
        && non_blank(request.default_value.as_deref()).is_none()
    {
        errors.add(
            "default_value",
            error_with_message(
                "mandatory_required_without_default",
                "Mandatory required fields must have a default value",
            ),
        );
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    // unreachable without a type: a missing type always records an error above
    let Some(field_type) = field_type else {
        return Err(errors);
    };

    Ok(FieldDefinitionDraft {
        category_id: non_blank(request.category_id.as_deref()),
        subcategory_id: non_blank(request.subcategory_id.as_deref()),
        field_name: request.field_name.clone(),
        field_label: request.field_label.trim().to_string(),
        field_type,
        input_type,
        field_group: non_blank(request.field_group.as_deref())
            .unwrap_or_else(|| DEFAULT_FIELD_GROUP.to_string()),
        validation_rules: rules,
        field_options: field_type.requires_options().then_some(options),
        default_value: request.default_value.clone(),
        placeholder: non_blank(request.placeholder.as_deref()),
        help_text: non_blank(request.help_text.as_deref()),
        is_required: request.is_required,
        is_searchable: request.is_searchable,
        is_filterable: request.is_filterable,
        is_translatable: request.is_translatable,
        is_visible: request.is_visible || request.is_mandatory,
        is_mandatory: request.is_mandatory,
        inherit_flags: request.inherit_flags,
        sort_order: request.sort_order,
    })
}

fn check_options(options: &[FieldOption], field_type: FieldType, errors: &mut ValidationErrors) {
    if options.is_empty() {
        errors.add(
            "field_options",
            error_with_message(
                "options_required",
                format!("At least one option is required for {} fields", field_type),
            ),
        );
        return;
    }

    if options
        .iter()
        .any(|o| o.value.trim().is_empty() || o.label.trim().is_empty())
    {
        errors.add(
            "field_options",
            error_with_message(
                "option_blank",
                "Every option needs a non-empty label and value",
            ),
        );
    }

    let mut seen = std::collections::HashSet::new();
    if !options.iter().all(|o| seen.insert(o.value.as_str())) {
        errors.add(
            "field_options",
            error_with_message("option_duplicate", "Option values must be unique"),
        );
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
