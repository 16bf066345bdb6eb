use std::collections::BTreeMap;

use crate::models::form::{FormValue, FormValues};
use crate::models::resolved_field::ResolvedFormField;

/// Joins multiple messages reported for the same field.
pub const MESSAGE_SEPARATOR: &str = "; ";

/// Validate one field value; `None` when it passes.
pub fn validate_field(field: &ResolvedFormField, value: Option<&FormValue>) -> Option<String> {
    let messages = field.input_type.strategy().validate(field, value);
    if messages.is_empty() {
        None
    } else {
        Some(messages.join(MESSAGE_SEPARATOR))
    }
}

/// Validate all visible fields, keyed by field name.
///
/// Every failing field is reported. The result depends only on its inputs.
pub fn validate_form(fields: &[ResolvedFormField], values: &FormValues) -> BTreeMap<String, String> {
    fields
        .iter()
        .filter(|field| field.is_visible)
        .filter_map(|field| {
            validate_field(field, values.get(&field.attribute_name))
                .map(|message| (field.attribute_name.clone(), message))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::field_definition::{InputType, ValidationRules};
    use crate::services::form::test_support::field;

    fn sample_fields() -> Vec<ResolvedFormField> {
        let mut a = field("a", InputType::Text);
        a.is_required = true;
        let b = field("b", InputType::Number);
        vec![a, b]
    }

    #[test]
    fn test_required_text_with_optional_number() {
        let values: FormValues = [("a".to_string(), FormValue::Text("x".into()))]
            .into_iter()
            .collect();
        assert!(validate_form(&sample_fields(), &values).is_empty());
    }

    #[test]
    fn test_all_fields_reported_together() {
        let values: FormValues = [("b".to_string(), FormValue::Text("many".into()))]
            .into_iter()
            .collect();
        let errors = validate_form(&sample_fields(), &values);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors["a"], "a is required");
        assert_eq!(errors["b"], "b must be a number");
    }

    #[test]
    fn test_messages_joined_per_field() {
        let mut code = field("code", InputType::Text);
        code.validation_rules = ValidationRules {
            max_length: Some(2),
            pattern: Some("[0-9]+".to_string()),
            ..Default::default()
        };
        let message = validate_field(&code, Some(&FormValue::Text("abc".into()))).unwrap();
        assert_eq!(
            message,
            "code must be at most 2 characters; code has an invalid format"
        );
    }

    #[test]
    fn test_invisible_fields_skipped() {
        let mut hidden = field("internal_ref", InputType::Text);
        hidden.is_required = true;
        hidden.is_visible = false;
        assert!(validate_form(&[hidden], &FormValues::new()).is_empty());
    }

    #[test]
    fn test_validate_is_idempotent() {
        let fields = sample_fields();
        let values: FormValues = [("b".to_string(), FormValue::Number(3.0))]
            .into_iter()
            .collect();
        let first = validate_form(&fields, &values);
        let second = validate_form(&fields, &values);
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }
}
