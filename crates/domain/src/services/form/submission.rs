use std::collections::{BTreeMap, BTreeSet};

use super::state::FormState;
use crate::models::form::FormValues;
use crate::models::offering::OfferingColumns;
use crate::models::resolved_field::ResolvedFormField;
use crate::services::payload::{partition, KnownKeys};

/// A submission rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Form has {} invalid field(s)", .errors.len())]
pub struct FormValidationErrors {
    pub errors: BTreeMap<String, String>,
}

/// Validate submitted values and split them into offering columns.
///
/// Locked fields are forced to their default before validation. Values of
/// invisible fields are never validated, so they are dropped.
pub fn prepare_submission(
    fields: &[ResolvedFormField],
    values: FormValues,
) -> Result<OfferingColumns, FormValidationErrors> {
    let mut state = FormState::from_fields(fields, values);
    if !state.validate(fields) {
        return Err(FormValidationErrors {
            errors: state.errors().clone(),
        });
    }

    let hidden: BTreeSet<&str> = fields
        .iter()
        .filter(|f| !f.is_visible)
        .map(|f| f.attribute_name.as_str())
        .collect();
    let visible: FormValues = state
        .values()
        .iter()
        .filter(|(name, _)| !hidden.contains(name.as_str()))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    let known = KnownKeys::for_fields(fields);
    Ok(partition(&visible, &known).into_columns())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::field_definition::InputType;
    use crate::models::form::FormValue;
    use crate::services::default_fields::default_form_fields;
    use crate::services::form::test_support::field;
    use serde_json::json;

    fn values(pairs: &[(&str, FormValue)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_valid_submission_keeps_attribute_value() {
        let mut a = field("a", InputType::Text);
        a.is_required = true;
        let b = field("b", InputType::Number);

        let columns =
            prepare_submission(&[a, b], values(&[("a", FormValue::Text("x".into()))])).unwrap();
        assert_eq!(columns.attributes.get("a"), Some(&json!("x")));
        assert!(!columns.attributes.contains_key("b"));
    }

    #[test]
    fn test_invalid_submission_rejected() {
        let fields = default_form_fields();
        let err = prepare_submission(&fields, values(&[("price", FormValue::Number(-1.0))]))
            .unwrap_err();
        assert_eq!(err.errors.len(), 2);
        assert!(err.errors.contains_key("product_name"));
        assert_eq!(err.errors["price"], "Price must be at least 0");
        assert_eq!(err.to_string(), "Form has 2 invalid field(s)");
    }

    #[test]
    fn test_standard_submission_with_custom_key() {
        let fields = default_form_fields();
        let columns = prepare_submission(
            &fields,
            values(&[
                ("product_name", FormValue::Text("Widget".into())),
                ("price", FormValue::Number(19.99)),
                ("custom_wattage", FormValue::Text("60W".into())),
            ]),
        )
        .unwrap();

        assert_eq!(columns.name, "Widget");
        assert_eq!(columns.price, Some(19.99));
        assert!(columns.is_available);
        assert_eq!(columns.custom_attributes.get("custom_wattage"), Some(&json!("60W")));
    }

    #[test]
    fn test_hidden_field_value_not_stored() {
        let mut fields = default_form_fields();
        let mut weight = field("weight_kg", InputType::Number);
        weight.is_visible = false;
        fields.push(weight);

        let columns = prepare_submission(
            &fields,
            values(&[
                ("product_name", FormValue::Text("Kettle".into())),
                ("price", FormValue::Number(25.0)),
                ("weight_kg", FormValue::Text("not a number".into())),
            ]),
        )
        .unwrap();
        assert!(!columns.attributes.contains_key("weight_kg"));
        assert!(!columns.custom_attributes.contains_key("weight_kg"));
    }

    #[test]
    fn test_locked_value_forced_to_default() {
        let mut fields = default_form_fields();
        let mut fee = field("service_fee", InputType::Number);
        fee.is_system_field = true;
        fee.is_mandatory = true;
        fee.default_value = Some("15".to_string());
        fields.push(fee);

        let columns = prepare_submission(
            &fields,
            values(&[
                ("product_name", FormValue::Text("Deep clean".into())),
                ("price", FormValue::Number(80.0)),
                ("service_fee", FormValue::Number(0.0)),
            ]),
        )
        .unwrap();
        assert_eq!(columns.attributes.get("service_fee"), Some(&json!(15.0)));
    }
}
