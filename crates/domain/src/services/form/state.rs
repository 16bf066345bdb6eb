use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::strategy::default_value;
use super::validate::validate_form;
use crate::models::form::{FormValue, FormValues};
use crate::models::resolved_field::ResolvedFormField;

/// Values and errors of one form instance.
///
/// Mutated only through [`FormState::set_field`], [`FormState::clear_error`]
/// and [`FormState::validate`]. Locked fields always hold their default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    values: FormValues,
    errors: BTreeMap<String, String>,
    #[serde(skip)]
    locked: BTreeMap<String, FormValue>,
}

impl FormState {
    /// Seeds a state from submitted values, filling absent fields with
    /// their defaults and pinning locked fields to theirs.
    pub fn from_fields(fields: &[ResolvedFormField], values: FormValues) -> Self {
        let mut state = Self {
            values,
            ..Default::default()
        };

        for field in fields {
            let default = default_value(field);
            if field.is_locked() {
                state
                    .locked
                    .insert(field.attribute_name.clone(), default.clone());
                state.values.insert(field.attribute_name.clone(), default);
            } else if default != FormValue::Null {
                state
                    .values
                    .entry(field.attribute_name.clone())
                    .or_insert(default);
            }
        }

        state
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn value(&self, name: &str) -> Option<&FormValue> {
        self.values.get(name)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Sets a value and clears that field's error. Returns false for locked fields.
    pub fn set_field(&mut self, name: &str, value: FormValue) -> bool {
        if self.locked.contains_key(name) {
            return false;
        }
        self.values.insert(name.to_string(), value);
        self.clear_error(name);
        true
    }

    pub fn clear_error(&mut self, name: &str) {
        self.errors.remove(name);
    }

    /// Replaces the error map with a fresh validation of the current values.
    pub fn validate(&mut self, fields: &[ResolvedFormField]) -> bool {
        self.errors = validate_form(fields, &self.values);
        self.is_valid()
    }

    pub fn into_values(self) -> FormValues {
        self.values
    }
}
