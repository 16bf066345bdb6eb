//! Form values, control descriptors and form request/response bodies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::field_definition::{FieldOption, InputType};
use super::scope::FormScope;

/// Reference to a file previously stored through the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// A submitted or pre-filled value for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Null,
    Boolean(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
    Files(Vec<UploadedFile>),
    File(UploadedFile),
}

impl FormValue {
    /// Empty values fail `is_required`. Booleans and numbers are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            FormValue::Null => true,
            FormValue::Text(s) => s.trim().is_empty(),
            FormValue::List(items) => items.is_empty(),
            FormValue::Files(files) => files.is_empty(),
            FormValue::Boolean(_) | FormValue::Number(_) | FormValue::File(_) => false,
        }
    }

    /// Parses a stored default value into the shape its control expects.
    pub fn from_default(input_type: InputType, raw: &str) -> Self {
        match input_type {
            InputType::Number => raw
                .trim()
                .parse::<f64>()
                .map(FormValue::Number)
                .unwrap_or_else(|_| FormValue::Text(raw.to_string())),
            InputType::Boolean => match raw.trim() {
                "true" => FormValue::Boolean(true),
                "false" => FormValue::Boolean(false),
                _ => FormValue::Text(raw.to_string()),
            },
            InputType::Multiselect => FormValue::List(
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            _ => FormValue::Text(raw.to_string()),
        }
    }

    /// Text view of scalar values; numbers are formatted without a trailing `.0`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            FormValue::Text(s) => Some(s.clone()),
            FormValue::Number(n) => Some(format_number(*n)),
            FormValue::Boolean(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl From<&FormValue> for serde_json::Value {
    fn from(value: &FormValue) -> Self {
        match value {
            FormValue::Null => serde_json::Value::Null,
            FormValue::Boolean(b) => serde_json::Value::Bool(*b),
            FormValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FormValue::Text(s) => serde_json::Value::String(s.clone()),
            FormValue::List(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|s| serde_json::Value::String(s.clone()))
                    .collect(),
            ),
            FormValue::Files(files) => serde_json::Value::Array(
                files.iter().map(uploaded_file_json).collect(),
            ),
            FormValue::File(file) => uploaded_file_json(file),
        }
    }
}

fn uploaded_file_json(file: &UploadedFile) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    map.insert("url".into(), serde_json::Value::String(file.url.clone()));
    if let Some(content_type) = &file.content_type {
        map.insert(
            "content_type".into(),
            serde_json::Value::String(content_type.clone()),
        );
    }
    if let Some(size) = file.size {
        map.insert("size".into(), serde_json::Value::from(size));
    }
    serde_json::Value::Object(map)
}

/// Formats a number the way a user typed it: `3` rather than `3.0`.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Field name to value mapping held by a form.
pub type FormValues = BTreeMap<String, FormValue>;

/// Constraints a control advertises to the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlConstraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_selections: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_selections: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept: Option<Vec<String>>,
}

/// Serializable description of one rendered input control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub name: String,
    pub label: String,
    pub kind: InputType,
    /// HTML-ish widget hint, e.g. `checkbox_group` for multiselect.
    pub widget: String,
    pub value: FormValue,
    pub required: bool,
    pub disabled: bool,
    pub multiple: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    pub constraints: ControlConstraints,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Controls clustered under one field group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlGroup {
    pub name: String,
    pub controls: Vec<Control>,
}

/// Request to render the form of a scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderFormRequest {
    #[serde(flatten)]
    pub scope: FormScope,
    #[serde(default)]
    pub values: FormValues,
    /// Also validate the current values and annotate controls with errors.
    #[serde(default)]
    pub validate: bool,
}

/// Response with rendered control groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderFormResponse {
    pub configured: bool,
    pub groups: Vec<ControlGroup>,
    pub errors: BTreeMap<String, String>,
}

/// Request to validate values against the form of a scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateFormRequest {
    #[serde(flatten)]
    pub scope: FormScope,
    #[serde(default)]
    pub values: FormValues,
}

/// Response for form validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateFormResponse {
    pub valid: bool,
    pub errors: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_value_untagged_shapes() {
        let values: FormValues = serde_json::from_value(json!({
            "name": "Widget",
            "price": 12.5,
            "available": true,
            "tags": ["a", "b"],
            "cleared": null,
            "image": {"url": "https://cdn.example.com/a.png", "size": 10}
        }))
        .unwrap();

        assert_eq!(values["name"], FormValue::Text("Widget".into()));
        assert_eq!(values["price"], FormValue::Number(12.5));
        assert_eq!(values["available"], FormValue::Boolean(true));
        assert_eq!(
            values["tags"],
            FormValue::List(vec!["a".into(), "b".into()])
        );
        assert_eq!(values["cleared"], FormValue::Null);
        assert!(matches!(values["image"], FormValue::File(_)));
    }

    #[test]
    fn test_form_value_is_empty() {
        assert!(FormValue::Null.is_empty());
        assert!(FormValue::Text("  ".into()).is_empty());
        assert!(FormValue::List(vec![]).is_empty());
        assert!(!FormValue::Boolean(false).is_empty());
        assert!(!FormValue::Number(0.0).is_empty());
    }

    #[test]
    fn test_from_default() {
        assert_eq!(
            FormValue::from_default(InputType::Number, "10"),
            FormValue::Number(10.0)
        );
        assert_eq!(
            FormValue::from_default(InputType::Boolean, "true"),
            FormValue::Boolean(true)
        );
        assert_eq!(
            FormValue::from_default(InputType::Multiselect, "red, blue,"),
            FormValue::List(vec!["red".into(), "blue".into()])
        );
        assert_eq!(
            FormValue::from_default(InputType::Text, "hello"),
            FormValue::Text("hello".into())
        );
    }

    #[test]
    fn test_form_value_to_json() {
        let value: serde_json::Value = (&FormValue::Number(3.0)).into();
        assert_eq!(value, json!(3.0));
        let value: serde_json::Value = (&FormValue::List(vec!["x".into()])).into();
        assert_eq!(value, json!(["x"]));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-10.0), "-10");
    }
}
