//! Render strategies, one per input type.

use crate::models::field_definition::{DataType, InputType, ValidationRules};
use crate::models::form::{format_number, Control, ControlConstraints, FormValue, UploadedFile};
use crate::models::resolved_field::ResolvedFormField;
use shared::validation;

/// Uniform contract every control kind implements.
///
/// `validate` runs required-ness, then the type shape, then declared bounds.
/// Bounds are only checked once the shape is valid.
pub trait RenderStrategy: Send + Sync {
    fn kind(&self) -> InputType;

    /// Widget hint for the client.
    fn widget(&self) -> &'static str;

    fn multiple(&self, _field: &ResolvedFormField) -> bool {
        false
    }

    fn constraints(&self, _field: &ResolvedFormField) -> ControlConstraints {
        ControlConstraints::default()
    }

    /// Returns a message when the value has the wrong shape for this kind.
    fn check_shape(&self, field: &ResolvedFormField, value: &FormValue) -> Option<String>;

    fn check_bounds(&self, _field: &ResolvedFormField, _value: &FormValue) -> Vec<String> {
        Vec::new()
    }

    fn render(&self, field: &ResolvedFormField, value: Option<&FormValue>) -> Control {
        let locked = field.is_locked();
        let value = match value {
            Some(value) if !locked => value.clone(),
            _ => default_value(field),
        };

        Control {
            name: field.attribute_name.clone(),
            label: field.attribute_label.clone(),
            kind: self.kind(),
            widget: self.widget().to_string(),
            value,
            required: field.is_required,
            disabled: locked,
            multiple: self.multiple(field),
            placeholder: field.placeholder.clone(),
            help_text: field.help_text.clone(),
            options: field.options.clone(),
            constraints: self.constraints(field),
            error: None,
        }
    }

    fn validate(&self, field: &ResolvedFormField, value: Option<&FormValue>) -> Vec<String> {
        let value = match value {
            Some(value) if !value.is_empty() => value,
            _ if field.is_required => {
                return vec![format!("{} is required", field.attribute_label)];
            }
            _ => return Vec::new(),
        };

        if let Some(message) = self.check_shape(field, value) {
            return vec![message];
        }
        self.check_bounds(field, value)
    }
}

impl InputType {
    pub fn strategy(&self) -> &'static dyn RenderStrategy {
        match self {
            InputType::Text => &TextStrategy,
            InputType::Textarea => &TextAreaStrategy,
            InputType::Number => &NumberStrategy,
            InputType::Boolean => &BooleanStrategy,
            InputType::Select => &SelectStrategy,
            InputType::Multiselect => &MultiSelectStrategy,
            InputType::Date => &DateStrategy,
            InputType::Datetime => &DateTimeStrategy,
            InputType::Time => &TimeStrategy,
            InputType::Email => &EmailStrategy,
            InputType::Tel => &TelStrategy,
            InputType::Url => &UrlStrategy,
            InputType::File => &FileStrategy,
        }
    }
}

/// Initial value of a control: its parsed default, or null.
pub(crate) fn default_value(field: &ResolvedFormField) -> FormValue {
    field
        .default_value
        .as_deref()
        .map(|raw| FormValue::from_default(field.input_type, raw))
        .unwrap_or(FormValue::Null)
}

fn scalar_text(value: &FormValue) -> Option<String> {
    match value {
        FormValue::Text(s) => Some(s.trim().to_string()),
        FormValue::Number(n) => Some(format_number(*n)),
        _ => None,
    }
}

fn text_constraints(rules: &ValidationRules) -> ControlConstraints {
    ControlConstraints {
        min_length: rules.min_length,
        max_length: rules.max_length,
        pattern: rules.pattern.clone(),
        ..Default::default()
    }
}

fn text_bounds(field: &ResolvedFormField, value: &FormValue) -> Vec<String> {
    let Some(text) = scalar_text(value) else {
        return Vec::new();
    };
    let rules = &field.validation_rules;
    let length = text.chars().count();
    let mut errors = Vec::new();

    if let Some(min) = rules.min_length {
        if length < min as usize {
            errors.push(format!(
                "{} must be at least {} characters",
                field.attribute_label, min
            ));
        }
    }
    if let Some(max) = rules.max_length {
        if length > max as usize {
            errors.push(format!(
                "{} must be at most {} characters",
                field.attribute_label, max
            ));
        }
    }
    if let Some(pattern) = rules.pattern.as_deref() {
        // HTML pattern semantics: the whole value must match
        if let Ok(re) = regex::Regex::new(&format!("^(?:{})$", pattern)) {
            if !re.is_match(&text) {
                errors.push(format!("{} has an invalid format", field.attribute_label));
            }
        }
    }
    errors
}

fn shape_check(
    field: &ResolvedFormField,
    value: &FormValue,
    is_valid: fn(&str) -> bool,
    expected: &str,
) -> Option<String> {
    match scalar_text(value) {
        Some(text) if is_valid(&text) => None,
        _ => Some(format!("{} must be {}", field.attribute_label, expected)),
    }
}

pub struct TextStrategy;

impl RenderStrategy for TextStrategy {
    fn kind(&self) -> InputType {
        InputType::Text
    }

    fn widget(&self) -> &'static str {
        "text"
    }

    fn constraints(&self, field: &ResolvedFormField) -> ControlConstraints {
        text_constraints(&field.validation_rules)
    }

    fn check_shape(&self, field: &ResolvedFormField, value: &FormValue) -> Option<String> {
        shape_check(field, value, |_| true, "text")
    }

    fn check_bounds(&self, field: &ResolvedFormField, value: &FormValue) -> Vec<String> {
        text_bounds(field, value)
    }
}

pub struct TextAreaStrategy;

impl RenderStrategy for TextAreaStrategy {
    fn kind(&self) -> InputType {
        InputType::Textarea
    }

    fn widget(&self) -> &'static str {
        "textarea"
    }

    fn constraints(&self, field: &ResolvedFormField) -> ControlConstraints {
        text_constraints(&field.validation_rules)
    }

    fn check_shape(&self, field: &ResolvedFormField, value: &FormValue) -> Option<String> {
        shape_check(field, value, |_| true, "text")
    }

    fn check_bounds(&self, field: &ResolvedFormField, value: &FormValue) -> Vec<String> {
        text_bounds(field, value)
    }
}

pub struct NumberStrategy;

impl NumberStrategy {
    fn parse(value: &FormValue) -> Option<f64> {
        let parsed = match value {
            FormValue::Number(n) => Some(*n),
            FormValue::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.filter(|n| n.is_finite())
    }
}

impl RenderStrategy for NumberStrategy {
    fn kind(&self) -> InputType {
        InputType::Number
    }

    fn widget(&self) -> &'static str {
        "number"
    }

    fn constraints(&self, field: &ResolvedFormField) -> ControlConstraints {
        let rules = &field.validation_rules;
        ControlConstraints {
            min: rules.min,
            max: rules.max,
            step: rules.step,
            ..Default::default()
        }
    }

    fn check_shape(&self, field: &ResolvedFormField, value: &FormValue) -> Option<String> {
        match Self::parse(value) {
            Some(_) => None,
            None => Some(format!("{} must be a number", field.attribute_label)),
        }
    }

    fn check_bounds(&self, field: &ResolvedFormField, value: &FormValue) -> Vec<String> {
        let Some(n) = Self::parse(value) else {
            return Vec::new();
        };
        let rules = &field.validation_rules;
        let label = &field.attribute_label;
        let mut errors = Vec::new();

        if let Some(min) = rules.min {
            if n < min {
                errors.push(format!("{} must be at least {}", label, format_number(min)));
            }
        }
        if let Some(max) = rules.max {
            if n > max {
                errors.push(format!("{} must be at most {}", label, format_number(max)));
            }
        }
        if let Some(step) = rules.step.filter(|s| *s > 0.0) {
            let steps = (n - rules.min.unwrap_or(0.0)) / step;
            if (steps - steps.round()).abs() > 1e-6 {
                errors.push(format!(
                    "{} must be a multiple of {}",
                    label,
                    format_number(step)
                ));
            }
        }
        errors
    }
}

pub struct BooleanStrategy;

impl RenderStrategy for BooleanStrategy {
    fn kind(&self) -> InputType {
        InputType::Boolean
    }

    fn widget(&self) -> &'static str {
        "toggle"
    }

    fn check_shape(&self, field: &ResolvedFormField, value: &FormValue) -> Option<String> {
        match value {
            FormValue::Boolean(_) => None,
            FormValue::Text(s) if matches!(s.trim(), "true" | "false") => None,
            _ => Some(format!("{} must be true or false", field.attribute_label)),
        }
    }
}

pub struct SelectStrategy;

impl RenderStrategy for SelectStrategy {
    fn kind(&self) -> InputType {
        InputType::Select
    }

    fn widget(&self) -> &'static str {
        "dropdown"
    }

    fn check_shape(&self, field: &ResolvedFormField, value: &FormValue) -> Option<String> {
        let Some(selected) = scalar_text(value) else {
            return Some(format!("{} must be a single option", field.attribute_label));
        };
        if field.options.is_empty() || field.options.iter().any(|o| o.value == selected) {
            None
        } else {
            Some(format!(
                "{} must be one of the listed options",
                field.attribute_label
            ))
        }
    }
}

pub struct MultiSelectStrategy;

impl MultiSelectStrategy {
    fn selections(value: &FormValue) -> Option<Vec<String>> {
        match value {
            FormValue::List(items) => Some(items.clone()),
            FormValue::Text(s) => Some(vec![s.trim().to_string()]),
            _ => None,
        }
    }
}

impl RenderStrategy for MultiSelectStrategy {
    fn kind(&self) -> InputType {
        InputType::Multiselect
    }

    fn widget(&self) -> &'static str {
        "checkbox_group"
    }

    fn multiple(&self, _field: &ResolvedFormField) -> bool {
        true
    }

    fn constraints(&self, field: &ResolvedFormField) -> ControlConstraints {
        ControlConstraints {
            min_selections: field.validation_rules.min_selections,
            max_selections: field.validation_rules.max_selections,
            ..Default::default()
        }
    }

    fn check_shape(&self, field: &ResolvedFormField, value: &FormValue) -> Option<String> {
        let Some(selected) = Self::selections(value) else {
            return Some(format!("{} must be a list of options", field.attribute_label));
        };
        let unknown = !field.options.is_empty()
            && selected
                .iter()
                .any(|s| !field.options.iter().any(|o| &o.value == s));
        unknown.then(|| {
            format!(
                "{} contains an option that is not listed",
                field.attribute_label
            )
        })
    }

    fn check_bounds(&self, field: &ResolvedFormField, value: &FormValue) -> Vec<String> {
        let count = Self::selections(value).map(|s| s.len()).unwrap_or(0);
        let rules = &field.validation_rules;
        let mut errors = Vec::new();

        if let Some(min) = rules.min_selections {
            if count < min as usize {
                errors.push(format!(
                    "{} requires at least {} selections",
                    field.attribute_label, min
                ));
            }
        }
        if let Some(max) = rules.max_selections {
            if count > max as usize {
                errors.push(format!(
                    "{} allows at most {} selections",
                    field.attribute_label, max
                ));
            }
        }
        errors
    }
}

pub struct DateStrategy;

impl RenderStrategy for DateStrategy {
    fn kind(&self) -> InputType {
        InputType::Date
    }

    fn widget(&self) -> &'static str {
        "date"
    }

    fn check_shape(&self, field: &ResolvedFormField, value: &FormValue) -> Option<String> {
        shape_check(field, value, validation::is_valid_date, "a date (YYYY-MM-DD)")
    }
}

pub struct DateTimeStrategy;

impl RenderStrategy for DateTimeStrategy {
    fn kind(&self) -> InputType {
        InputType::Datetime
    }

    fn widget(&self) -> &'static str {
        "datetime-local"
    }

    fn check_shape(&self, field: &ResolvedFormField, value: &FormValue) -> Option<String> {
        shape_check(field, value, validation::is_valid_datetime, "a date and time")
    }
}

pub struct TimeStrategy;

impl RenderStrategy for TimeStrategy {
    fn kind(&self) -> InputType {
        InputType::Time
    }

    fn widget(&self) -> &'static str {
        "time"
    }

    fn check_shape(&self, field: &ResolvedFormField, value: &FormValue) -> Option<String> {
        shape_check(field, value, validation::is_valid_time, "a time (HH:MM)")
    }
}

pub struct EmailStrategy;

impl RenderStrategy for EmailStrategy {
    fn kind(&self) -> InputType {
        InputType::Email
    }

    fn widget(&self) -> &'static str {
        "email"
    }

    fn constraints(&self, field: &ResolvedFormField) -> ControlConstraints {
        text_constraints(&field.validation_rules)
    }

    fn check_shape(&self, field: &ResolvedFormField, value: &FormValue) -> Option<String> {
        shape_check(field, value, validation::is_valid_email, "a valid email address")
    }

    fn check_bounds(&self, field: &ResolvedFormField, value: &FormValue) -> Vec<String> {
        text_bounds(field, value)
    }
}

pub struct TelStrategy;

impl RenderStrategy for TelStrategy {
    fn kind(&self) -> InputType {
        InputType::Tel
    }

    fn widget(&self) -> &'static str {
        "tel"
    }

    fn constraints(&self, field: &ResolvedFormField) -> ControlConstraints {
        text_constraints(&field.validation_rules)
    }

    fn check_shape(&self, field: &ResolvedFormField, value: &FormValue) -> Option<String> {
        shape_check(field, value, validation::is_valid_tel, "a valid phone number")
    }

    fn check_bounds(&self, field: &ResolvedFormField, value: &FormValue) -> Vec<String> {
        text_bounds(field, value)
    }
}

pub struct UrlStrategy;

impl RenderStrategy for UrlStrategy {
    fn kind(&self) -> InputType {
        InputType::Url
    }

    fn widget(&self) -> &'static str {
        "url"
    }

    fn constraints(&self, field: &ResolvedFormField) -> ControlConstraints {
        text_constraints(&field.validation_rules)
    }

    fn check_shape(&self, field: &ResolvedFormField, value: &FormValue) -> Option<String> {
        shape_check(field, value, validation::is_valid_url, "a valid URL")
    }

    fn check_bounds(&self, field: &ResolvedFormField, value: &FormValue) -> Vec<String> {
        text_bounds(field, value)
    }
}

pub struct FileStrategy;

impl FileStrategy {
    /// Uploaded files are referenced by absolute URL or by a path under this server.
    fn is_reference(url: &str) -> bool {
        url.starts_with('/') || validation::is_valid_url(url)
    }

    fn references(value: &FormValue) -> Option<Vec<String>> {
        match value {
            FormValue::Text(s) => Some(vec![s.trim().to_string()]),
            FormValue::List(items) => Some(items.clone()),
            FormValue::File(UploadedFile { url, .. }) => Some(vec![url.clone()]),
            FormValue::Files(files) => Some(files.iter().map(|f| f.url.clone()).collect()),
            _ => None,
        }
    }
}

impl RenderStrategy for FileStrategy {
    fn kind(&self) -> InputType {
        InputType::File
    }

    fn widget(&self) -> &'static str {
        "file"
    }

    fn multiple(&self, field: &ResolvedFormField) -> bool {
        field.data_type == DataType::Array
    }

    fn constraints(&self, _field: &ResolvedFormField) -> ControlConstraints {
        ControlConstraints {
            accept: Some(vec!["image/*".to_string()]),
            ..Default::default()
        }
    }

    fn check_shape(&self, field: &ResolvedFormField, value: &FormValue) -> Option<String> {
        let label = &field.attribute_label;
        let Some(urls) = Self::references(value) else {
            return Some(format!("{} must reference uploaded files", label));
        };
        if !urls.iter().all(|u| Self::is_reference(u)) {
            return Some(format!("{} must reference uploaded files", label));
        }
        if urls.len() > 1 && !self.multiple(field) {
            return Some(format!("{} accepts a single file", label));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::field_definition::FieldOption;
    use crate::services::form::test_support::field;

    #[test]
    fn test_every_input_type_has_matching_strategy() {
        for input_type in InputType::ALL {
            assert_eq!(input_type.strategy().kind(), input_type);
        }
    }

    #[test]
    fn test_required_runs_first() {
        let mut f = field("model", InputType::Text);
        f.is_required = true;
        f.validation_rules = ValidationRules {
            min_length: Some(3),
            ..Default::default()
        };
        let strategy = InputType::Text.strategy();
        assert_eq!(strategy.validate(&f, None), vec!["model is required"]);
        assert_eq!(
            strategy.validate(&f, Some(&FormValue::Text("  ".into()))),
            vec!["model is required"]
        );
    }

    #[test]
    fn test_optional_empty_value_passes() {
        let f = field("weight", InputType::Number);
        assert!(InputType::Number.strategy().validate(&f, None).is_empty());
        assert!(InputType::Number
            .strategy()
            .validate(&f, Some(&FormValue::Null))
            .is_empty());
    }

    #[test]
    fn test_number_shape_and_bounds() {
        let mut f = field("weight", InputType::Number);
        f.validation_rules = ValidationRules {
            min: Some(1.0),
            max: Some(10.0),
            ..Default::default()
        };
        let strategy = InputType::Number.strategy();

        assert_eq!(
            strategy.validate(&f, Some(&FormValue::Text("heavy".into()))),
            vec!["weight must be a number"]
        );
        assert_eq!(
            strategy.validate(&f, Some(&FormValue::Number(0.5))),
            vec!["weight must be at least 1"]
        );
        assert_eq!(
            strategy.validate(&f, Some(&FormValue::Text("11".into()))),
            vec!["weight must be at most 10"]
        );
        assert!(strategy.validate(&f, Some(&FormValue::Number(5.0))).is_empty());
    }

    #[test]
    fn test_number_step() {
        let mut f = field("price", InputType::Number);
        f.validation_rules = ValidationRules {
            min: Some(0.0),
            step: Some(0.01),
            ..Default::default()
        };
        let strategy = InputType::Number.strategy();
        assert!(strategy.validate(&f, Some(&FormValue::Number(12.5))).is_empty());
        assert!(strategy.validate(&f, Some(&FormValue::Number(19.99))).is_empty());
        assert_eq!(
            strategy.validate(&f, Some(&FormValue::Number(1.005))),
            vec!["price must be a multiple of 0.01"]
        );
    }

    #[test]
    fn test_text_length_and_pattern_all_reported() {
        let mut f = field("sku", InputType::Text);
        f.validation_rules = ValidationRules {
            min_length: Some(4),
            pattern: Some("[A-Z]+".to_string()),
            ..Default::default()
        };
        let messages = InputType::Text
            .strategy()
            .validate(&f, Some(&FormValue::Text("ab".into())));
        assert_eq!(
            messages,
            vec![
                "sku must be at least 4 characters".to_string(),
                "sku has an invalid format".to_string()
            ]
        );
    }

    #[test]
    fn test_email_and_url_shapes() {
        let email = field("contact", InputType::Email);
        assert_eq!(
            InputType::Email
                .strategy()
                .validate(&email, Some(&FormValue::Text("not-an-email".into()))),
            vec!["contact must be a valid email address"]
        );
        assert!(InputType::Email
            .strategy()
            .validate(&email, Some(&FormValue::Text("a@b.io".into())))
            .is_empty());

        let url = field("manual", InputType::Url);
        assert_eq!(
            InputType::Url
                .strategy()
                .validate(&url, Some(&FormValue::Text("example".into()))),
            vec!["manual must be a valid URL"]
        );
        assert!(InputType::Url
            .strategy()
            .validate(&url, Some(&FormValue::Text("https://example.com/m.pdf".into())))
            .is_empty());
    }

    #[test]
    fn test_temporal_shapes() {
        let date = field("launched", InputType::Date);
        assert!(InputType::Date
            .strategy()
            .validate(&date, Some(&FormValue::Text("2024-02-29".into())))
            .is_empty());
        assert!(!InputType::Date
            .strategy()
            .validate(&date, Some(&FormValue::Text("2023-02-29".into())))
            .is_empty());

        let time = field("opens_at", InputType::Time);
        assert!(InputType::Time
            .strategy()
            .validate(&time, Some(&FormValue::Text("09:30".into())))
            .is_empty());
        assert!(!InputType::Time
            .strategy()
            .validate(&time, Some(&FormValue::Text("9 am".into())))
            .is_empty());
    }

    #[test]
    fn test_boolean_false_satisfies_required() {
        let mut f = field("is_available", InputType::Boolean);
        f.is_required = true;
        assert!(InputType::Boolean
            .strategy()
            .validate(&f, Some(&FormValue::Boolean(false)))
            .is_empty());
    }

    #[test]
    fn test_select_value_must_be_listed() {
        let mut f = field("size", InputType::Select);
        f.options = vec![FieldOption::new("Small", "s"), FieldOption::new("Large", "l")];
        let strategy = InputType::Select.strategy();
        assert!(strategy.validate(&f, Some(&FormValue::Text("s".into()))).is_empty());
        assert_eq!(
            strategy.validate(&f, Some(&FormValue::Text("xl".into()))),
            vec!["size must be one of the listed options"]
        );
    }

    #[test]
    fn test_multiselect_selection_bounds() {
        let mut f = field("colors", InputType::Multiselect);
        f.options = vec![FieldOption::new("Red", "red"), FieldOption::new("Blue", "blue")];
        f.validation_rules = ValidationRules {
            min_selections: Some(2),
            ..Default::default()
        };
        let strategy = InputType::Multiselect.strategy();
        assert_eq!(
            strategy.validate(&f, Some(&FormValue::List(vec!["red".into()]))),
            vec!["colors requires at least 2 selections"]
        );
        assert_eq!(
            strategy.validate(&f, Some(&FormValue::List(vec!["red".into(), "green".into()]))),
            vec!["colors contains an option that is not listed"]
        );
    }

    #[test]
    fn test_locked_field_renders_disabled_with_default() {
        let mut f = field("service_fee", InputType::Number);
        f.is_system_field = true;
        f.is_mandatory = true;
        f.default_value = Some("5".to_string());

        let control = InputType::Number
            .strategy()
            .render(&f, Some(&FormValue::Number(99.0)));
        assert!(control.disabled);
        assert_eq!(control.value, FormValue::Number(5.0));
    }

    #[test]
    fn test_render_projects_constraints() {
        let mut f = field("weight", InputType::Number);
        f.validation_rules = ValidationRules {
            min: Some(0.0),
            max: Some(50.0),
            step: Some(0.5),
            ..Default::default()
        };
        let control = InputType::Number.strategy().render(&f, None);
        assert_eq!(control.widget, "number");
        assert_eq!(control.constraints.min, Some(0.0));
        assert_eq!(control.constraints.max, Some(50.0));
        assert_eq!(control.constraints.step, Some(0.5));
        assert_eq!(control.value, FormValue::Null);
        assert!(!control.disabled);
    }

    #[test]
    fn test_file_strategy() {
        let mut images = field("images", InputType::File);
        images.data_type = DataType::Array;
        let strategy = InputType::File.strategy();

        let control = strategy.render(&images, None);
        assert!(control.multiple);
        assert_eq!(control.constraints.accept, Some(vec!["image/*".to_string()]));

        let uploaded = FormValue::List(vec![
            "/uploads/a.png".into(),
            "https://cdn.example.com/b.png".into(),
        ]);
        assert!(strategy.validate(&images, Some(&uploaded)).is_empty());

        let single = field("manual_scan", InputType::File);
        assert_eq!(
            strategy.validate(&single, Some(&uploaded)),
            vec!["manual scan accepts a single file"]
        );
        assert_eq!(
            strategy.validate(&single, Some(&FormValue::Text("nope".into()))),
            vec!["manual scan must reference uploaded files"]
        );
    }
}
