use super::state::FormState;
use crate::models::form::ControlGroup;
use crate::models::resolved_field::ResolvedFormField;

/// Render visible fields into control groups.
///
/// Groups appear in the order their first field appears in `fields`; controls
/// within a group are ordered by display order.
pub fn render_form(fields: &[ResolvedFormField], state: &FormState) -> Vec<ControlGroup> {
    let mut groups: Vec<(ControlGroup, Vec<i32>)> = Vec::new();

    for field in fields.iter().filter(|f| f.is_visible) {
        let mut control = field
            .input_type
            .strategy()
            .render(field, state.value(&field.attribute_name));
        control.error = state.errors().get(&field.attribute_name).cloned();

        let group_name = field.group_name();
        let index = match groups.iter().position(|(g, _)| g.name == group_name) {
            Some(index) => index,
            None => {
                groups.push((
                    ControlGroup {
                        name: group_name.to_string(),
                        controls: Vec::new(),
                    },
                    Vec::new(),
                ));
                groups.len() - 1
            }
        };
        let (group, orders) = &mut groups[index];
        group.controls.push(control);
        orders.push(field.display_order);
    }

    groups
        .into_iter()
        .map(|(mut group, orders)| {
            let mut indexed: Vec<_> = orders.into_iter().zip(group.controls).collect();
            indexed.sort_by_key(|(order, _)| *order);
            group.controls = indexed.into_iter().map(|(_, control)| control).collect();
            group
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::field_definition::InputType;
    use crate::models::form::{FormValue, FormValues};
    use crate::services::default_fields::default_form_fields;
    use crate::services::form::test_support::field;

    #[test]
    fn test_groups_in_first_seen_order() {
        let fields = default_form_fields();
        let groups = render_form(&fields, &FormState::from_fields(&fields, FormValues::new()));
        let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["basic", "pricing", "media"]);

        let basic: Vec<_> = groups[0].controls.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            basic,
            vec!["product_name", "description", "vendor_id", "is_available"]
        );
    }

    #[test]
    fn test_missing_group_falls_back_to_general() {
        let mut loose = field("notes", InputType::Textarea);
        loose.field_group = String::new();
        let groups = render_form(&[loose], &FormState::default());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "general");
    }

    #[test]
    fn test_invisible_fields_not_rendered() {
        let mut hidden = field("internal_ref", InputType::Text);
        hidden.is_visible = false;
        let shown = field("brand", InputType::Text);
        let groups = render_form(&[hidden, shown], &FormState::default());
        assert_eq!(groups[0].controls.len(), 1);
        assert_eq!(groups[0].controls[0].name, "brand");
    }

    #[test]
    fn test_errors_annotate_controls() {
        let mut brand = field("brand", InputType::Text);
        brand.is_required = true;
        let fields = vec![brand];
        let mut state = FormState::from_fields(&fields, FormValues::new());
        state.validate(&fields);

        let groups = render_form(&fields, &state);
        assert_eq!(
            groups[0].controls[0].error.as_deref(),
            Some("brand is required")
        );
        assert_eq!(groups[0].controls[0].value, FormValue::Null);
    }

    #[test]
    fn test_multiselect_renders_checkbox_group() {
        let colors = field("colors", InputType::Multiselect);
        let groups = render_form(&[colors], &FormState::default());
        let control = &groups[0].controls[0];
        assert_eq!(control.widget, "checkbox_group");
        assert!(control.multiple);
    }
}
