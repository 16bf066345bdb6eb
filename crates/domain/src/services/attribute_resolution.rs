//! Attribute resolution service for scoped product forms.
//!
//! Resolves the effective form fields for a (service type, category,
//! subcategory) scope from four definition tiers:
//! 1. Built-in default fields
//! 2. Service type fields
//! 3. Category fields
//! 4. Subcategory fields
//!
//! A narrower tier replaces a broader definition of the same name, except
//! that mandatory fields can be neither hidden nor overridden.

use std::collections::HashMap;

use crate::models::field_definition::{FieldDefinition, ScopeTier};
use crate::models::resolved_field::{ResolvedFormField, DEFAULT_PROVENANCE};
use crate::models::scope::FormScope;

/// Definitions of one category or subcategory tier, with the scope id
/// recorded as provenance.
#[derive(Debug, Clone, Default)]
pub struct TierFields {
    pub scope_id: String,
    pub fields: Vec<FieldDefinition>,
}

/// Input for attribute resolution. Each tier's fields are in insertion order.
#[derive(Debug, Clone, Default)]
pub struct AttributeResolutionInput {
    /// Global default fields
    pub defaults: Vec<ResolvedFormField>,
    /// Service type definitions (no category)
    pub service_type: Vec<FieldDefinition>,
    /// Category definitions
    pub category: Option<TierFields>,
    /// Subcategory definitions
    pub subcategory: Option<TierFields>,
}

impl AttributeResolutionInput {
    /// Splits definitions loaded for `scope` into their tiers, keeping the
    /// insertion order within each tier. Definitions of other categories or
    /// subcategories are dropped.
    pub fn from_definitions(
        scope: &FormScope,
        defaults: Vec<ResolvedFormField>,
        definitions: Vec<FieldDefinition>,
    ) -> Self {
        let mut category = TierFields {
            scope_id: scope.category_id.clone(),
            fields: Vec::new(),
        };
        let mut subcategory = scope.subcategory_id.as_ref().map(|id| TierFields {
            scope_id: id.clone(),
            fields: Vec::new(),
        });
        let mut service_type = Vec::new();

        for definition in definitions {
            if definition.service_type_id != scope.service_type_id {
                continue;
            }
            match definition.tier() {
                ScopeTier::ServiceType => service_type.push(definition),
                ScopeTier::Category
                    if definition.category_id.as_deref() == Some(scope.category_id.as_str()) =>
                {
                    category.fields.push(definition)
                }
                ScopeTier::Subcategory => {
                    if let Some(tier) = subcategory.as_mut().filter(|t| {
                        definition.category_id.as_deref() == Some(scope.category_id.as_str())
                            && definition.subcategory_id.as_deref() == Some(t.scope_id.as_str())
                    }) {
                        tier.fields.push(definition);
                    }
                }
                _ => {}
            }
        }

        Self {
            defaults,
            service_type,
            category: Some(category),
            subcategory,
        }
    }
}

/// Merged form fields for a scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedForm {
    /// Fields ordered by ascending display order, ties by insertion order
    pub fields: Vec<ResolvedFormField>,
    /// Whether any store tier contributed a definition
    pub configured: bool,
}

impl ResolvedForm {
    pub fn get(&self, name: &str) -> Option<&ResolvedFormField> {
        self.fields.iter().find(|f| f.attribute_name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Accumulates tiers keyed by field name while remembering the slot each
/// name was first inserted at.
#[derive(Default)]
struct MergedFields {
    fields: Vec<ResolvedFormField>,
    slots: HashMap<String, usize>,
}

impl MergedFields {
    fn apply(&mut self, candidate: ResolvedFormField, inherit_flags: bool) {
        let Some(&slot) = self.slots.get(&candidate.attribute_name) else {
            self.slots
                .insert(candidate.attribute_name.clone(), self.fields.len());
            self.fields.push(candidate);
            return;
        };

        let existing = &self.fields[slot];
        if existing.is_mandatory {
            tracing::debug!(
                field = %candidate.attribute_name,
                discarded_from = %candidate.inherited_from,
                "Mandatory field cannot be overridden; narrower definition discarded"
            );
            return;
        }

        let mut winner = candidate;
        if inherit_flags {
            winner.is_system_field |= existing.is_system_field;
            winner.is_mandatory |= existing.is_mandatory;
            winner.inherited_from = existing.inherited_from.clone();
        }
        self.fields[slot] = winner;
    }

    fn into_sorted(self) -> Vec<ResolvedFormField> {
        let mut fields = self.fields;
        for field in fields.iter_mut().filter(|f| f.is_mandatory) {
            field.is_visible = true;
        }
        // stable: equal display orders keep insertion order
        fields.sort_by_key(|f| f.display_order);
        fields
    }
}

/// Resolve the effective form fields for a scope.
///
/// Precedence (lowest to highest): defaults, service type, category, subcategory.
pub fn resolve_form_fields(input: AttributeResolutionInput) -> ResolvedForm {
    let configured = !input.service_type.is_empty()
        || input.category.as_ref().is_some_and(|t| !t.fields.is_empty())
        || input
            .subcategory
            .as_ref()
            .is_some_and(|t| !t.fields.is_empty());

    let mut merged = MergedFields::default();

    // 1. Built-in defaults
    for field in input.defaults {
        merged.apply(field, false);
    }

    // 2. Service type tier
    for definition in &input.service_type {
        merged.apply(
            ResolvedFormField::from_definition(definition, DEFAULT_PROVENANCE),
            definition.inherit_flags,
        );
    }

    // 3. Category tier, then 4. subcategory tier
    for tier in [input.category, input.subcategory].into_iter().flatten() {
        for definition in &tier.fields {
            merged.apply(
                ResolvedFormField::from_definition(definition, &tier.scope_id),
                definition.inherit_flags,
            );
        }
    }

    ResolvedForm {
        fields: merged.into_sorted(),
        configured,
    }
}
