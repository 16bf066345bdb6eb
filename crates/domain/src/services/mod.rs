//! Domain services for attribute forms.

pub mod attribute_resolution;
pub mod default_fields;
pub mod definition_validation;
pub mod form;
pub mod payload;

pub use attribute_resolution::{resolve_form_fields, AttributeResolutionInput, ResolvedForm, TierFields};
pub use default_fields::{default_form_fields, STANDARD_COLUMNS};
pub use definition_validation::validate_definition;
pub use form::{
    prepare_submission, render_form, validate_field, validate_form, FormState,
    FormValidationErrors, RenderStrategy,
};
pub use payload::{partition, KnownKeys, PartitionedPayload};
