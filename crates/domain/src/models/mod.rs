//! Domain models for attribute forms.

pub mod field_definition;
pub mod field_template;
pub mod form;
pub mod offering;
pub mod resolved_field;
pub mod scope;

pub use field_definition::{
    DataType, FieldDefinition, FieldDefinitionDraft, FieldDefinitionRequest, FieldListResponse,
    FieldMutationResponse, FieldOption, FieldType, InputType, ListFieldsQuery, ScopeTier,
    ValidationRules,
};
pub use field_template::{
    ApplyTemplateRequest, ApplyTemplateResponse, FieldTemplate, ListTemplatesResponse,
};
pub use form::{
    Control, ControlConstraints, ControlGroup, FormValue, FormValues, RenderFormRequest,
    RenderFormResponse, UploadedFile, ValidateFormRequest, ValidateFormResponse,
};
pub use offering::{Offering, OfferingColumns, SubmitOfferingRequest};
pub use resolved_field::{ResolveFormQuery, ResolveFormResponse, ResolvedFormField};
pub use scope::{Category, FormScope, ServiceType, Subcategory};
