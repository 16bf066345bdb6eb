//! Repository implementations for database operations.

pub mod field_definition;
pub mod field_template;
pub mod offering;
pub mod scope;

pub use field_definition::{FieldDefinitionRepository, ListFieldsFilter};
pub use field_template::FieldTemplateRepository;
pub use offering::OfferingRepository;
pub use scope::ScopeRepository;
