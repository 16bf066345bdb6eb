//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod field_definition;
pub mod field_template;
pub mod offering;
pub mod scope;

pub use field_definition::*;
pub use field_template::*;
pub use offering::*;
pub use scope::*;
