//! HTTP route handlers.

pub mod admin_fields;
pub mod field_templates;
pub mod forms;
pub mod health;
pub mod offerings;
pub mod uploads;
