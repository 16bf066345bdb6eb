//! Domain layer for the attribute forms backend.
//!
//! This crate contains:
//! - Domain models (field definitions, resolved fields, templates, offerings)
//! - Pure business services: the attribute inheritance merge, definition
//!   validation, render strategies, form state and payload partitioning

pub mod models;
pub mod services;
