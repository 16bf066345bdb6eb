//! Shared utilities and common types for the attribute forms backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Machine-name and value-shape validation (snake_case keys, email, URL, dates)
//! - Helpers for building `validator` errors with messages

pub mod validation;
