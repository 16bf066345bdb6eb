//! Application services behind the HTTP handlers.

pub mod upload;

pub use upload::{LocalObjectStore, ObjectStore, UploadError, UploadPolicy};
