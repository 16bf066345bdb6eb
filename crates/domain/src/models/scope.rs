//! Service type, category and subcategory scopes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Top-level vertical such as cleaning or grocery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceType {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub service_type_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    pub category_id: String,
    pub name: String,
}

/// Scope a form is resolved for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct FormScope {
    #[validate(length(min = 1, max = 100, message = "Service type is required"))]
    pub service_type_id: String,
    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category_id: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Subcategory must not be empty"))]
    pub subcategory_id: Option<String>,
}

impl FormScope {
    pub fn new(
        service_type_id: impl Into<String>,
        category_id: impl Into<String>,
        subcategory_id: Option<String>,
    ) -> Self {
        Self {
            service_type_id: service_type_id.into(),
            category_id: category_id.into(),
            subcategory_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_scope_validation() {
        assert!(FormScope::new("cleaning", "deep-clean", None).validate().is_ok());
        assert!(FormScope::new("", "deep-clean", None).validate().is_err());
        assert!(FormScope::new("cleaning", "deep-clean", Some(String::new()))
            .validate()
            .is_err());
    }
}
