//! Domain error model.

use serde::Serialize;
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every store operation is a single in-memory step, so there is no partial
/// failure: an operation either fully applies or returns one of these.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Input failed one or more field constraints.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// The referenced item does not exist (anymore).
    #[error("not found")]
    NotFound,

    /// The store could not be accessed (e.g. a poisoned lock).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl DomainError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Shorthand for a validation failure on a single field.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.push(field, message);
        Self::Validation(errors)
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

/// One violated constraint on one input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Every constraint violated by a single input, in the order they were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldViolation {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    /// Reorder violations to follow `order`; unknown fields go last.
    pub fn sort_by_field_order(&mut self, order: &[&str]) {
        self.0
            .sort_by_key(|v| order.iter().position(|f| *f == v.field).unwrap_or(order.len()));
    }

    /// Names of the offending fields, in check order.
    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|v| v.field.as_str()).collect()
    }

    /// `Ok(())` when nothing was recorded, the collected errors otherwise.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl core::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", v.field, v.message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_all_violations() {
        let mut errors = ValidationErrors::new();
        errors.push("name", "must not be empty");
        errors.push("price", "must be greater than or equal to 0");

        assert_eq!(
            errors.to_string(),
            "name: must not be empty; price: must be greater than or equal to 0"
        );
        assert_eq!(errors.fields(), vec!["name", "price"]);
    }

    #[test]
    fn sorting_follows_the_given_field_order() {
        let mut errors = ValidationErrors::new();
        errors.push("price", "invalid type: string \"abc\", expected f64");
        errors.push("extra", "whatever");
        errors.push("name", "field required");

        errors.sort_by_field_order(&["name", "price"]);
        assert_eq!(errors.fields(), vec!["name", "price", "extra"]);
        assert!(errors.contains("price"));
        assert!(!errors.contains("description"));
    }

    #[test]
    fn empty_collection_is_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn serializes_as_a_plain_list() {
        let err = DomainError::invalid_field("item_id", "not a valid identifier");
        let DomainError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "field": "item_id", "message": "not a valid identifier" }])
        );
    }
}
