//! Schema-layer errors
//!
//! [`SchemaError`] covers wizard configuration faults, surfaced when a
//! registry is built, never mid-session. [`FieldError`] is the recoverable
//! per-field validation failure surfaced inline to the user.

use crate::field::FieldName;
use crate::registry::WizardKind;
use serde::Serialize;

/// Wizard configuration fault
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A wizard kind has no registered steps
    #[error("wizard {0:?} has no steps configured")]
    NoSteps(WizardKind),

    /// A step references a field missing from the catalog
    #[error("step '{step}' references undeclared field '{field}'")]
    UnknownField {
        /// Step title
        step: &'static str,
        /// Offending field name
        field: FieldName,
    },

    /// The catalog declares the same field twice
    #[error("field '{0}' declared more than once")]
    DuplicateField(FieldName),
}

/// One field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// The offending field
    pub field: FieldName,
    /// Human-readable message, scoped to this field
    pub message: String,
}

impl FieldError {
    /// Create a field error
    #[inline]
    #[must_use]
    pub fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_display() {
        let err = SchemaError::UnknownField {
            step: "Basics",
            field: FieldName::new("bogus"),
        };
        assert!(err.to_string().contains("undeclared field 'bogus'"));
    }

    #[test]
    fn field_error_display() {
        let err = FieldError::new(FieldName::new("email"), "is not a valid email address");
        assert_eq!(err.to_string(), "email: is not a valid email address");
    }
}
