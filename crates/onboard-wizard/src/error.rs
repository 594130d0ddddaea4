//! Wizard-layer errors

use crate::phase::PhaseKind;
use onboard_schema::{FieldError, SchemaError};

/// Errors raised by wizard session operations
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    /// Step- or entity-scoped validation failed; recoverable by the user
    #[error("invalid fields on step '{step}'")]
    Validation {
        /// Title of the step whose subset was validated
        step: &'static str,
        /// Per-field errors, scoped to the validated subset
        errors: Vec<FieldError>,
    },

    /// Transition not allowed from the current phase
    #[error("illegal wizard transition: {from:?} -> {to:?}")]
    IllegalTransition {
        /// Phase the session was in
        from: PhaseKind,
        /// Phase that was requested
        to: PhaseKind,
    },

    /// `retreat()` called on the first step
    #[error("already at the first step")]
    AtFirstStep,

    /// `advance()` called on the last step; submission is a separate operation
    #[error("already at the last step")]
    AtLastStep,

    /// `submit()` called before reaching the review step
    #[error("submission is only possible from the final step")]
    NotAtFinalStep,

    /// Draft mutation attempted while a submission is in flight
    #[error("a submission is in flight; editing is disabled")]
    SubmissionInFlight,

    /// Wizard configuration fault
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl WizardError {
    /// Whether this error is a user-recoverable validation failure
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// The per-field errors of a validation failure
    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation { errors, .. } => errors,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onboard_schema::FieldName;

    #[test]
    fn validation_error_accessors() {
        let err = WizardError::Validation {
            step: "Basics",
            errors: vec![FieldError::new(FieldName::new("name"), "Name is required")],
        };
        assert!(err.is_validation());
        assert_eq!(err.field_errors().len(), 1);
        assert!(err.to_string().contains("Basics"));
    }

    #[test]
    fn non_validation_has_no_field_errors() {
        assert!(WizardError::AtFirstStep.field_errors().is_empty());
    }
}
