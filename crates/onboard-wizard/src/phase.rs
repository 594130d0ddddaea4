//! Wizard phase machine
//!
//! Phases: `Editing` -> `Submitting` -> `SubmitSucceeded` | `SubmitFailed`.
//! `SubmitFailed` keeps the session alive on the final step: the user may
//! edit (back to `Editing`) or retry (back to `Submitting`).
//! `SubmitSucceeded` is terminal.

use crate::error::WizardError;

/// Current phase of a wizard session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardPhase {
    /// The user is editing the draft step by step
    Editing,
    /// A submission is in flight; all editing is disabled
    Submitting,
    /// The submission failed at the parent level; the draft is intact
    SubmitFailed(String),
    /// The submission persisted the parent entity; the session is done
    SubmitSucceeded,
}

impl WizardPhase {
    /// The payload-free kind of this phase
    #[inline]
    #[must_use]
    pub fn kind(&self) -> PhaseKind {
        match self {
            Self::Editing => PhaseKind::Editing,
            Self::Submitting => PhaseKind::Submitting,
            Self::SubmitFailed(_) => PhaseKind::SubmitFailed,
            Self::SubmitSucceeded => PhaseKind::SubmitSucceeded,
        }
    }

    /// Whether the draft may be edited in this phase
    #[inline]
    #[must_use]
    pub fn allows_editing(&self) -> bool {
        matches!(self, Self::Editing | Self::SubmitFailed(_))
    }
}

/// Payload-free phase discriminant used by the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    Editing,
    Submitting,
    SubmitFailed,
    SubmitSucceeded,
}

/// Phases reachable from `from`
#[must_use]
pub fn allowed_transitions(from: PhaseKind) -> Vec<PhaseKind> {
    use PhaseKind::{Editing, SubmitFailed, SubmitSucceeded, Submitting};
    match from {
        Editing => vec![Submitting],
        Submitting => vec![SubmitFailed, SubmitSucceeded],
        SubmitFailed => vec![Editing, Submitting],
        SubmitSucceeded => vec![],
    }
}

/// Validate a phase transition
///
/// # Errors
/// `WizardError::IllegalTransition` when the transition table does not
/// allow `from -> to`.
pub fn validate_transition(from: PhaseKind, to: PhaseKind) -> Result<(), WizardError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(WizardError::IllegalTransition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_only_reaches_submitting() {
        assert!(validate_transition(PhaseKind::Editing, PhaseKind::Submitting).is_ok());
        assert!(validate_transition(PhaseKind::Editing, PhaseKind::SubmitSucceeded).is_err());
        assert!(validate_transition(PhaseKind::Editing, PhaseKind::SubmitFailed).is_err());
    }

    #[test]
    fn submitting_resolves_either_way() {
        assert!(validate_transition(PhaseKind::Submitting, PhaseKind::SubmitFailed).is_ok());
        assert!(validate_transition(PhaseKind::Submitting, PhaseKind::SubmitSucceeded).is_ok());
        assert!(validate_transition(PhaseKind::Submitting, PhaseKind::Editing).is_err());
    }

    #[test]
    fn failed_submission_can_retry_or_edit() {
        assert!(validate_transition(PhaseKind::SubmitFailed, PhaseKind::Submitting).is_ok());
        assert!(validate_transition(PhaseKind::SubmitFailed, PhaseKind::Editing).is_ok());
    }

    #[test]
    fn success_is_terminal() {
        assert!(allowed_transitions(PhaseKind::SubmitSucceeded).is_empty());
    }

    #[test]
    fn editing_allowed_while_failed() {
        assert!(WizardPhase::Editing.allows_editing());
        assert!(WizardPhase::SubmitFailed("units failed".into()).allows_editing());
        assert!(!WizardPhase::Submitting.allows_editing());
        assert!(!WizardPhase::SubmitSucceeded.allows_editing());
    }
}
