//! Wizard session
//!
//! A [`WizardSession`] owns the accumulating draft and the step cursor for
//! one mounted wizard. It is created when the wizard mounts, mutated by
//! field edits and step transitions on a single logical thread of control,
//! and destroyed on unmount; nothing here persists across reloads.

use crate::error::WizardError;
use crate::phase::{validate_transition, PhaseKind, WizardPhase};
use onboard_schema::{
    EntityDraft, FieldName, FieldValue, SchemaError, StepRegistry, StepSpec, WizardKind,
    WizardMode,
};

/// One mounted onboarding wizard
#[derive(Debug, Clone)]
pub struct WizardSession {
    registry: StepRegistry,
    draft: EntityDraft,
    /// Index into the currently visible step list
    step: usize,
    phase: WizardPhase,
    last_failure: Option<String>,
}

impl WizardSession {
    /// Start a create-mode wizard with an empty draft
    ///
    /// # Errors
    /// Propagates [`SchemaError`] configuration faults from registry
    /// construction.
    pub fn create(kind: WizardKind) -> Result<Self, SchemaError> {
        Self::with_draft(kind, WizardMode::Create, EntityDraft::new())
    }

    /// Start an edit-mode wizard pre-populated with an existing entity
    ///
    /// # Errors
    /// Propagates [`SchemaError`] configuration faults from registry
    /// construction.
    pub fn edit(kind: WizardKind, existing: EntityDraft) -> Result<Self, SchemaError> {
        Self::with_draft(kind, WizardMode::Edit, existing)
    }

    fn with_draft(
        kind: WizardKind,
        mode: WizardMode,
        draft: EntityDraft,
    ) -> Result<Self, SchemaError> {
        let registry = StepRegistry::for_wizard(kind, mode)?;
        let mut session = Self {
            registry,
            draft,
            step: 0,
            phase: WizardPhase::Editing,
            last_failure: None,
        };
        session.run_seed();
        tracing::debug!(?kind, ?mode, "wizard session mounted");
        Ok(session)
    }

    /// The session's registry
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    /// Wizard kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> WizardKind {
        self.registry.kind()
    }

    /// Wizard mode
    #[inline]
    #[must_use]
    pub fn mode(&self) -> WizardMode {
        self.registry.mode()
    }

    /// The accumulating draft
    #[inline]
    #[must_use]
    pub fn draft(&self) -> &EntityDraft {
        &self.draft
    }

    /// Current phase
    #[inline]
    #[must_use]
    pub fn phase(&self) -> &WizardPhase {
        &self.phase
    }

    /// Message of the most recent failed submission, if any
    #[must_use]
    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    /// Index of the current step within the visible step list
    #[must_use]
    pub fn step_index(&self) -> usize {
        self.clamped(&self.visible_indices())
    }

    /// The current step descriptor
    #[must_use]
    pub fn current_step(&self) -> &StepSpec {
        let visible = self.visible_indices();
        &self.registry.steps()[visible[self.clamped(&visible)]]
    }

    /// Whether the session sits on the final (review) step
    #[must_use]
    pub fn is_last_step(&self) -> bool {
        let visible = self.visible_indices();
        self.clamped(&visible) + 1 == visible.len()
    }

    /// Set a draft field from the active step's renderer
    ///
    /// # Errors
    /// Rejected while a submission is in flight or after success.
    pub fn set_field(&mut self, name: FieldName, value: FieldValue) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.draft.set(name, value);
        Ok(())
    }

    /// Clear a draft field
    ///
    /// # Errors
    /// Rejected while a submission is in flight or after success.
    pub fn remove_field(&mut self, name: FieldName) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.draft.remove(name);
        Ok(())
    }

    /// Move to the next step
    ///
    /// Validates only the current step's field subset; errors never refer
    /// to fields of other steps. On success the next visible step's seed
    /// hook runs before control returns.
    ///
    /// # Errors
    /// [`WizardError::Validation`] with the offending fields,
    /// [`WizardError::AtLastStep`], or a phase error.
    pub fn advance(&mut self) -> Result<&StepSpec, WizardError> {
        let visible = self.visible_indices();
        let current = self.clamped(&visible);
        if current + 1 >= visible.len() {
            return Err(WizardError::AtLastStep);
        }
        self.ensure_editable()?;

        let step = &self.registry.steps()[visible[current]];
        let errors = self.registry.validate_step(&self.draft, step);
        if !errors.is_empty() {
            tracing::debug!(step = step.title, count = errors.len(), "advance blocked");
            return Err(WizardError::Validation {
                step: step.title,
                errors,
            });
        }

        self.step = current + 1;
        self.run_seed();
        Ok(self.current_step())
    }

    /// Move to the previous step
    ///
    /// Never validates: the user must always be able to go back and fix an
    /// earlier step.
    ///
    /// # Errors
    /// [`WizardError::AtFirstStep`] or a phase error.
    pub fn retreat(&mut self) -> Result<&StepSpec, WizardError> {
        let visible = self.visible_indices();
        let current = self.clamped(&visible);
        if current == 0 {
            return Err(WizardError::AtFirstStep);
        }
        self.ensure_editable()?;

        self.step = current - 1;
        Ok(self.current_step())
    }

    /// Validate the complete schema and enter the `Submitting` phase
    ///
    /// Returns a snapshot of the draft for the submission orchestrator.
    /// While `Submitting`, every editing operation is rejected.
    ///
    /// # Errors
    /// [`WizardError::NotAtFinalStep`], [`WizardError::Validation`] over
    /// the union of all steps' fields, or a phase error.
    pub fn begin_submit(&mut self) -> Result<EntityDraft, WizardError> {
        validate_transition(self.phase.kind(), PhaseKind::Submitting)?;
        if !self.is_last_step() {
            return Err(WizardError::NotAtFinalStep);
        }

        let errors = self.registry.validate_all(&self.draft);
        if !errors.is_empty() {
            tracing::debug!(count = errors.len(), "submit blocked by validation");
            return Err(WizardError::Validation {
                step: self.current_step().title,
                errors,
            });
        }

        self.phase = WizardPhase::Submitting;
        tracing::info!(kind = ?self.kind(), "submission started");
        Ok(self.draft.clone())
    }

    /// Resolve an in-flight submission as successful
    ///
    /// # Errors
    /// Phase error unless the session is `Submitting`.
    pub fn succeed_submit(&mut self) -> Result<(), WizardError> {
        validate_transition(self.phase.kind(), PhaseKind::SubmitSucceeded)?;
        self.phase = WizardPhase::SubmitSucceeded;
        self.last_failure = None;
        tracing::info!(kind = ?self.kind(), "submission succeeded");
        Ok(())
    }

    /// Resolve an in-flight submission as failed
    ///
    /// The step cursor and draft are left untouched so the user can retry
    /// without re-entering data.
    ///
    /// # Errors
    /// Phase error unless the session is `Submitting`.
    pub fn fail_submit(&mut self, message: impl Into<String>) -> Result<(), WizardError> {
        validate_transition(self.phase.kind(), PhaseKind::SubmitFailed)?;
        let message = message.into();
        tracing::warn!(kind = ?self.kind(), %message, "submission failed");
        self.last_failure = Some(message.clone());
        self.phase = WizardPhase::SubmitFailed(message);
        Ok(())
    }

    /// Indices of visible steps within the full step list
    fn visible_indices(&self) -> Vec<usize> {
        self.registry
            .steps()
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_visible(&self.draft))
            .map(|(i, _)| i)
            .collect()
    }

    /// Clamp the cursor: edits may hide the step it pointed at
    fn clamped(&self, visible: &[usize]) -> usize {
        self.step.min(visible.len().saturating_sub(1))
    }

    fn run_seed(&mut self) {
        let visible = self.visible_indices();
        let seed = self.registry.steps()[visible[self.clamped(&visible)]].seed;
        if let Some(seed) = seed {
            seed(&mut self.draft);
        }
    }

    fn ensure_editable(&mut self) -> Result<(), WizardError> {
        match &self.phase {
            WizardPhase::Editing => Ok(()),
            WizardPhase::SubmitFailed(_) => {
                validate_transition(PhaseKind::SubmitFailed, PhaseKind::Editing)?;
                self.phase = WizardPhase::Editing;
                Ok(())
            }
            WizardPhase::Submitting => Err(WizardError::SubmissionInFlight),
            WizardPhase::SubmitSucceeded => Err(WizardError::IllegalTransition {
                from: PhaseKind::SubmitSucceeded,
                to: PhaseKind::Editing,
            }),
        }
    }
}
