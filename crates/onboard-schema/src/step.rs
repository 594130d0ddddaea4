//! Step descriptors
//!
//! Steps are plain data records, not trait objects: an ordered array of
//! descriptors fully determines a wizard. The renderer is an opaque id the
//! host UI resolves; the core never renders.

use crate::condition::Condition;
use crate::field::FieldName;
use crate::value::EntityDraft;

/// Hook run when the wizard enters a step, used to pre-populate derived
/// collections (e.g. seeding block entries from a block count). Hooks must
/// be idempotent: they fill gaps and never overwrite user input.
pub type SeedFn = fn(&mut EntityDraft);

/// Descriptor of one wizard step
#[derive(Debug, Clone)]
pub struct StepSpec {
    /// Step title shown in the progress header
    pub title: &'static str,
    /// Renderer id resolved by the host UI
    pub renderer: &'static str,
    /// The exact subset of catalog fields this step collects and validates
    pub fields: Vec<FieldName>,
    /// Presence condition; a `None` step is always part of the flow
    pub presence: Option<Condition>,
    /// Entry hook
    pub seed: Option<SeedFn>,
}

impl StepSpec {
    /// Create a step collecting the given fields
    #[must_use]
    pub fn new(title: &'static str, renderer: &'static str, fields: Vec<FieldName>) -> Self {
        Self {
            title,
            renderer,
            fields,
            presence: None,
            seed: None,
        }
    }

    /// Restrict the step to drafts satisfying `condition`
    #[inline]
    #[must_use]
    pub fn visible_when(mut self, condition: Condition) -> Self {
        self.presence = Some(condition);
        self
    }

    /// Attach an entry hook
    #[inline]
    #[must_use]
    pub fn seeded_by(mut self, seed: SeedFn) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Whether the step is part of the flow for the given draft
    #[must_use]
    pub fn is_visible(&self, draft: &EntityDraft) -> bool {
        self.presence.as_ref().map_or(true, |c| c.holds(draft))
    }

    /// Whether the step collects the given field
    #[inline]
    #[must_use]
    pub fn collects(&self, field: FieldName) -> bool {
        self.fields.contains(&field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldValue;

    const HAS_BLOCKS: FieldName = FieldName::new("has_blocks");
    const BLOCKS: FieldName = FieldName::new("blocks");

    #[test]
    fn step_visible_without_presence() {
        let step = StepSpec::new("Basics", "basics", vec![]);
        assert!(step.is_visible(&EntityDraft::new()));
    }

    #[test]
    fn step_presence_gates_visibility() {
        let step = StepSpec::new("Structural Details", "blocks", vec![BLOCKS])
            .visible_when(Condition::FlagSet(HAS_BLOCKS));

        let mut draft = EntityDraft::new();
        assert!(!step.is_visible(&draft));
        draft.set(HAS_BLOCKS, FieldValue::Flag(true));
        assert!(step.is_visible(&draft));
    }

    #[test]
    fn step_collects() {
        let step = StepSpec::new("Structural Details", "blocks", vec![BLOCKS]);
        assert!(step.collects(BLOCKS));
        assert!(!step.collects(HAS_BLOCKS));
    }
}
