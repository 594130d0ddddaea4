//! Conditional visibility and requirement predicates
//!
//! Conditions are pure functions over the current draft. "Which fields
//! matter now" stays testable without any rendering involved.

use crate::field::FieldName;
use crate::value::EntityDraft;

/// A predicate over the current draft state
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// The named flag field is set to `true`
    FlagSet(FieldName),
    /// The named text/choice field equals the given value
    Equals(FieldName, &'static str),
    /// The named field holds a non-empty value
    Present(FieldName),
    /// Every inner condition holds
    All(Vec<Condition>),
    /// At least one inner condition holds
    Any(Vec<Condition>),
}

impl Condition {
    /// Evaluate the condition against a draft
    #[must_use]
    pub fn holds(&self, draft: &EntityDraft) -> bool {
        match self {
            Self::FlagSet(name) => draft.flag(*name),
            Self::Equals(name, expected) => {
                let actual = draft.choice(*name).or_else(|| draft.text(*name));
                actual == Some(*expected)
            }
            Self::Present(name) => draft.is_filled(*name),
            Self::All(inner) => inner.iter().all(|c| c.holds(draft)),
            Self::Any(inner) => inner.iter().any(|c| c.holds(draft)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldValue;

    const KIND: FieldName = FieldName::new("structure_type");
    const HAS_BLOCKS: FieldName = FieldName::new("has_blocks");

    fn estate_draft() -> EntityDraft {
        let mut draft = EntityDraft::new();
        draft.set(KIND, FieldValue::Choice("estate".into()));
        draft.set(HAS_BLOCKS, FieldValue::Flag(true));
        draft
    }

    #[test]
    fn equals_matches_choice_and_text() {
        let draft = estate_draft();
        assert!(Condition::Equals(KIND, "estate").holds(&draft));
        assert!(!Condition::Equals(KIND, "single_unit").holds(&draft));

        let mut text_draft = EntityDraft::new();
        text_draft.set(KIND, FieldValue::Text("estate".into()));
        assert!(Condition::Equals(KIND, "estate").holds(&text_draft));
    }

    #[test]
    fn flag_set_on_missing_field_is_false() {
        let draft = EntityDraft::new();
        assert!(!Condition::FlagSet(HAS_BLOCKS).holds(&draft));
    }

    #[test]
    fn all_and_any_compose() {
        let draft = estate_draft();
        let multi_block = Condition::All(vec![
            Condition::Equals(KIND, "estate"),
            Condition::FlagSet(HAS_BLOCKS),
        ]);
        assert!(multi_block.holds(&draft));

        let either = Condition::Any(vec![
            Condition::Equals(KIND, "single_unit"),
            Condition::FlagSet(HAS_BLOCKS),
        ]);
        assert!(either.holds(&draft));
    }

    #[test]
    fn present_respects_emptiness() {
        let mut draft = EntityDraft::new();
        assert!(!Condition::Present(KIND).holds(&draft));
        draft.set(KIND, FieldValue::Text("   ".into()));
        assert!(!Condition::Present(KIND).holds(&draft));
        draft.set(KIND, FieldValue::Text("estate".into()));
        assert!(Condition::Present(KIND).holds(&draft));
    }
}
