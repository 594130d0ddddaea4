//! Field validation
//!
//! Validation is subset-scoped: `advance()` checks only the active step's
//! fields, `submit()` checks the union of every step's fields. A failure
//! never reports errors for fields outside the requested subset.

use crate::error::FieldError;
use crate::field::{FieldKind, FieldName, FieldSpec, Pattern, Requirement};
use crate::value::{EntityDraft, FieldValue};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 \-]{6,19}$").expect("phone pattern compiles"));

impl Pattern {
    fn regex(self) -> &'static Regex {
        match self {
            Self::Email => &EMAIL_RE,
            Self::Phone => &PHONE_RE,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::Email => "is not a valid email address",
            Self::Phone => "is not a valid phone number",
        }
    }
}

/// Validate the given subset of catalog fields against the draft
///
/// Constraint order per field: kind conformance, requirement, then
/// kind-specific constraints (bounds, choice membership, pattern). Only one
/// error is reported per field so the user sees the most actionable
/// message first.
#[must_use]
pub fn validate_subset(
    catalog: &[FieldSpec],
    draft: &EntityDraft,
    subset: &[FieldName],
) -> Vec<FieldError> {
    subset
        .iter()
        .filter_map(|name| {
            let spec = catalog.iter().find(|s| s.name == *name)?;
            validate_field(spec, draft)
        })
        .collect()
}

fn validate_field(spec: &FieldSpec, draft: &EntityDraft) -> Option<FieldError> {
    let value = draft.get(spec.name);

    if let Some(value) = value {
        if let Some(err) = check_kind(spec, value) {
            return Some(err);
        }
    }

    let filled = value.is_some_and(|v| !v.is_empty());
    if !filled {
        return is_required(spec, draft)
            .then(|| FieldError::new(spec.name, format!("{} is required", spec.label)));
    }

    match (spec.kind, value?) {
        (FieldKind::Number, FieldValue::Number(n)) => check_bounds(spec, *n),
        (FieldKind::Choice(options), FieldValue::Choice(selected)) => {
            (!options.contains(&selected.as_str())).then(|| {
                FieldError::new(
                    spec.name,
                    format!("'{selected}' is not an option for {}", spec.label),
                )
            })
        }
        (FieldKind::Text, FieldValue::Text(text)) => {
            let pattern = spec.pattern?;
            (!pattern.regex().is_match(text.trim()))
                .then(|| FieldError::new(spec.name, format!("{} {}", spec.label, pattern.describe())))
        }
        _ => None,
    }
}

fn is_required(spec: &FieldSpec, draft: &EntityDraft) -> bool {
    match &spec.requirement {
        Requirement::Always => true,
        Requirement::Optional => false,
        Requirement::When(condition) => condition.holds(draft),
    }
}

fn check_kind(spec: &FieldSpec, value: &FieldValue) -> Option<FieldError> {
    let expected = match spec.kind {
        FieldKind::Text => matches!(value, FieldValue::Text(_)),
        FieldKind::Number => matches!(value, FieldValue::Number(_)),
        FieldKind::Flag => matches!(value, FieldValue::Flag(_)),
        FieldKind::Choice(_) => matches!(value, FieldValue::Choice(_)),
        FieldKind::Items => matches!(value, FieldValue::Items(_)),
        FieldKind::Attachment => matches!(value, FieldValue::Attachment(_)),
    };

    (!expected).then(|| {
        FieldError::new(
            spec.name,
            format!("{} has the wrong kind ({})", spec.label, value.kind_name()),
        )
    })
}

fn check_bounds(spec: &FieldSpec, n: f64) -> Option<FieldError> {
    if let Some(min) = spec.min {
        if n < min {
            return Some(FieldError::new(
                spec.name,
                format!("{} must be at least {min}", spec.label),
            ));
        }
    }
    if let Some(max) = spec.max {
        if n > max {
            return Some(FieldError::new(
                spec.name,
                format!("{} must be at most {max}", spec.label),
            ));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use pretty_assertions::assert_eq;

    const NAME: FieldName = FieldName::new("name");
    const EMAIL: FieldName = FieldName::new("email");
    const HAS_BLOCKS: FieldName = FieldName::new("has_blocks");
    const BLOCK_COUNT: FieldName = FieldName::new("block_count");
    const KIND: FieldName = FieldName::new("structure_type");

    fn catalog() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text(NAME, "Name").required(),
            FieldSpec::text(EMAIL, "Email").pattern(Pattern::Email),
            FieldSpec::flag(HAS_BLOCKS, "Has blocks"),
            FieldSpec::number(BLOCK_COUNT, "Number of blocks")
                .required_when(Condition::FlagSet(HAS_BLOCKS))
                .min(1.0)
                .max(64.0),
            FieldSpec::choice(KIND, "Structure type", &["single_unit", "estate"]).required(),
        ]
    }

    #[test]
    fn missing_required_field_reported() {
        let errors = validate_subset(&catalog(), &EntityDraft::new(), &[NAME]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, NAME);
        assert!(errors[0].message.contains("required"));
    }

    #[test]
    fn errors_scoped_to_subset() {
        // Draft is completely empty; only the requested subset may error.
        let errors = validate_subset(&catalog(), &EntityDraft::new(), &[EMAIL, HAS_BLOCKS]);
        assert!(errors.is_empty());
    }

    #[test]
    fn conditional_requirement_follows_flag() {
        let mut draft = EntityDraft::new();
        let errors = validate_subset(&catalog(), &draft, &[BLOCK_COUNT]);
        assert!(errors.is_empty());

        draft.set(HAS_BLOCKS, FieldValue::Flag(true));
        let errors = validate_subset(&catalog(), &draft, &[BLOCK_COUNT]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, BLOCK_COUNT);
    }

    #[test]
    fn bounds_checked() {
        let mut draft = EntityDraft::new();
        draft.set(HAS_BLOCKS, FieldValue::Flag(true));
        draft.set(BLOCK_COUNT, FieldValue::Number(0.0));

        let errors = validate_subset(&catalog(), &draft, &[BLOCK_COUNT]);
        assert!(errors[0].message.contains("at least 1"));
    }

    #[test]
    fn choice_membership_checked() {
        let mut draft = EntityDraft::new();
        draft.set(KIND, FieldValue::Choice("castle".into()));

        let errors = validate_subset(&catalog(), &draft, &[KIND]);
        assert!(errors[0].message.contains("not an option"));
    }

    #[test]
    fn pattern_checked_only_when_filled() {
        let mut draft = EntityDraft::new();
        let errors = validate_subset(&catalog(), &draft, &[EMAIL]);
        assert!(errors.is_empty());

        draft.set(EMAIL, FieldValue::Text("not-an-email".into()));
        let errors = validate_subset(&catalog(), &draft, &[EMAIL]);
        assert!(errors[0].message.contains("email"));

        draft.set(EMAIL, FieldValue::Text("ada@example.com".into()));
        assert!(validate_subset(&catalog(), &draft, &[EMAIL]).is_empty());
    }

    #[test]
    fn wrong_kind_reported() {
        let mut draft = EntityDraft::new();
        draft.set(NAME, FieldValue::Number(7.0));

        let errors = validate_subset(&catalog(), &draft, &[NAME]);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("wrong kind"));
    }
}
