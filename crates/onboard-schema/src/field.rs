//! Field catalog types
//!
//! Every wizard owns a flat catalog of [`FieldSpec`]s. Steps reference
//! catalog fields by name; validation reads the declared kind and
//! constraints. Constraints are enforced at validation time, not at
//! assignment time, so a draft may hold ill-typed values between edits.

use crate::condition::Condition;
use serde::Serialize;

/// Name of an entity field, unique within one wizard's catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FieldName(pub &'static str);

impl FieldName {
    /// Create a field name
    #[inline]
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The raw name
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Declared value kind of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free-form text
    Text,
    /// Numeric value (counts, amounts)
    Number,
    /// Boolean toggle
    Flag,
    /// One of a fixed set of options
    Choice(&'static [&'static str]),
    /// Nested collection of child drafts (units, contacts, documents)
    Items,
    /// Singular binary asset (primary image, tenant photo)
    Attachment,
}

/// Whether a field must be filled before submission
#[derive(Debug, Clone, PartialEq)]
pub enum Requirement {
    /// Must always be present and non-empty
    Always,
    /// May be left empty
    Optional,
    /// Required only while the condition holds on the current draft
    When(Condition),
}

/// Named text pattern for format constraints
///
/// Patterns are a closed set so the compiled regexes live in one place
/// (see `validate`), not scattered across field declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// RFC-ish email shape
    Email,
    /// International phone number, digits with optional leading `+`
    Phone,
}

/// Declaration of a single entity field
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Field name, unique within the catalog
    pub name: FieldName,
    /// Human-readable label used in error messages
    pub label: &'static str,
    /// Declared value kind
    pub kind: FieldKind,
    /// Requirement policy
    pub requirement: Requirement,
    /// Inclusive lower bound for numbers
    pub min: Option<f64>,
    /// Inclusive upper bound for numbers
    pub max: Option<f64>,
    /// Text format constraint
    pub pattern: Option<Pattern>,
}

impl FieldSpec {
    fn new(name: FieldName, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            requirement: Requirement::Optional,
            min: None,
            max: None,
            pattern: None,
        }
    }

    /// Declare a text field
    #[inline]
    #[must_use]
    pub fn text(name: FieldName, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    /// Declare a numeric field
    #[inline]
    #[must_use]
    pub fn number(name: FieldName, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    /// Declare a boolean toggle
    #[inline]
    #[must_use]
    pub fn flag(name: FieldName, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Flag)
    }

    /// Declare a fixed-options field
    #[inline]
    #[must_use]
    pub fn choice(name: FieldName, label: &'static str, options: &'static [&'static str]) -> Self {
        Self::new(name, label, FieldKind::Choice(options))
    }

    /// Declare a child-collection field
    #[inline]
    #[must_use]
    pub fn items(name: FieldName, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Items)
    }

    /// Declare a singular asset field
    #[inline]
    #[must_use]
    pub fn attachment(name: FieldName, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Attachment)
    }

    /// Mark the field as always required
    #[inline]
    #[must_use]
    pub fn required(mut self) -> Self {
        self.requirement = Requirement::Always;
        self
    }

    /// Mark the field as required only while `condition` holds
    #[inline]
    #[must_use]
    pub fn required_when(mut self, condition: Condition) -> Self {
        self.requirement = Requirement::When(condition);
        self
    }

    /// Inclusive numeric lower bound
    #[inline]
    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Inclusive numeric upper bound
    #[inline]
    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Text format constraint
    #[inline]
    #[must_use]
    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }
}
