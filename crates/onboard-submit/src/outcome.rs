//! First-class submission outcome
//!
//! A submission never reduces to one error. The parent write and every
//! child batch report individually, so callers can distinguish full
//! success, partial success (parent saved, some children lost), and
//! outright failure, and render a summary accordingly.

use crate::error::SubmitError;
use crate::plan::CollectionName;
use crate::stores::EntityId;
use indexmap::IndexMap;

/// Per-operation results of one submission attempt
#[derive(Debug)]
pub struct PersistenceOutcome {
    /// Result of the parent upsert (and the primary upload gating it)
    pub parent: Result<EntityId, SubmitError>,
    /// Per-collection result: rows written, or the failure
    pub children: IndexMap<CollectionName, Result<usize, SubmitError>>,
}

impl PersistenceOutcome {
    /// Outcome for a submission that never got past the parent write
    #[must_use]
    pub fn fatal(error: SubmitError) -> Self {
        Self {
            parent: Err(error),
            children: IndexMap::new(),
        }
    }

    /// Whether the parent record is durable
    #[inline]
    #[must_use]
    pub fn parent_persisted(&self) -> bool {
        self.parent.is_ok()
    }

    /// Whether everything was written
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.parent.is_ok() && self.children.values().all(Result::is_ok)
    }

    /// Whether the parent is durable but at least one child batch failed
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.parent.is_ok() && self.children.values().any(|r| r.is_err())
    }

    /// Collections whose batch failed, in plan order
    #[must_use]
    pub fn failed_collections(&self) -> Vec<CollectionName> {
        self.children
            .iter()
            .filter(|(_, result)| result.is_err())
            .map(|(collection, _)| *collection)
            .collect()
    }

    /// One-line summary for the host UI
    ///
    /// `entity` is the display name of the parent ("Property", "Tenant").
    #[must_use]
    pub fn summary(&self, entity: &str) -> String {
        match &self.parent {
            Err(error) => format!("{entity} was not saved: {error}"),
            Ok(_) if self.is_success() => format!("{entity} saved."),
            Ok(_) => {
                let failed: Vec<_> = self
                    .failed_collections()
                    .iter()
                    .map(|c| c.label())
                    .collect();
                format!(
                    "{entity} saved, but failed to save {}; edit it to retry.",
                    failed.join(", ")
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn saved() -> Result<EntityId, SubmitError> {
        Ok(EntityId::new("prop-1"))
    }

    fn failed(collection: CollectionName) -> SubmitError {
        SubmitError::ChildFailed {
            collection,
            reason: "timeout".into(),
        }
    }

    #[test]
    fn full_success_summary() {
        let outcome = PersistenceOutcome {
            parent: saved(),
            children: IndexMap::from([(CollectionName::Units, Ok(4))]),
        };
        assert!(outcome.is_success());
        assert!(!outcome.is_partial());
        assert_eq!(outcome.summary("Property"), "Property saved.");
    }

    #[test]
    fn partial_success_names_failed_collections() {
        let outcome = PersistenceOutcome {
            parent: saved(),
            children: IndexMap::from([
                (CollectionName::Units, Err(failed(CollectionName::Units))),
                (CollectionName::Media, Ok(2)),
                (
                    CollectionName::Documents,
                    Err(failed(CollectionName::Documents)),
                ),
            ]),
        };
        assert!(outcome.is_partial());
        assert!(outcome.parent_persisted());
        assert_eq!(
            outcome.failed_collections(),
            vec![CollectionName::Units, CollectionName::Documents]
        );
        assert_eq!(
            outcome.summary("Property"),
            "Property saved, but failed to save units, documents; edit it to retry."
        );
    }

    #[test]
    fn fatal_outcome_has_no_children() {
        let outcome = PersistenceOutcome::fatal(SubmitError::ParentFailed {
            table: "tenants",
            reason: "connection reset".into(),
        });
        assert!(!outcome.parent_persisted());
        assert!(outcome.children.is_empty());
        assert_eq!(
            outcome.summary("Tenant"),
            "Tenant was not saved: could not save tenants: connection reset"
        );
    }
}
