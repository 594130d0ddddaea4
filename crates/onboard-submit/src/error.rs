//! Submission error taxonomy
//!
//! Raw backend errors never reach the wizard: the orchestrator translates
//! every failure into one of these categories with a human-readable
//! message.

use crate::plan::CollectionName;

/// Error reported by a collaborator store
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The requested record does not exist
    #[error("not found")]
    NotFound,

    /// Backend-specific failure (network, service, constraint)
    #[error("{0}")]
    Backend(String),
}

impl StoreError {
    /// Backend failure with a message
    #[inline]
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

/// Categorized submission failure
#[derive(Debug, Clone, thiserror::Error)]
pub enum SubmitError {
    /// A binary asset upload failed; fatal only for the primary asset
    #[error("failed to upload '{asset}': {reason}")]
    UploadFailed {
        /// File name of the failed asset
        asset: String,
        /// Backend reason
        reason: String,
    },

    /// The parent entity could not be persisted; fatal to the submission
    #[error("could not save {table}: {reason}")]
    ParentFailed {
        /// Parent table
        table: &'static str,
        /// Backend reason
        reason: String,
    },

    /// One child collection could not be persisted; non-fatal to the others
    #[error("could not save {collection}: {reason}")]
    ChildFailed {
        /// The failed collection
        collection: CollectionName,
        /// Backend reason
        reason: String,
    },
}
