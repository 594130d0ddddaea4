//! Submission orchestrator
//!
//! Executes a [`PersistencePlan`] against the collaborator stores in a
//! fixed order: primary upload, then the parent upsert, then all child
//! batches. Child batches run concurrently but none starts before the
//! parent id exists, and batches fail independently; there is no rollback
//! and no automatic retry. Re-submitting after a failure upserts the
//! parent again and re-inserts the child batches.

use crate::config::SubmitConfig;
use crate::error::SubmitError;
use crate::outcome::PersistenceOutcome;
use crate::plan::{ChildBatch, CollectionName, PersistencePlan, URL_FIELD};
use crate::stores::{BlobStore, EntityId, EntityStore};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Drives a [`PersistencePlan`] to a [`PersistenceOutcome`]
pub struct SubmissionOrchestrator<E, B> {
    entities: Arc<E>,
    blobs: Arc<B>,
    config: SubmitConfig,
}

impl<E: EntityStore, B: BlobStore> SubmissionOrchestrator<E, B> {
    /// Create an orchestrator over the given stores
    #[must_use]
    pub fn new(entities: Arc<E>, blobs: Arc<B>, config: SubmitConfig) -> Self {
        Self {
            entities,
            blobs,
            config,
        }
    }

    /// Settings this orchestrator runs with
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SubmitConfig {
        &self.config
    }

    /// Execute the plan
    ///
    /// Never returns `Err`: every failure mode is part of the outcome.
    pub async fn submit(&self, mut plan: PersistencePlan) -> PersistenceOutcome {
        info!(
            table = plan.parent_table,
            batches = plan.children.len(),
            "submitting entity"
        );

        // The primary asset gates the parent record; without its URL the
        // parent would persist pointing at nothing.
        if let Some(upload) = plan.primary_asset.take() {
            let path = self.config.upload_path(&upload.path);
            match self.blobs.upload(&path, &upload.bytes).await {
                Ok(url) => {
                    plan.parent.insert(plan.primary_url_field.into(), url.into());
                }
                Err(err) => {
                    warn!(asset = %upload.label, error = %err, "primary upload failed");
                    return PersistenceOutcome::fatal(SubmitError::UploadFailed {
                        asset: upload.label,
                        reason: err.to_string(),
                    });
                }
            }
        }

        let parent_id = match self.entities.upsert(plan.parent_table, plan.parent).await {
            Ok(stored) => stored.id,
            Err(err) => {
                warn!(table = plan.parent_table, error = %err, "parent upsert failed");
                return PersistenceOutcome::fatal(SubmitError::ParentFailed {
                    table: plan.parent_table,
                    reason: err.to_string(),
                });
            }
        };
        debug!(table = plan.parent_table, id = %parent_id, "parent persisted");

        let batches = plan
            .children
            .into_iter()
            .map(|batch| self.run_batch(batch, plan.parent_key, &parent_id));
        let results = futures::future::join_all(batches).await;

        let mut children = indexmap::IndexMap::new();
        for (collection, result) in results {
            if let Err(err) = &result {
                warn!(collection = %collection, error = %err, "child batch failed");
            }
            children.insert(collection, result);
        }

        PersistenceOutcome {
            parent: Ok(parent_id),
            children,
        }
    }

    /// Persist one child batch: resolve its row uploads, stamp the parent
    /// key, insert all rows in one call.
    async fn run_batch(
        &self,
        batch: ChildBatch,
        parent_key: &'static str,
        parent_id: &EntityId,
    ) -> (CollectionName, Result<usize, SubmitError>) {
        let collection = batch.collection;
        let mut records = Vec::with_capacity(batch.rows.len());

        for row in batch.rows {
            let mut record = row.record;
            if let Some(upload) = row.upload {
                let path = self.config.upload_path(&upload.path);
                match self.blobs.upload(&path, &upload.bytes).await {
                    Ok(url) => {
                        record.insert(URL_FIELD.into(), url.into());
                    }
                    Err(err) => {
                        return (
                            collection,
                            Err(SubmitError::UploadFailed {
                                asset: upload.label,
                                reason: err.to_string(),
                            }),
                        );
                    }
                }
            }
            record.insert(parent_key.into(), parent_id.as_str().into());
            records.push(record);
        }

        let count = records.len();
        match self.entities.insert_many(collection.table(), records).await {
            Ok(()) => {
                debug!(collection = %collection, rows = count, "child batch persisted");
                (collection, Ok(count))
            }
            Err(err) => (
                collection,
                Err(SubmitError::ChildFailed {
                    collection,
                    reason: err.to_string(),
                }),
            ),
        }
    }
}
