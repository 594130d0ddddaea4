//! Onboard Submit - multi-entity persistence orchestration
//!
//! Turns a validated wizard draft into durable records:
//! - [`PersistencePlan`]: the ordered writes implied by a draft
//! - [`SubmissionOrchestrator`]: primary upload, parent upsert, then
//!   concurrent child batches with independent failure
//! - [`PersistenceOutcome`]: per-operation results instead of a single
//!   all-or-nothing error
//! - [`drive_submission`]: glue that settles the wizard session and fires
//!   navigation once the parent is durable
//!
//! Everything durable sits behind the [`EntityStore`] and [`BlobStore`]
//! seams; the crate itself holds no connections.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod driver;
pub mod error;
pub mod orchestrator;
pub mod outcome;
pub mod plan;
pub mod stores;

// Re-exports for convenience
pub use config::SubmitConfig;
pub use driver::drive_submission;
pub use error::{StoreError, SubmitError};
pub use orchestrator::SubmissionOrchestrator;
pub use outcome::PersistenceOutcome;
pub use plan::{ChildBatch, ChildRow, CollectionName, PendingUpload, PersistencePlan, URL_FIELD};
pub use stores::{
    ActorContext, ActorRole, BlobStore, EntityId, EntityStore, Navigator, Record, StoredRecord,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
