//! Collaborator interfaces
//!
//! The orchestrator is a pure in-process component; everything durable
//! lives behind these seams. Implementations are provided by the host
//! application (a hosted database and blob service in production, the
//! in-memory stores from `onboard-test-utils` in tests).

use crate::error::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A record handed to or returned from the entity store
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Durable identifier minted by the entity store
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub String);

impl EntityId {
    /// Wrap a raw identifier
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A record together with its durable identifier
#[derive(Debug, Clone)]
pub struct StoredRecord {
    /// Durable identifier
    pub id: EntityId,
    /// The persisted record
    pub record: Record,
}

/// Relational-ish entity store
///
/// `upsert` inserts when the record carries no `id` key and updates in
/// place when it does. There is no optimistic-concurrency check: concurrent
/// editors are last-write-wins by design.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Insert or update one record, returning it with its durable id
    async fn upsert(&self, table: &str, record: Record) -> Result<StoredRecord, StoreError>;

    /// Insert a batch of records in one operation
    async fn insert_many(&self, table: &str, records: Vec<Record>) -> Result<(), StoreError>;

    /// Fetch one record by id
    async fn get(&self, table: &str, id: &EntityId) -> Result<Record, StoreError>;
}

/// Binary asset store
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload bytes to `path`, returning the public URL
    async fn upload(&self, path: &str, bytes: &[u8]) -> Result<String, StoreError>;
}

/// Navigation sink, fired exactly once on successful submission
pub trait Navigator: Send + Sync {
    /// Navigate the host UI to `path`
    fn navigate_to(&self, path: &str);
}

/// Role of the acting user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Landlord,
    Agent,
    Caretaker,
    Admin,
}

impl ActorRole {
    /// Snake-case name stamped onto records
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Landlord => "landlord",
            Self::Agent => "agent",
            Self::Caretaker => "caretaker",
            Self::Admin => "admin",
        }
    }
}

/// Identity of the current actor
///
/// Used only to stamp ownership fields onto the parent record; no
/// authorization decisions are made here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorContext {
    /// Identifier of the acting user
    pub actor_id: String,
    /// Role of the acting user
    pub role: ActorRole,
}

impl ActorContext {
    /// Create an actor context
    #[inline]
    #[must_use]
    pub fn new(actor_id: impl Into<String>, role: ActorRole) -> Self {
        Self {
            actor_id: actor_id.into(),
            role,
        }
    }
}
