//! Testing utilities for the Onboard workspace
//!
//! In-memory store implementations with a shared, globally ordered call
//! log and per-table failure injection, plus draft fixtures.

#![allow(missing_docs)]

use async_trait::async_trait;
use dashmap::DashMap;
use onboard_schema::fields::{property, tenant};
use onboard_schema::{ChildDraft, EntityDraft, FieldValue, FileHandle};
use onboard_submit::{
    BlobStore, EntityId, EntityStore, Navigator, Record, StoreError, StoredRecord,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// One recorded store operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Upsert { table: String },
    InsertMany { table: String, rows: usize },
    Upload { path: String },
}

/// Globally ordered log shared by all in-memory stores
///
/// Sharing one log across the entity and blob stores lets tests assert
/// cross-store ordering (uploads before inserts, parent before children).
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<StoreCall>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, call: StoreCall) {
        self.calls.lock().push(call);
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().clone()
    }

    /// Position of the first call matching `predicate`, if any
    pub fn position(&self, predicate: impl Fn(&StoreCall) -> bool) -> Option<usize> {
        self.calls.lock().iter().position(predicate)
    }

    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }
}

/// In-memory entity store with per-table failure injection
#[derive(Debug, Default)]
pub struct MemoryEntityStore {
    tables: DashMap<String, Vec<Record>>,
    failing: Mutex<Vec<String>>,
    log: CallLog,
}

impl MemoryEntityStore {
    pub fn new(log: CallLog) -> Self {
        Self {
            tables: DashMap::new(),
            failing: Mutex::new(Vec::new()),
            log,
        }
    }

    /// Make every operation on `table` fail
    pub fn fail_on(&self, table: impl Into<String>) {
        self.failing.lock().push(table.into());
    }

    /// Clear all injected failures
    pub fn clear_failures(&self) {
        self.failing.lock().clear();
    }

    /// Snapshot of a table's rows
    pub fn rows(&self, table: &str) -> Vec<Record> {
        self.tables.get(table).map(|t| t.clone()).unwrap_or_default()
    }

    pub fn row_count(&self, table: &str) -> usize {
        self.tables.get(table).map_or(0, |t| t.len())
    }

    fn check(&self, table: &str) -> Result<(), StoreError> {
        if self.failing.lock().iter().any(|t| t == table) {
            return Err(StoreError::backend(format!("injected failure on {table}")));
        }
        Ok(())
    }
}

#[async_trait]
impl EntityStore for MemoryEntityStore {
    async fn upsert(&self, table: &str, mut record: Record) -> Result<StoredRecord, StoreError> {
        self.log.record(StoreCall::Upsert {
            table: table.to_string(),
        });
        self.check(table)?;

        let id = match record.get("id").and_then(serde_json::Value::as_str) {
            Some(existing) => EntityId::new(existing),
            None => {
                let minted = EntityId::new(ulid::Ulid::new().to_string());
                record.insert("id".into(), minted.as_str().into());
                record.insert(
                    "created_at".into(),
                    chrono::Utc::now().to_rfc3339().into(),
                );
                minted
            }
        };

        let mut table_rows = self.tables.entry(table.to_string()).or_default();
        match table_rows
            .iter_mut()
            .find(|r| r.get("id").and_then(serde_json::Value::as_str) == Some(id.as_str()))
        {
            Some(existing) => *existing = record.clone(),
            None => table_rows.push(record.clone()),
        }
        Ok(StoredRecord { id, record })
    }

    async fn insert_many(&self, table: &str, records: Vec<Record>) -> Result<(), StoreError> {
        self.log.record(StoreCall::InsertMany {
            table: table.to_string(),
            rows: records.len(),
        });
        self.check(table)?;

        let mut table_rows = self.tables.entry(table.to_string()).or_default();
        for mut record in records {
            if !record.contains_key("id") {
                record.insert("id".into(), ulid::Ulid::new().to_string().into());
            }
            table_rows.push(record);
        }
        Ok(())
    }

    async fn get(&self, table: &str, id: &EntityId) -> Result<Record, StoreError> {
        self.check(table)?;
        self.tables
            .get(table)
            .and_then(|rows| {
                rows.iter()
                    .find(|r| r.get("id").and_then(serde_json::Value::as_str) == Some(id.as_str()))
                    .cloned()
            })
            .ok_or(StoreError::NotFound)
    }
}

/// In-memory blob store with per-path failure injection
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: DashMap<String, Vec<u8>>,
    failing: Mutex<Vec<String>>,
    log: CallLog,
}

impl MemoryBlobStore {
    pub fn new(log: CallLog) -> Self {
        Self {
            blobs: DashMap::new(),
            failing: Mutex::new(Vec::new()),
            log,
        }
    }

    /// Make uploads whose path contains `fragment` fail
    pub fn fail_on(&self, fragment: impl Into<String>) {
        self.failing.lock().push(fragment.into());
    }

    /// Clear all injected failures
    pub fn clear_failures(&self) {
        self.failing.lock().clear();
    }

    pub fn blob_count(&self) -> usize {
        self.blobs.len()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.blobs.contains_key(path)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(&self, path: &str, bytes: &[u8]) -> Result<String, StoreError> {
        self.log.record(StoreCall::Upload {
            path: path.to_string(),
        });
        if self.failing.lock().iter().any(|f| path.contains(f.as_str())) {
            return Err(StoreError::backend(format!("injected upload failure at {path}")));
        }
        self.blobs.insert(path.to_string(), bytes.to_vec());
        Ok(format!("memory://{path}"))
    }
}

/// Navigator that records every target it was sent to
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, path: &str) {
        self.visited.lock().push(path.to_string());
    }
}

/// A valid single-unit property draft with units, media, and a document
pub fn filled_property_draft() -> EntityDraft {
    let mut draft = EntityDraft::new();
    draft.set(property::NAME, FieldValue::Text("Sunset Court".into()));
    draft.set(
        property::STRUCTURE_TYPE,
        FieldValue::Choice("single_unit".into()),
    );
    draft.set(property::ADDRESS_LINE, FieldValue::Text("12 Palm Way".into()));
    draft.set(property::CITY, FieldValue::Text("Lagos".into()));
    draft.set(property::COUNTRY, FieldValue::Text("Nigeria".into()));

    draft.items_mut(property::UNITS).extend([
        ChildDraft::new()
            .with_field("name", FieldValue::Text("A1".into()))
            .with_field("monthly_rent", FieldValue::Number(1200.0)),
        ChildDraft::new()
            .with_field("name", FieldValue::Text("A2".into()))
            .with_field("monthly_rent", FieldValue::Number(1350.0)),
    ]);
    draft.items_mut(property::MEDIA).push(
        ChildDraft::new()
            .with_field("caption", FieldValue::Text("lobby".into()))
            .with_file(FileHandle::new("lobby.jpg", "image/jpeg", vec![1, 2, 3])),
    );
    draft.items_mut(property::DOCUMENTS).push(
        ChildDraft::new()
            .with_field("title", FieldValue::Text("deed".into()))
            .with_file(FileHandle::new("deed.pdf", "application/pdf", vec![9])),
    );
    draft
}

/// A valid tenant draft with a guarantor named
pub fn filled_tenant_draft() -> EntityDraft {
    let mut draft = EntityDraft::new();
    draft.set(tenant::FIRST_NAME, FieldValue::Text("Ada".into()));
    draft.set(tenant::LAST_NAME, FieldValue::Text("Okafor".into()));
    draft.set(tenant::EMAIL, FieldValue::Text("ada@example.com".into()));
    draft.set(
        tenant::EMPLOYMENT_STATUS,
        FieldValue::Choice("student".into()),
    );
    draft.set(
        tenant::GUARANTOR_FULL_NAME,
        FieldValue::Text("Bisi Adeyemi".into()),
    );
    draft.set(
        tenant::GUARANTOR_PHONE,
        FieldValue::Text("+234 801 234 5678".into()),
    );
    draft
}
