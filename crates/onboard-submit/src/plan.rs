//! Persistence plan derivation
//!
//! A [`PersistencePlan`] is derived, not stored: the ordered set of write
//! operations implied by a submitted draft. The parent record is a
//! projection of the draft's scalar fields; child collections become
//! independent row batches referencing the parent by foreign key once the
//! upsert has produced it.

use crate::stores::{ActorContext, Record};
use onboard_schema::fields::{self, property, tenant};
use onboard_schema::{ChildDraft, EntityDraft, FieldKind, FieldValue, FileHandle, StepRegistry, WizardKind};

/// Key under which a resolved upload URL lands in a child row
pub const URL_FIELD: &str = "url";

/// Named child collection of a parent entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionName {
    Units,
    Media,
    FloorPlans,
    PaymentMethods,
    Contacts,
    Documents,
}

impl CollectionName {
    /// Backing table for this collection
    #[must_use]
    pub fn table(self) -> &'static str {
        match self {
            Self::Units => "units",
            Self::Media => "media",
            Self::FloorPlans => "floor_plans",
            Self::PaymentMethods => "payment_methods",
            Self::Contacts => "contacts",
            Self::Documents => "documents",
        }
    }

    /// Human-readable name used in failure summaries
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Units => "units",
            Self::Media => "photos",
            Self::FloorPlans => "floor plans",
            Self::PaymentMethods => "payment methods",
            Self::Contacts => "contacts",
            Self::Documents => "documents",
        }
    }
}

impl std::fmt::Display for CollectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A binary asset waiting to be uploaded
#[derive(Debug, Clone)]
pub struct PendingUpload {
    /// Storage path relative to the configured upload root
    pub path: String,
    /// Raw bytes
    pub bytes: Vec<u8>,
    /// File name, used in failure messages
    pub label: String,
}

impl PendingUpload {
    fn from_file(prefix: &str, file: &FileHandle) -> Self {
        Self {
            path: format!("{prefix}/{}", file.file_name),
            bytes: file.bytes.clone(),
            label: file.file_name.clone(),
        }
    }
}

/// One child row, possibly waiting on an upload whose URL it references
#[derive(Debug, Clone)]
pub struct ChildRow {
    /// Scalar fields of the row
    pub record: Record,
    /// Pending upload whose URL lands under [`URL_FIELD`]
    pub upload: Option<PendingUpload>,
}

/// All rows of one child collection, written as a single batch
#[derive(Debug, Clone)]
pub struct ChildBatch {
    /// Which collection this is
    pub collection: CollectionName,
    /// Rows to insert
    pub rows: Vec<ChildRow>,
}

/// The ordered write plan for one submitted draft
#[derive(Debug, Clone)]
pub struct PersistencePlan {
    /// Parent entity table
    pub parent_table: &'static str,
    /// Foreign-key column stamped onto every child row
    pub parent_key: &'static str,
    /// Projected parent record, ownership stamped
    pub parent: Record,
    /// Singular asset uploaded before the parent upsert
    pub primary_asset: Option<PendingUpload>,
    /// Parent column receiving the primary asset's URL
    pub primary_url_field: &'static str,
    /// Independent child batches, all gated on the parent upsert
    pub children: Vec<ChildBatch>,
}

impl PersistencePlan {
    /// Derive the plan for a fully validated draft
    #[must_use]
    pub fn build(registry: &StepRegistry, draft: &EntityDraft, actor: &ActorContext) -> Self {
        let kind = registry.kind();
        let mut parent = project_parent(registry, draft);
        parent.insert("owner_id".into(), actor.actor_id.clone().into());
        parent.insert("owner_role".into(), actor.role.as_str().into());

        let (primary_field, primary_url_field) = match kind {
            WizardKind::Property => (property::PRIMARY_IMAGE, "primary_image_url"),
            WizardKind::Tenant => (tenant::PHOTO, "photo_url"),
        };

        let mut primary_asset = None;
        if let Some(asset) = draft.attachment(primary_field) {
            if let Some(file) = &asset.file {
                primary_asset = Some(PendingUpload::from_file(kind.parent_table(), file));
            } else if let Some(url) = &asset.url {
                parent.insert(primary_url_field.into(), url.clone().into());
            }
        }

        let children = match kind {
            WizardKind::Property => property_children(draft),
            WizardKind::Tenant => tenant_children(draft),
        };

        Self {
            parent_table: kind.parent_table(),
            parent_key: match kind {
                WizardKind::Property => "property_id",
                WizardKind::Tenant => "tenant_id",
            },
            parent,
            primary_asset,
            primary_url_field,
            children,
        }
    }
}

/// Project the draft's scalar fields into the parent record
///
/// Collections and attachments are excluded; they persist through child
/// batches and uploads. An `id` field is carried over so edit-mode
/// submissions update in place.
fn project_parent(registry: &StepRegistry, draft: &EntityDraft) -> Record {
    let mut record = Record::new();
    if let Some(id) = draft.text(fields::ID) {
        record.insert("id".into(), id.to_string().into());
    }

    for spec in registry.catalog() {
        let scalar = matches!(
            spec.kind,
            FieldKind::Text | FieldKind::Number | FieldKind::Flag | FieldKind::Choice(_)
        );
        if !scalar {
            continue;
        }
        if let Some(value) = draft.get(spec.name).and_then(json_value) {
            record.insert(spec.name.as_str().into(), value);
        }
    }
    record
}

fn json_value(value: &FieldValue) -> Option<serde_json::Value> {
    match value {
        FieldValue::Text(s) | FieldValue::Choice(s) => Some(s.clone().into()),
        FieldValue::Number(n) => serde_json::Number::from_f64(*n).map(serde_json::Value::Number),
        FieldValue::Flag(b) => Some((*b).into()),
        FieldValue::Items(_) | FieldValue::Attachment(_) => None,
    }
}

fn child_record(child: &ChildDraft) -> Record {
    let mut record = Record::new();
    for (key, value) in &child.fields {
        if let Some(value) = json_value(value) {
            record.insert(key.clone(), value);
        }
    }
    record
}

fn plain_rows(children: &[ChildDraft]) -> Vec<ChildRow> {
    children
        .iter()
        .map(|c| ChildRow {
            record: child_record(c),
            upload: None,
        })
        .collect()
}

/// Rows for collections whose elements carry a binary file (media, floor
/// plans, documents). Elements with neither a pending file nor an existing
/// URL reference nothing durable and are dropped.
fn asset_rows(children: &[ChildDraft], prefix: &str) -> Vec<ChildRow> {
    children
        .iter()
        .filter_map(|c| {
            let record = child_record(c);
            let upload = c.file.as_ref().map(|f| PendingUpload::from_file(prefix, f));
            if upload.is_none() && !record.contains_key(URL_FIELD) {
                return None;
            }
            Some(ChildRow { record, upload })
        })
        .collect()
}

fn batch(collection: CollectionName, rows: Vec<ChildRow>) -> Option<ChildBatch> {
    (!rows.is_empty()).then_some(ChildBatch { collection, rows })
}

fn property_children(draft: &EntityDraft) -> Vec<ChildBatch> {
    // Block entries fold into unit rows (each unit carries its block
    // label); blocks never persist as their own table.
    [
        batch(CollectionName::Units, plain_rows(draft.items(property::UNITS))),
        batch(
            CollectionName::Media,
            asset_rows(draft.items(property::MEDIA), "properties/media"),
        ),
        batch(
            CollectionName::FloorPlans,
            asset_rows(draft.items(property::FLOOR_PLANS), "properties/floor_plans"),
        ),
        batch(
            CollectionName::PaymentMethods,
            plain_rows(draft.items(property::PAYMENT_METHODS)),
        ),
        batch(
            CollectionName::Contacts,
            plain_rows(draft.items(property::CONTACTS)),
        ),
        batch(
            CollectionName::Documents,
            asset_rows(draft.items(property::DOCUMENTS), "properties/documents"),
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn tenant_children(draft: &EntityDraft) -> Vec<ChildBatch> {
    [
        batch(CollectionName::Contacts, guarantor_rows(draft)),
        batch(
            CollectionName::Documents,
            asset_rows(draft.items(tenant::DOCUMENTS), "tenants/documents"),
        ),
        batch(
            CollectionName::PaymentMethods,
            plain_rows(draft.items(tenant::PAYMENT_METHODS)),
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// The guarantor contact row exists only when a guarantor name was given
fn guarantor_rows(draft: &EntityDraft) -> Vec<ChildRow> {
    let Some(full_name) = draft.text(tenant::GUARANTOR_FULL_NAME) else {
        return Vec::new();
    };
    if full_name.trim().is_empty() {
        return Vec::new();
    }

    let mut record = Record::new();
    record.insert("full_name".into(), full_name.to_string().into());
    record.insert("relationship".into(), "guarantor".into());
    if let Some(phone) = draft.text(tenant::GUARANTOR_PHONE) {
        record.insert("phone".into(), phone.to_string().into());
    }
    if let Some(email) = draft.text(tenant::GUARANTOR_EMAIL) {
        record.insert("email".into(), email.to_string().into());
    }
    vec![ChildRow {
        record,
        upload: None,
    }]
}
