//! Draft values and the accumulating entity draft
//!
//! The [`EntityDraft`] is the in-memory representation of the entity being
//! created or edited. It is a superset of every step's field subset and is
//! owned exclusively by one wizard session; it never persists across
//! reloads.

use crate::field::FieldName;
use indexmap::IndexMap;

/// In-memory handle to a not-yet-uploaded binary file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    /// Original file name, used to derive the storage path
    pub file_name: String,
    /// MIME content type
    pub content_type: String,
    /// Raw bytes held in memory until upload
    pub bytes: Vec<u8>,
}

impl FileHandle {
    /// Create a new in-memory file handle
    #[inline]
    #[must_use]
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// A singular media asset: either a pending file, an already-persisted URL,
/// or both empty (nothing selected)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attachment {
    /// Pending in-memory file, consumed into `url` by upload
    pub file: Option<FileHandle>,
    /// Persisted public URL (present when editing an existing entity)
    pub url: Option<String>,
    /// Optional caption
    pub caption: Option<String>,
}

impl Attachment {
    /// Attachment wrapping a pending file
    #[inline]
    #[must_use]
    pub fn pending(file: FileHandle) -> Self {
        Self {
            file: Some(file),
            url: None,
            caption: None,
        }
    }

    /// Attachment referencing an already-persisted URL
    #[inline]
    #[must_use]
    pub fn persisted(url: impl Into<String>) -> Self {
        Self {
            file: None,
            url: Some(url.into()),
            caption: None,
        }
    }

    /// Whether anything was selected at all
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.file.is_none() && self.url.is_none()
    }
}

/// One element of a child collection (a unit, a contact, a document row)
///
/// Child drafts are free-form records; per-collection shape is the concern
/// of the persistence plan, not of field validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChildDraft {
    /// Scalar fields of the child row
    pub fields: IndexMap<String, FieldValue>,
    /// Pending binary file for collections that carry one (media, documents)
    pub file: Option<FileHandle>,
}

impl ChildDraft {
    /// Empty child draft
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field on the child row
    #[inline]
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Attach a pending file
    #[inline]
    #[must_use]
    pub fn with_file(mut self, file: FileHandle) -> Self {
        self.file = Some(file);
        self
    }

    /// Text field accessor
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.fields.get(key) {
            Some(FieldValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// A value held by the draft for one field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Free-form text
    Text(String),
    /// Numeric value
    Number(f64),
    /// Boolean toggle
    Flag(bool),
    /// Selected option of a choice field
    Choice(String),
    /// Child collection
    Items(Vec<ChildDraft>),
    /// Singular asset
    Attachment(Attachment),
}

impl FieldValue {
    /// Short name of the value's kind, for error messages
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Flag(_) => "flag",
            Self::Choice(_) => "choice",
            Self::Items(_) => "items",
            Self::Attachment(_) => "attachment",
        }
    }

    /// Whether the value counts as empty for requirement checks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) | Self::Choice(s) => s.trim().is_empty(),
            Self::Number(_) | Self::Flag(_) => false,
            Self::Items(items) => items.is_empty(),
            Self::Attachment(a) => a.is_empty(),
        }
    }
}

/// The accumulating in-memory entity
///
/// Field order is insertion order, so records projected from the draft keep
/// a stable shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityDraft {
    fields: IndexMap<FieldName, FieldValue>,
}

impl EntityDraft {
    /// Empty draft
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, replacing any previous value
    pub fn set(&mut self, name: FieldName, value: FieldValue) {
        self.fields.insert(name, value);
    }

    /// Remove a field value
    pub fn remove(&mut self, name: FieldName) -> Option<FieldValue> {
        self.fields.shift_remove(&name)
    }

    /// Raw value accessor
    #[inline]
    #[must_use]
    pub fn get(&self, name: FieldName) -> Option<&FieldValue> {
        self.fields.get(&name)
    }

    /// Whether the field holds a non-empty value
    #[must_use]
    pub fn is_filled(&self, name: FieldName) -> bool {
        self.get(name).is_some_and(|v| !v.is_empty())
    }

    /// Text accessor
    #[must_use]
    pub fn text(&self, name: FieldName) -> Option<&str> {
        match self.get(name) {
            Some(FieldValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Number accessor
    #[must_use]
    pub fn number(&self, name: FieldName) -> Option<f64> {
        match self.get(name) {
            Some(FieldValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    /// Flag accessor; an absent flag reads as `false`
    #[must_use]
    pub fn flag(&self, name: FieldName) -> bool {
        matches!(self.get(name), Some(FieldValue::Flag(true)))
    }

    /// Choice accessor
    #[must_use]
    pub fn choice(&self, name: FieldName) -> Option<&str> {
        match self.get(name) {
            Some(FieldValue::Choice(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Child-collection accessor
    #[must_use]
    pub fn items(&self, name: FieldName) -> &[ChildDraft] {
        match self.get(name) {
            Some(FieldValue::Items(items)) => items.as_slice(),
            _ => &[],
        }
    }

    /// Mutable child-collection accessor, inserting an empty collection if
    /// the field is absent or holds a different kind
    pub fn items_mut(&mut self, name: FieldName) -> &mut Vec<ChildDraft> {
        if !matches!(self.fields.get(&name), Some(FieldValue::Items(_))) {
            self.fields.insert(name, FieldValue::Items(Vec::new()));
        }
        match self.fields.get_mut(&name) {
            Some(FieldValue::Items(items)) => items,
            _ => unreachable!("items slot was just inserted"),
        }
    }

    /// Singular asset accessor
    #[must_use]
    pub fn attachment(&self, name: FieldName) -> Option<&Attachment> {
        match self.get(name) {
            Some(FieldValue::Attachment(a)) => Some(a),
            _ => None,
        }
    }

    /// Iterate over all fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }

    /// Number of fields with a value
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the draft holds no values
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn name(s: &'static str) -> FieldName {
        FieldName::new(s)
    }

    #[test]
    fn draft_typed_accessors() {
        let mut draft = EntityDraft::new();
        draft.set(name("title"), FieldValue::Text("Sunset Court".into()));
        draft.set(name("rent"), FieldValue::Number(1200.0));
        draft.set(name("furnished"), FieldValue::Flag(true));
        draft.set(name("kind"), FieldValue::Choice("estate".into()));

        assert_eq!(draft.text(name("title")), Some("Sunset Court"));
        assert_eq!(draft.number(name("rent")), Some(1200.0));
        assert!(draft.flag(name("furnished")));
        assert_eq!(draft.choice(name("kind")), Some("estate"));
        // Wrong-kind access reads as absent
        assert_eq!(draft.text(name("rent")), None);
    }

    #[test]
    fn draft_missing_flag_reads_false() {
        let draft = EntityDraft::new();
        assert!(!draft.flag(name("furnished")));
    }

    #[test]
    fn items_mut_replaces_wrong_kind() {
        let mut draft = EntityDraft::new();
        draft.set(name("units"), FieldValue::Text("oops".into()));

        draft.items_mut(name("units")).push(ChildDraft::new());
        assert_eq!(draft.items(name("units")).len(), 1);
    }

    #[test]
    fn empty_values() {
        assert!(FieldValue::Text("  ".into()).is_empty());
        assert!(FieldValue::Items(vec![]).is_empty());
        assert!(FieldValue::Attachment(Attachment::default()).is_empty());
        assert!(!FieldValue::Flag(false).is_empty());
        assert!(!FieldValue::Number(0.0).is_empty());
    }

    #[test]
    fn attachment_states() {
        let pending = Attachment::pending(FileHandle::new("a.jpg", "image/jpeg", vec![1]));
        assert!(!pending.is_empty());

        let persisted = Attachment::persisted("https://blobs/a.jpg");
        assert!(persisted.file.is_none());
        assert!(!persisted.is_empty());
    }
}
