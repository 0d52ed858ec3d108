//! Raw stored records.
//!
//! A [`RawRecord`] is a record exactly as the remote store returns it.
//! Field names may follow either the localized persistence dialect
//! (`titre`, `lieu`, `gratuit`, …) or the legacy display dialect
//! (`title`, `location`, `is_free`, …); both can be present at once.
//! Keys outside the modeled set are carried verbatim so that repeated
//! normalize → payload cycles never drop administrator-entered data.

use crate::RecordId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored record in wire shape: an opaque id plus a flat field map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Server-assigned identifier; absent on a create payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    /// Every other key of the wire object, verbatim.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RawRecord {
    /// Creates an empty record (a payload under construction).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record with a known id and no fields.
    #[must_use]
    pub fn with_id(id: impl Into<RecordId>) -> Self {
        Self {
            id: Some(id.into()),
            fields: Map::new(),
        }
    }

    /// The record's id, or the empty id for an unsaved draft.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id.clone().unwrap_or_default()
    }

    // ── Typed accessors ──────────────────────────────────────────
    //
    // All accessors are total: a missing key, a null, or a value of the
    // wrong JSON type reads as absent.

    /// Reads a string field.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Reads a boolean field.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.fields.get(key).and_then(Value::as_bool)
    }

    /// Reads a non-negative integer field.
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.fields.get(key).and_then(Value::as_u64)
    }

    /// Reads an array-of-strings field; non-string elements are skipped.
    pub fn get_str_array(&self, key: &str) -> Option<Vec<String>> {
        self.fields.get(key).and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
    }

    /// Reads a string one level inside a joined object, e.g.
    /// `get_nested_str("categories", "nom")` for a relation the remote
    /// store expanded inline.
    pub fn get_nested_str(&self, key: &str, inner: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(Value::as_object)
            .and_then(|obj| obj.get(inner))
            .and_then(Value::as_str)
    }

    /// Reads the raw JSON value of a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    // ── Builders ─────────────────────────────────────────────────

    /// Sets a field, replacing any existing value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Removes a field, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    /// True when the record carries the given key with a non-null value.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.fields.get(key).is_some_and(|v| !v.is_null())
    }
}
