//! Categories, teams and event types share one canonical shape: a name
//! plus an optional description. Which collection a value belongs to is
//! decided where its synchronizer is built, not here.

use crate::resolve::{passthrough, resolve_opt_str, resolve_str};
use crate::Canonical;
use agora_types::{RawRecord, RecordId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const CONSUMED: [&str; 5] = ["nom", "name", "description", "created_at", "updated_at"];

/// A named reference record (category, team or event type).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub id: RecordId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub extra: Map<String, Value>,
}

impl Taxonomy {
    /// A draft with just a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Canonical for Taxonomy {
    fn from_raw(raw: &RawRecord) -> Self {
        Self {
            id: raw.id(),
            name: resolve_str(raw, &["nom", "name"], ""),
            description: resolve_opt_str(raw, &["description"]),
            created_at: resolve_str(raw, &["created_at"], ""),
            updated_at: resolve_str(raw, &["updated_at"], ""),
            extra: passthrough(raw, &CONSUMED),
        }
    }

    fn to_payload(&self) -> RawRecord {
        let mut payload = RawRecord::new();
        payload.fields = self.extra.clone();
        payload.set("nom", self.name.clone());
        if let Some(description) = &self.description {
            payload.set("description", description.clone());
        }
        payload
    }

    fn id(&self) -> &RecordId {
        &self.id
    }
}
