//! Support-page entries (donation channels, bank details, …).

use crate::resolve::{passthrough, resolve_bool, resolve_str};
use crate::Canonical;
use agora_types::{RawRecord, RecordId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const CONSUMED: [&str; 8] = [
    "type",
    "nom",
    "name",
    "details",
    "actif",
    "active",
    "created_at",
    "updated_at",
];

/// One way to support the organization. `details` is an opaque object
/// whose shape depends on `kind` (an IBAN block, a payment link, …).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportInfo {
    pub id: RecordId,
    pub kind: String,
    pub name: String,
    pub details: Map<String, Value>,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
    pub extra: Map<String, Value>,
}

impl Canonical for SupportInfo {
    fn from_raw(raw: &RawRecord) -> Self {
        let details = raw
            .get("details")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        Self {
            id: raw.id(),
            kind: resolve_str(raw, &["type"], ""),
            name: resolve_str(raw, &["nom", "name"], ""),
            details,
            active: resolve_bool(raw, &["actif", "active"], true),
            created_at: resolve_str(raw, &["created_at"], ""),
            updated_at: resolve_str(raw, &["updated_at"], ""),
            extra: passthrough(raw, &CONSUMED),
        }
    }

    fn to_payload(&self) -> RawRecord {
        let mut payload = RawRecord::new();
        payload.fields = self.extra.clone();
        payload
            .set("type", self.kind.clone())
            .set("nom", self.name.clone())
            .set("details", Value::Object(self.details.clone()))
            .set("actif", self.active);
        payload
    }

    fn id(&self) -> &RecordId {
        &self.id
    }
}
