//! Event participants in canonical shape.

use crate::resolve::{passthrough, resolve_bool, resolve_str};
use crate::Canonical;
use agora_types::{RawRecord, RecordId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const CONSUMED: [&str; 8] = [
    "event_id",
    "nom",
    "name",
    "email",
    "inscription_date",
    "registration_date",
    "confirmed",
    "events",
];

/// A registration for exactly one event. The registration timestamp is
/// server-set and never written back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: RecordId,
    pub event_id: RecordId,
    pub name: String,
    pub email: String,
    pub registered_at: String,
    pub confirmed: bool,
    pub extra: Map<String, Value>,
}

impl Canonical for Participant {
    fn from_raw(raw: &RawRecord) -> Self {
        Self {
            id: raw.id(),
            event_id: resolve_str(raw, &["event_id"], "").into(),
            name: resolve_str(raw, &["nom", "name"], ""),
            email: resolve_str(raw, &["email"], ""),
            registered_at: resolve_str(raw, &["inscription_date", "registration_date"], ""),
            confirmed: resolve_bool(raw, &["confirmed"], false),
            extra: passthrough(raw, &CONSUMED),
        }
    }

    fn to_payload(&self) -> RawRecord {
        let mut payload = RawRecord::new();
        payload.fields = self.extra.clone();
        payload
            .set("event_id", self.event_id.as_str())
            .set("nom", self.name.clone())
            .set("email", self.email.clone())
            .set("confirmed", self.confirmed);
        payload
    }

    fn id(&self) -> &RecordId {
        &self.id
    }
}
