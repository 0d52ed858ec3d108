//! Inbox messages: contact submissions and registration notices.

use crate::resolve::{passthrough, resolve_bool, resolve_opt_str, resolve_str};
use crate::Canonical;
use agora_types::{RawRecord, RecordId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const CONSUMED: [&str; 13] = [
    "origine",
    "origin",
    "ref_id",
    "nom",
    "name",
    "email",
    "sujet",
    "subject",
    "message",
    "body",
    "lu",
    "read",
    "created_at",
];

/// Which flow produced a message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageOrigin {
    #[default]
    Contact,
    Participation,
}

impl MessageOrigin {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "contact" => Some(MessageOrigin::Contact),
            "participation" => Some(MessageOrigin::Participation),
            _ => None,
        }
    }

    /// The localized value stored in `origine`.
    #[must_use]
    pub fn as_localized(&self) -> &'static str {
        match self {
            MessageOrigin::Contact => "contact",
            MessageOrigin::Participation => "participation",
        }
    }
}

/// An inbox message in canonical shape. `ref_id` points back at the event
/// a participation notice belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: RecordId,
    pub origin: MessageOrigin,
    pub ref_id: Option<RecordId>,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub body: String,
    pub read: bool,
    pub created_at: String,
    pub extra: Map<String, Value>,
}

impl Canonical for Message {
    fn from_raw(raw: &RawRecord) -> Self {
        Self {
            id: raw.id(),
            origin: resolve_opt_str(raw, &["origine", "origin"])
                .and_then(|v| MessageOrigin::parse(&v))
                .unwrap_or_default(),
            ref_id: resolve_opt_str(raw, &["ref_id"]).map(RecordId::from),
            name: resolve_str(raw, &["nom", "name"], ""),
            email: resolve_str(raw, &["email"], ""),
            subject: resolve_opt_str(raw, &["sujet", "subject"]),
            body: resolve_str(raw, &["message", "body"], ""),
            read: resolve_bool(raw, &["lu", "read"], false),
            created_at: resolve_str(raw, &["created_at"], ""),
            extra: passthrough(raw, &CONSUMED),
        }
    }

    fn to_payload(&self) -> RawRecord {
        let mut payload = RawRecord::new();
        payload.fields = self.extra.clone();
        payload
            .set("origine", self.origin.as_localized())
            .set("nom", self.name.clone())
            .set("email", self.email.clone())
            .set("message", self.body.clone())
            .set("lu", self.read);
        if let Some(ref_id) = &self.ref_id {
            payload.set("ref_id", ref_id.as_str());
        }
        if let Some(subject) = &self.subject {
            payload.set("sujet", subject.clone());
        }
        payload
    }

    fn id(&self) -> &RecordId {
        &self.id
    }
}
