//! Administration action log entries.

use crate::resolve::{passthrough, resolve_str};
use crate::Canonical;
use agora_types::{RawRecord, RecordId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const CONSUMED: [&str; 3] = ["action", "details", "created_at"];

/// One logged admin action ("publication created", …). Read-mostly; the
/// console appends these best-effort after successful writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminLog {
    pub id: RecordId,
    pub action: String,
    pub details: Option<Value>,
    pub created_at: String,
    pub extra: Map<String, Value>,
}

impl AdminLog {
    /// A new entry for the given action.
    #[must_use]
    pub fn action(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            ..Self::default()
        }
    }

    /// Attaches a details object.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl Canonical for AdminLog {
    fn from_raw(raw: &RawRecord) -> Self {
        Self {
            id: raw.id(),
            action: resolve_str(raw, &["action"], ""),
            details: raw.get("details").filter(|v| !v.is_null()).cloned(),
            created_at: resolve_str(raw, &["created_at"], ""),
            extra: passthrough(raw, &CONSUMED),
        }
    }

    fn to_payload(&self) -> RawRecord {
        let mut payload = RawRecord::new();
        payload.fields = self.extra.clone();
        payload.set("action", self.action.clone());
        if let Some(details) = &self.details {
            payload.set("details", details.clone());
        }
        payload
    }

    fn id(&self) -> &RecordId {
        &self.id
    }
}
