//! Uploaded media files in canonical shape.

use crate::media::{classify_url, MediaKind, MediaType};
use crate::resolve::{passthrough, resolve_opt_str, resolve_str};
use crate::Canonical;
use agora_types::{RawRecord, RecordId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const CONSUMED: [&str; 11] = [
    "nom_fichier",
    "filename",
    "file_name",
    "url",
    "type",
    "kind",
    "taille",
    "size",
    "mime_type",
    "uploaded_by",
    "created_at",
];

/// A persisted media row. Publications and events hold denormalized URL
/// copies of these; the row itself is owned independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaFile {
    pub id: RecordId,
    pub file_name: String,
    pub url: String,
    pub kind: MediaType,
    pub size: Option<u64>,
    pub mime_type: Option<String>,
    pub uploaded_by: String,
    pub created_at: String,
    pub extra: Map<String, Value>,
}

impl Canonical for MediaFile {
    fn from_raw(raw: &RawRecord) -> Self {
        let url = resolve_str(raw, &["url"], "");

        // Old rows can lack a stored kind; fall back to the URL heuristic.
        let kind = resolve_opt_str(raw, &["type", "kind"])
            .and_then(|v| MediaType::parse(&v))
            .unwrap_or_else(|| match classify_url(Some(&url)) {
                MediaKind::Video => MediaType::Video,
                MediaKind::Image => MediaType::Image,
                MediaKind::Audio => MediaType::Audio,
                MediaKind::None => MediaType::Document,
            });

        Self {
            id: raw.id(),
            file_name: resolve_str(raw, &["nom_fichier", "filename", "file_name"], ""),
            url,
            kind,
            size: raw.get_u64("taille").or_else(|| raw.get_u64("size")),
            mime_type: resolve_opt_str(raw, &["mime_type"]),
            uploaded_by: resolve_str(raw, &["uploaded_by"], ""),
            created_at: resolve_str(raw, &["created_at"], ""),
            extra: passthrough(raw, &CONSUMED),
        }
    }

    fn to_payload(&self) -> RawRecord {
        let mut payload = RawRecord::new();
        payload.fields = self.extra.clone();
        payload
            .set("nom_fichier", self.file_name.clone())
            .set("url", self.url.clone())
            .set("type", self.kind.as_str())
            .set("uploaded_by", self.uploaded_by.clone());
        if let Some(size) = self.size {
            payload.set("taille", size);
        }
        if let Some(mime) = &self.mime_type {
            payload.set("mime_type", mime.clone());
        }
        payload
    }

    fn id(&self) -> &RecordId {
        &self.id
    }
}
