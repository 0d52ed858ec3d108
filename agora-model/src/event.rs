//! Events in canonical shape, with the capacity-derived attributes.

use crate::media::{classify_url, MediaKind};
use crate::resolve::{
    passthrough, resolve_bool, resolve_opt_str, resolve_str, resolve_str_list, resolve_u32,
};
use crate::Canonical;
use agora_types::{RawRecord, RecordId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Events carry at most this many keywords; longer lists are truncated on
/// write.
pub const MAX_KEYWORDS: usize = 4;

/// Capacity assumed when neither dialect carries one.
const DEFAULT_CAPACITY: u32 = 100;

const CONSUMED: [&str; 38] = [
    "titre",
    "title",
    "description_long",
    "description",
    "statut",
    "status",
    "date_debut",
    "date",
    "date_fin",
    "end_date",
    "endDate",
    "heure",
    "time",
    "lieu",
    "location",
    "type_event_id",
    "event_types",
    "type",
    "keywords",
    "tags",
    "tagsList",
    "max_participants",
    "maxParticipants",
    "participants_count",
    "current_participants",
    "currentParticipants",
    "gratuit",
    "is_free",
    "isFree",
    "prix",
    "price",
    "image_url",
    "image",
    "imageUrl",
    "media_url",
    "media",
    "created_at",
    "updated_at",
];

/// Whether an event lies ahead or behind. Two dialect spellings map onto
/// the same two states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Upcoming,
    Past,
}

impl EventStatus {
    /// Parses either dialect spelling.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "a_venir" | "upcoming" => Some(EventStatus::Upcoming),
            "termine" | "past" => Some(EventStatus::Past),
            _ => None,
        }
    }

    /// The localized value stored in `statut`.
    #[must_use]
    pub fn as_localized(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "a_venir",
            EventStatus::Past => "termine",
        }
    }
}

/// An event in canonical shape.
///
/// `registered` is maintained by the remote store as participants sign up
/// and is never part of a write payload; `event_type_name` is a join
/// expansion, likewise read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub status: EventStatus,
    pub start_date: String,
    pub end_date: Option<String>,
    pub time: String,
    pub location: String,
    pub event_type_id: Option<RecordId>,
    pub event_type_name: Option<String>,
    pub keywords: Vec<String>,
    /// Participant capacity; 0 means unlimited.
    pub capacity: u32,
    /// Current participant count, server-maintained.
    pub registered: u32,
    pub free: bool,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub media_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    /// Unmodeled input fields, carried through to the write payload.
    pub extra: Map<String, Value>,
}

impl Default for Event {
    /// An empty form with the admin console's defaults.
    fn default() -> Self {
        Self {
            id: RecordId::default(),
            title: String::new(),
            description: String::new(),
            status: EventStatus::Upcoming,
            start_date: String::new(),
            end_date: None,
            time: String::new(),
            location: String::new(),
            event_type_id: None,
            event_type_name: None,
            keywords: Vec::new(),
            capacity: DEFAULT_CAPACITY,
            registered: 0,
            free: true,
            price: None,
            image_url: None,
            media_url: None,
            created_at: String::new(),
            updated_at: String::new(),
            extra: Map::new(),
        }
    }
}

impl Event {
    /// Remaining capacity, computed from normalized fields only.
    /// Undefined (`None`) when capacity is 0, i.e. unlimited.
    #[must_use]
    pub fn available_spots(&self) -> Option<u32> {
        if self.capacity == 0 {
            None
        } else {
            Some(self.capacity.saturating_sub(self.registered))
        }
    }

    /// An unlimited event is never full.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.capacity != 0 && self.registered >= self.capacity
    }

    /// True when no capacity bound applies.
    #[must_use]
    pub fn is_unlimited(&self) -> bool {
        self.capacity == 0
    }

    #[must_use]
    pub fn is_free(&self) -> bool {
        self.free
    }

    /// The media URL a card renders, preferring the playable one.
    #[must_use]
    pub fn resolved_media_url(&self) -> Option<&str> {
        non_empty(&self.media_url).or_else(|| non_empty(&self.image_url))
    }

    /// What the resolved media URL renders as.
    #[must_use]
    pub fn media_kind(&self) -> MediaKind {
        classify_url(self.resolved_media_url())
    }
}

impl Canonical for Event {
    fn from_raw(raw: &RawRecord) -> Self {
        let event_type_name = raw
            .get_nested_str("event_types", "nom")
            .map(str::to_string)
            .or_else(|| resolve_opt_str(raw, &["type"]));

        Self {
            id: raw.id(),
            title: resolve_str(raw, &["titre", "title"], "Événement"),
            description: resolve_str(raw, &["description_long", "description"], ""),
            status: resolve_opt_str(raw, &["statut", "status"])
                .and_then(|v| EventStatus::parse(&v))
                .unwrap_or_default(),
            start_date: resolve_str(raw, &["date_debut", "date"], ""),
            end_date: resolve_opt_str(raw, &["date_fin", "end_date", "endDate"]),
            time: resolve_str(raw, &["heure", "time"], ""),
            location: resolve_str(raw, &["lieu", "location"], ""),
            event_type_id: resolve_opt_str(raw, &["type_event_id"]).map(RecordId::from),
            event_type_name,
            keywords: resolve_str_list(raw, &["keywords", "tags", "tagsList"]),
            capacity: resolve_u32(raw, &["max_participants", "maxParticipants"], DEFAULT_CAPACITY),
            registered: resolve_u32(
                raw,
                &["participants_count", "current_participants", "currentParticipants"],
                0,
            ),
            free: resolve_bool(raw, &["gratuit", "is_free", "isFree"], true),
            price: resolve_opt_str(raw, &["prix", "price"]),
            image_url: resolve_opt_str(raw, &["image_url", "image", "imageUrl"]),
            media_url: resolve_opt_str(raw, &["media_url", "media"])
                .or_else(|| raw.get_nested_str("media", "url").map(str::to_string)),
            created_at: resolve_str(raw, &["created_at"], ""),
            updated_at: resolve_str(raw, &["updated_at"], ""),
            extra: passthrough(raw, &CONSUMED),
        }
    }

    fn to_payload(&self) -> RawRecord {
        let mut keywords = self.keywords.clone();
        keywords.truncate(MAX_KEYWORDS);

        let mut payload = RawRecord::new();
        payload.fields = self.extra.clone();
        payload
            .set("titre", self.title.clone())
            .set("description_long", self.description.clone())
            .set("statut", self.status.as_localized())
            .set("date_debut", self.start_date.clone())
            .set("heure", self.time.clone())
            .set("lieu", self.location.clone())
            .set("keywords", keywords)
            .set("max_participants", self.capacity)
            .set("gratuit", self.free);
        if let Some(date) = &self.end_date {
            payload.set("date_fin", date.clone());
        }
        if let Some(id) = &self.event_type_id {
            payload.set("type_event_id", id.as_str());
        }
        if let Some(price) = &self.price {
            payload.set("prix", price.clone());
        }
        if let Some(url) = &self.image_url {
            payload.set("image_url", url.clone());
        }
        if let Some(url) = &self.media_url {
            payload.set("media_url", url.clone());
        }
        payload
    }

    fn id(&self) -> &RecordId {
        &self.id
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
