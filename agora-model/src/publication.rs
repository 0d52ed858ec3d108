//! Publications (news articles) in canonical shape.

use crate::forms::ValidationError;
use crate::media::{classify_url, MediaKind};
use crate::resolve::{passthrough, resolve_bool, resolve_opt_str, resolve_str};
use crate::Canonical;
use agora_types::{RawRecord, RecordId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Candidate keys consumed by the normalizer. Both dialects plus the
/// read-only join fields the admin queries expand inline.
const CONSUMED: [&str; 30] = [
    "slug",
    "titre",
    "title",
    "chapeau",
    "summary",
    "contenu_long",
    "content",
    "type_media_principal",
    "type",
    "categorie_id",
    "category_id",
    "equipe_id",
    "team_id",
    "categorie_nom",
    "category",
    "categories",
    "equipe_nom",
    "teams",
    "author",
    "featured",
    "published",
    "date_publication",
    "date",
    "image_url",
    "image",
    "imageUrl",
    "media_url",
    "media",
    "created_at",
    "updated_at",
];

/// The declared primary medium of a publication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryMedia {
    #[default]
    Text,
    Image,
    Video,
    Audio,
}

impl PrimaryMedia {
    /// Parses either dialect, including the retired spellings `text` and
    /// `photo` still present on old records.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "texte" | "text" => Some(PrimaryMedia::Text),
            "image" | "photo" => Some(PrimaryMedia::Image),
            "video" => Some(PrimaryMedia::Video),
            "audio" => Some(PrimaryMedia::Audio),
            _ => None,
        }
    }

    /// The localized value stored in `type_media_principal`.
    #[must_use]
    pub fn as_localized(&self) -> &'static str {
        match self {
            PrimaryMedia::Text => "texte",
            PrimaryMedia::Image => "image",
            PrimaryMedia::Video => "video",
            PrimaryMedia::Audio => "audio",
        }
    }
}

/// A publication in canonical shape.
///
/// `slug`, the display names and `updated_at` are server-computed and never
/// written back; `author` exists only in the legacy display dialect and is
/// likewise read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub id: RecordId,
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub primary_media: PrimaryMedia,
    pub category_id: RecordId,
    pub team_id: RecordId,
    pub category_name: Option<String>,
    pub team_name: Option<String>,
    pub author: Option<String>,
    pub featured: bool,
    pub published: bool,
    pub published_at: Option<String>,
    pub image_url: Option<String>,
    pub media_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    /// Unmodeled input fields, carried through to the write payload.
    pub extra: Map<String, Value>,
}

impl Publication {
    /// An empty form with the admin console's defaults.
    #[must_use]
    pub fn draft() -> Self {
        Self {
            published: true,
            ..Self::default()
        }
    }

    /// The category name to display, if any dialect carried one.
    #[must_use]
    pub fn display_category(&self) -> Option<&str> {
        self.category_name.as_deref()
    }

    /// The byline: the team name when joined in, else the legacy author.
    #[must_use]
    pub fn display_author(&self) -> Option<&str> {
        self.team_name.as_deref().or(self.author.as_deref())
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

    /// Category and team references are mandatory once persisted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if self.category_id.is_empty() {
            missing.push("categorie_id".to_string());
        }
        if self.team_id.is_empty() {
            missing.push("equipe_id".to_string());
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(missing))
        }
    }
}

impl Canonical for Publication {
    fn from_raw(raw: &RawRecord) -> Self {
        let primary_media = resolve_opt_str(raw, &["type_media_principal", "type"])
            .and_then(|v| PrimaryMedia::parse(&v))
            .unwrap_or_default();

        let category_name = resolve_opt_str(raw, &["categorie_nom"])
            .or_else(|| raw.get_nested_str("categories", "nom").map(str::to_string))
            .or_else(|| resolve_opt_str(raw, &["category"]));

        let team_name = resolve_opt_str(raw, &["equipe_nom"])
            .or_else(|| raw.get_nested_str("teams", "nom").map(str::to_string));

        Self {
            id: raw.id(),
            slug: resolve_str(raw, &["slug"], ""),
            title: resolve_str(raw, &["titre", "title"], ""),
            summary: resolve_str(raw, &["chapeau", "summary"], ""),
            body: resolve_str(raw, &["contenu_long", "content"], ""),
            primary_media,
            category_id: resolve_str(raw, &["categorie_id", "category_id"], "").into(),
            team_id: resolve_str(raw, &["equipe_id", "team_id"], "").into(),
            category_name,
            team_name,
            author: resolve_opt_str(raw, &["author"]),
            featured: resolve_bool(raw, &["featured"], false),
            published: resolve_bool(raw, &["published"], true),
            published_at: resolve_opt_str(raw, &["date_publication", "date"]),
            image_url: resolve_opt_str(raw, &["image_url", "image", "imageUrl"]),
            media_url: resolve_opt_str(raw, &["media_url", "media"])
                .or_else(|| raw.get_nested_str("media", "url").map(str::to_string)),
            created_at: resolve_str(raw, &["created_at"], ""),
            updated_at: resolve_str(raw, &["updated_at"], ""),
            extra: passthrough(raw, &CONSUMED),
        }
    }

    fn to_payload(&self) -> RawRecord {
        let mut payload = RawRecord::new();
        payload.fields = self.extra.clone();
        payload
            .set("titre", self.title.clone())
            .set("chapeau", self.summary.clone())
            .set("contenu_long", self.body.clone())
            .set("type_media_principal", self.primary_media.as_localized())
            .set("categorie_id", self.category_id.as_str())
            .set("equipe_id", self.team_id.as_str())
            .set("featured", self.featured)
            .set("published", self.published);
        if let Some(date) = &self.published_at {
            payload.set("date_publication", date.clone());
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
