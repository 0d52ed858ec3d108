//! Media classification.
//!
//! A purely syntactic heuristic over URL strings: no network, no header
//! inspection, never fails. The same classifier drives both rendering
//! (video player vs image vs placeholder) and admin form population.

use agora_types::RawRecord;
use serde::{Deserialize, Serialize};

/// File extensions treated as playable video, compared case-insensitively
/// against the URL path with any query string stripped.
const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "webm", "ogg", "mov"];

/// Candidate media fields of a record, in display priority order. The
/// first non-empty candidate is the one classified and rendered.
pub const MEDIA_URL_KEYS: [&str; 5] = ["media_url", "media", "image_url", "image", "imageUrl"];

/// What a URL renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    None,
}

/// The stored kind of an uploaded media file, inferred from its declared
/// MIME type at upload time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Image,
    Video,
    Audio,
    Document,
}

impl MediaType {
    /// The localized-dialect value stored in the `type` column.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
            MediaType::Audio => "audio",
            MediaType::Document => "document",
        }
    }

    /// Parses a stored kind; unknown values read as `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "image" => Some(MediaType::Image),
            "video" => Some(MediaType::Video),
            "audio" => Some(MediaType::Audio),
            "document" => Some(MediaType::Document),
            _ => None,
        }
    }
}

/// True when the URL ends in a video extension (optional query string
/// permitted) or contains a video-indicating path segment.
fn is_video_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    let path = lower.split(['?', '#']).next().unwrap_or("");
    let has_video_ext = path
        .rfind('.')
        .is_some_and(|dot| VIDEO_EXTENSIONS.contains(&&path[dot + 1..]));
    has_video_ext || lower.contains("video/")
}

/// Classifies a URL. Video by the extension/path heuristic, Image for any
/// other non-empty URL, None for an absent or empty one. Total: the URL
/// is never fetched and malformed input cannot fail.
#[must_use]
pub fn classify_url(url: Option<&str>) -> MediaKind {
    match url {
        Some(u) if u.is_empty() => MediaKind::None,
        Some(u) if is_video_url(u) => MediaKind::Video,
        Some(_) => MediaKind::Image,
        None => MediaKind::None,
    }
}

/// Infers the stored kind of an upload from its declared MIME type.
/// Anything outside image/video/audio files as a document.
#[must_use]
pub fn classify_mime(mime: &str) -> MediaType {
    let lower = mime.to_ascii_lowercase();
    if lower.starts_with("image/") {
        MediaType::Image
    } else if lower.starts_with("video/") {
        MediaType::Video
    } else if lower.starts_with("audio/") {
        MediaType::Audio
    } else {
        MediaType::Document
    }
}

/// Picks the record's media URL: the first non-empty candidate in
/// [`MEDIA_URL_KEYS`] order, also accepting a joined `media.url` object
/// in the `media` slot.
pub fn resolve_media_url(raw: &RawRecord) -> Option<String> {
    for key in MEDIA_URL_KEYS {
        if let Some(value) = raw.get_str(key) {
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
        if key == "media" {
            if let Some(url) = raw.get_nested_str("media", "url") {
                if !url.is_empty() {
                    return Some(url.to_string());
                }
            }
        }
    }
    None
}
