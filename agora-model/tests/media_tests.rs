use agora_model::media::{classify_mime, classify_url, resolve_media_url, MediaKind, MediaType};
use agora_types::RawRecord;
use serde_json::json;

fn record(value: serde_json::Value) -> RawRecord {
    serde_json::from_value(value).unwrap()
}

// ── URL classification ──────────────────────────────────────────

#[test]
fn video_extensions() {
    for url in ["a.mp4", "b.webm", "c.ogg", "d.mov"] {
        assert_eq!(classify_url(Some(url)), MediaKind::Video, "{url}");
    }
}

#[test]
fn video_extension_with_query_string() {
    assert_eq!(classify_url(Some("a.mp4?x=1")), MediaKind::Video);
    assert_eq!(classify_url(Some("https://cdn/x.webm?token=abc&d=2")), MediaKind::Video);
}

#[test]
fn video_path_segment() {
    assert_eq!(classify_url(Some("https://x/video/abc")), MediaKind::Video);
    assert_eq!(classify_url(Some("https://x/VIDEO/abc")), MediaKind::Video);
}

#[test]
fn case_insensitive_extensions() {
    assert_eq!(classify_url(Some("clip.MP4")), MediaKind::Video);
    assert_eq!(classify_url(Some("clip.Mov?x=1")), MediaKind::Video);
}

#[test]
fn images_are_the_non_empty_fallback() {
    assert_eq!(classify_url(Some("a.jpg")), MediaKind::Image);
    assert_eq!(classify_url(Some("a.png?x=1")), MediaKind::Image);
    assert_eq!(classify_url(Some("https://x/photo")), MediaKind::Image);
}

#[test]
fn absent_or_empty_is_none() {
    assert_eq!(classify_url(None), MediaKind::None);
    assert_eq!(classify_url(Some("")), MediaKind::None);
}

#[test]
fn query_string_does_not_hide_the_real_extension() {
    // The query mentions a video file but the path is an image.
    assert_eq!(classify_url(Some("a.jpg?next=b.mp4")), MediaKind::Image);
}

// ── Candidate priority ──────────────────────────────────────────

#[test]
fn media_url_wins_over_every_image_key() {
    let raw = record(json!({
        "media_url": "https://x/clip.mp4",
        "media": "https://x/other.mp4",
        "image_url": "https://x/a.jpg",
        "image": "https://x/b.jpg",
        "imageUrl": "https://x/c.jpg"
    }));
    assert_eq!(resolve_media_url(&raw).as_deref(), Some("https://x/clip.mp4"));
}

#[test]
fn empty_candidates_are_skipped() {
    let raw = record(json!({
        "media_url": "",
        "image_url": "https://x/a.jpg"
    }));
    assert_eq!(resolve_media_url(&raw).as_deref(), Some("https://x/a.jpg"));
}

#[test]
fn legacy_keys_are_reached_in_order() {
    let raw = record(json!({
        "image": "https://x/b.jpg",
        "imageUrl": "https://x/c.jpg"
    }));
    assert_eq!(resolve_media_url(&raw).as_deref(), Some("https://x/b.jpg"));
}

#[test]
fn joined_media_object_counts_in_the_media_slot() {
    let raw = record(json!({
        "media": { "id": "m1", "url": "https://x/clip.mov" },
        "image_url": "https://x/a.jpg"
    }));
    assert_eq!(resolve_media_url(&raw).as_deref(), Some("https://x/clip.mov"));
}

#[test]
fn no_candidates_yields_none() {
    assert_eq!(resolve_media_url(&record(json!({}))), None);
}

// ── MIME classification ─────────────────────────────────────────

#[test]
fn mime_prefixes() {
    assert_eq!(classify_mime("image/webp"), MediaType::Image);
    assert_eq!(classify_mime("video/quicktime"), MediaType::Video);
    assert_eq!(classify_mime("audio/ogg"), MediaType::Audio);
    assert_eq!(classify_mime("application/pdf"), MediaType::Document);
    assert_eq!(classify_mime("text/plain"), MediaType::Document);
}

#[test]
fn mime_is_case_insensitive() {
    assert_eq!(classify_mime("IMAGE/PNG"), MediaType::Image);
}

#[test]
fn stored_kind_serde_spelling() {
    assert_eq!(serde_json::to_value(MediaType::Document).unwrap(), json!("document"));
    assert_eq!(MediaType::parse("audio"), Some(MediaType::Audio));
    assert_eq!(MediaType::parse("autre"), None);
}
