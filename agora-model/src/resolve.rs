//! Generic per-field resolution over ordered candidate keys.
//!
//! Every logical attribute of a view model is resolved through one of the
//! functions below, fed with a fixed candidate list (localized key first,
//! then legacy key(s)) and a default. Consumers never reach into raw
//! dialect fields directly; derived numbers are computed from resolved
//! values only.
//!
//! Two distinct fallback semantics exist and must not be mixed up:
//!
//! - strings fall through on *emptiness* (an empty string is treated as
//!   absent, matching the display code this replaces),
//! - booleans and numbers fall through on *absence only* — an explicit
//!   `false` or `0` from either dialect wins over the default.

use agora_types::RawRecord;
use serde_json::{Map, Value};

/// Resolves a string attribute; empty strings are treated as absent.
pub fn resolve_str(raw: &RawRecord, keys: &[&str], default: &str) -> String {
    resolve_opt_str(raw, keys).unwrap_or_else(|| default.to_string())
}

/// Resolves an optional string attribute; empty strings are treated as absent.
pub fn resolve_opt_str(raw: &RawRecord, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| raw.get_str(key))
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// Resolves a boolean attribute.
///
/// The first candidate carrying a boolean wins, even when it is `false`;
/// only true absence (no candidate holds a boolean) falls to the default.
pub fn resolve_bool(raw: &RawRecord, keys: &[&str], default: bool) -> bool {
    keys.iter()
        .find_map(|key| raw.get_bool(key))
        .unwrap_or(default)
}

/// Resolves a non-negative integer attribute.
///
/// Same absence-only fallback as [`resolve_bool`]: an explicit `0` wins.
/// Malformed values (strings, floats, negatives) read as absent.
pub fn resolve_u32(raw: &RawRecord, keys: &[&str], default: u32) -> u32 {
    keys.iter()
        .find_map(|key| raw.get_u64(key))
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(default)
}

/// Resolves a list-of-strings attribute; the first candidate holding an
/// array wins, non-string elements are skipped. Absence yields an empty list.
pub fn resolve_str_list(raw: &RawRecord, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .find_map(|key| raw.get_str_array(key))
        .unwrap_or_default()
}

/// The unmodeled remainder of a record: every field except the consumed
/// candidate keys. This is what `to_payload` carries through verbatim so
/// repeated normalize → payload cycles never drop data.
pub fn passthrough(raw: &RawRecord, consumed: &[&str]) -> Map<String, Value> {
    raw.fields
        .iter()
        .filter(|(key, _)| !consumed.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
