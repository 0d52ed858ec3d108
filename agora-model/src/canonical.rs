//! The seam between view models and the synchronizer.

use agora_types::{RawRecord, RecordId};

/// A canonical view model that can be produced from a raw stored record
/// and turned back into a write payload.
///
/// `from_raw` is total: a malformed record degrades field by field to the
/// documented defaults and never fails. `to_payload` emits the localized
/// persistence dialect, excludes the id and every server-computed field,
/// and carries unmodeled input fields through verbatim.
pub trait Canonical: Clone + Send + Sync + 'static {
    /// Normalizes a raw record into the canonical shape.
    fn from_raw(raw: &RawRecord) -> Self;

    /// Builds the localized-dialect write payload.
    fn to_payload(&self) -> RawRecord;

    /// The record's id; empty for a draft that was never persisted.
    fn id(&self) -> &RecordId;
}
