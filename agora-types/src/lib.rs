//! Core type definitions for the agora content site.
//!
//! This crate defines the storage-facing types shared by the normalization
//! and synchronization layers:
//! - [`RawRecord`] — a stored record as the remote store returns it, in
//!   either naming dialect, with unknown fields preserved verbatim
//! - [`RecordId`] — opaque server-assigned identifier
//! - [`Collection`] — the fixed set of remote collections
//!
//! Canonical view models (publications, events, …) belong in `agora-model`,
//! not here.

mod collection;
mod ids;
mod record;

pub use collection::Collection;
pub use ids::RecordId;
pub use record::RawRecord;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown collection: {0}")]
    UnknownCollection(String),
}
