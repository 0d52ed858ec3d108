//! Canonical view models for the agora content site.
//!
//! The remote store keeps records in two overlapping naming dialects: the
//! localized persistence schema (`titre`, `lieu`, `gratuit`, …) and the
//! legacy display schema (`title`, `location`, `is_free`, …). This crate
//! owns the one place where those dialects are reconciled:
//!
//! - [`resolve`] — generic per-field resolution over ordered candidate keys
//! - [`media`] — the syntactic media classifier (video / image / none)
//! - one canonical struct per entity, each with `from_raw` (total, never
//!   mutates its input) and `to_payload` (localized-dialect write shape,
//!   unmodeled fields passed through)
//! - [`forms`] — local validation for the contact and registration flows
//!
//! Everything here is pure; all I/O lives in `agora-sync`.

mod canonical;
mod dates;
mod event;
pub mod forms;
mod log;
pub mod media;
mod media_file;
mod message;
mod participant;
mod publication;
pub mod resolve;
mod support;
mod taxonomy;

pub use canonical::Canonical;
pub use dates::format_date_fr;
pub use event::{Event, EventStatus};
pub use forms::{ContactForm, RegistrationForm, ValidationError};
pub use log::AdminLog;
pub use media::{classify_mime, classify_url, resolve_media_url, MediaKind, MediaType};
pub use media_file::MediaFile;
pub use message::{Message, MessageOrigin};
pub use participant::Participant;
pub use publication::{PrimaryMedia, Publication};
pub use support::SupportInfo;
pub use taxonomy::Taxonomy;
