//! Remote store abstraction.
//!
//! The synchronizer talks to one authoritative remote store through this
//! trait; the production implementation is [`crate::RestStore`], tests use
//! in-memory fakes. Every call suspends the caller until the store
//! responds; a failure leaves whatever the caller cached untouched.

use crate::error::SyncResult;
use agora_types::{Collection, RawRecord, RecordId};
use async_trait::async_trait;

/// A file handed to [`RemoteStore::upload_media`]. The stored media kind
/// is inferred from the declared MIME type, never from the bytes.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub file_name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
    pub uploaded_by: String,
}

/// Request/response access to the authoritative remote store.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetches the current full result set of a collection.
    async fn fetch_all(&self, collection: Collection) -> SyncResult<Vec<RawRecord>>;

    /// Creates a record; the store assigns the id and timestamps and
    /// returns its own representation.
    async fn create(&self, collection: Collection, payload: &RawRecord) -> SyncResult<RawRecord>;

    /// Updates a record and returns the store's representation, including
    /// server-computed fields.
    async fn update(
        &self,
        collection: Collection,
        id: &RecordId,
        payload: &RawRecord,
    ) -> SyncResult<RawRecord>;

    /// Deletes a record. `Ok(())` is the acknowledgment the cache layer
    /// waits for before forgetting the record.
    async fn delete(&self, collection: Collection, id: &RecordId) -> SyncResult<()>;

    /// Stores a blob and returns the persisted media row (with URL).
    async fn upload_media(&self, upload: MediaUpload) -> SyncResult<RawRecord>;
}

/// The single-secret gate in front of the administration session.
#[async_trait]
pub trait AdminAuth: Send + Sync {
    /// Checks the shared admin secret. `Ok(false)` is a wrong secret;
    /// `Err` is a transport failure.
    async fn login(&self, secret: &str) -> SyncResult<bool>;
}
