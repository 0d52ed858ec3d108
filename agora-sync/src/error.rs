//! Error types for the synchronization layer.

use agora_model::ValidationError;
use agora_types::{Collection, RecordId};
use thiserror::Error;

/// Result type for synchronization operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors a synchronizer operation can surface. Exactly one is reported
/// per failed operation; nothing is retried automatically.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The remote call failed in transport or was rejected. No error
    /// payload shape is assumed beyond the status line.
    #[error("network error: {0}")]
    Network(String),

    /// A record or payload could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A submission was rejected locally, before any remote call.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The console is not authenticated; no data is loaded or written.
    #[error("authentication required")]
    Auth,

    /// An operation targeted a record the cache does not hold.
    #[error("{collection} record {id} is not in the cache")]
    NotCached { collection: Collection, id: RecordId },

    /// Deleting this record would orphan records that still reference it.
    #[error("{collection} record {id} is still referenced by {count} record(s)")]
    StillReferenced {
        collection: Collection,
        id: RecordId,
        count: usize,
    },
}
