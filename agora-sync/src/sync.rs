//! Per-collection cache and CRUD synchronization.
//!
//! An [`EntitySync`] owns the in-memory cache of one collection inside an
//! admin session and keeps it consistent with the remote store. The cache
//! only ever reflects acknowledged remote state: a record appears after
//! the store confirmed its creation, is replaced by the store's returned
//! representation on update (never by the locally submitted payload), and
//! disappears only once a delete is acknowledged. Any failure leaves the
//! cache exactly as it was.
//!
//! Writes to the same record id serialize behind a per-id token so that
//! back-to-back edits apply in issue order; a slower earlier response can
//! never clobber a newer edit. Writes to distinct ids and all reads
//! proceed independently.

use crate::error::SyncResult;
use crate::store::RemoteStore;
use agora_model::Canonical;
use agora_types::{Collection, RecordId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::{debug, info, warn};

/// Cache + CRUD for one remote collection.
pub struct EntitySync<T: Canonical> {
    collection: Collection,
    store: Arc<dyn RemoteStore>,
    cache: RwLock<Vec<T>>,
    /// One mutual-exclusion token per record id with a write in flight.
    /// Tokens are FIFO, so queued writes apply in issue order.
    write_locks: Mutex<HashMap<RecordId, Arc<Mutex<()>>>>,
}

impl<T: Canonical> EntitySync<T> {
    /// Creates an empty synchronizer for a collection. The cache stays
    /// empty until the first [`reload`](Self::reload).
    pub fn new(collection: Collection, store: Arc<dyn RemoteStore>) -> Self {
        Self {
            collection,
            store,
            cache: RwLock::new(Vec::new()),
            write_locks: Mutex::new(HashMap::new()),
        }
    }

    /// The collection this synchronizer owns.
    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// A snapshot of the cache, in order. Never blocks on writes and
    /// never exposes a half-updated collection.
    pub async fn list(&self) -> Vec<T> {
        self.cache.read().await.clone()
    }

    /// Looks up one cached record by id.
    pub async fn get(&self, id: &RecordId) -> Option<T> {
        self.cache
            .read()
            .await
            .iter()
            .find(|record| record.id() == id)
            .cloned()
    }

    /// Number of cached records.
    pub async fn len(&self) -> usize {
        self.cache.read().await.len()
    }

    /// True when nothing is cached.
    pub async fn is_empty(&self) -> bool {
        self.cache.read().await.is_empty()
    }

    /// Replaces the whole cache with the store's current result set.
    /// The server's ordering wins; the client merges nothing. On failure
    /// the previous cache contents stay visible.
    pub async fn reload(&self) -> SyncResult<()> {
        let raw = self.store.fetch_all(self.collection).await?;
        let records: Vec<T> = raw.iter().map(T::from_raw).collect();

        info!("Loaded {} {} records", records.len(), self.collection);
        *self.cache.write().await = records;
        Ok(())
    }

    /// Creates a record from canonical form state. On success the store's
    /// returned representation (server id, server-computed fields) is
    /// inserted at the head of the cache; on failure the cache is
    /// untouched and the error surfaces once.
    pub async fn create(&self, input: &T) -> SyncResult<T> {
        let payload = input.to_payload();
        let raw = self.store.create(self.collection, &payload).await?;
        let created = T::from_raw(&raw);

        debug!("Created {} record {}", self.collection, created.id());
        self.cache.write().await.insert(0, created.clone());
        Ok(created)
    }

    /// Updates a record. Serialized per id; on success the matching cached
    /// record is replaced in place — position preserved — with the store's
    /// representation, so server-computed fields stay correct. On failure
    /// the stale record stays visible.
    pub async fn update(&self, id: &RecordId, input: &T) -> SyncResult<T> {
        let guard = self.lock_record(id).await;

        let payload = input.to_payload();
        let result = self.store.update(self.collection, id, &payload).await;

        let outcome = match result {
            Ok(raw) => {
                let updated = T::from_raw(&raw);
                let mut cache = self.cache.write().await;
                match cache.iter_mut().find(|record| record.id() == id) {
                    Some(slot) => *slot = updated.clone(),
                    None => warn!(
                        "Updated {} record {} is no longer cached",
                        self.collection, id
                    ),
                }
                Ok(updated)
            }
            Err(e) => Err(e),
        };

        drop(guard);
        self.release_record(id).await;
        outcome
    }

    /// Deletes a record. Serialized per id; the record leaves the cache
    /// only after the store acknowledged the delete, without reordering
    /// the survivors. A rejected delete leaves it visible.
    pub async fn delete(&self, id: &RecordId) -> SyncResult<()> {
        let guard = self.lock_record(id).await;

        let result = self.store.delete(self.collection, id).await;
        if result.is_ok() {
            self.cache.write().await.retain(|record| record.id() != id);
            debug!("Removed {} record {} from cache", self.collection, id);
        }

        drop(guard);
        self.release_record(id).await;
        result
    }

    /// Inserts a record that was persisted out of band (the upload flow
    /// returns an already-acknowledged row) at the head of the cache.
    pub async fn adopt(&self, record: T) {
        self.cache.write().await.insert(0, record);
    }

    /// Acquires this id's write token, creating it on first use.
    async fn lock_record(&self, id: &RecordId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.write_locks.lock().await;
            locks
                .entry(id.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Drops the id's token once no writer holds or awaits it.
    async fn release_record(&self, id: &RecordId) {
        let mut locks = self.write_locks.lock().await;
        if let Some(lock) = locks.get(id) {
            if Arc::strong_count(lock) == 1 {
                locks.remove(id);
            }
        }
    }
}
