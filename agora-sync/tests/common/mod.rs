#![allow(dead_code)]
//! In-memory [`RemoteStore`] used by the synchronizer and console tests:
//! records every call, injects failures per operation, and can delay
//! update responses to exercise interleavings under paused time.

use agora_model::classify_mime;
use agora_sync::{AdminAuth, MediaUpload, RemoteStore, SyncError, SyncResult};
use agora_types::{Collection, RawRecord, RecordId};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub const ADMIN_SECRET: &str = "sesame";

#[derive(Default)]
struct MockState {
    rows: HashMap<Collection, Vec<RawRecord>>,
    calls: Vec<(String, Collection)>,
    failing: HashSet<String>,
    update_delays: VecDeque<Duration>,
}

/// A controllable fake remote store.
#[derive(Default)]
pub struct MockStore {
    state: Mutex<MockState>,
    id_counter: AtomicU64,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a collection, newest first, as the server would
    /// return it.
    pub fn seed(&self, collection: Collection, rows: Vec<RawRecord>) {
        self.state.lock().unwrap().rows.insert(collection, rows);
    }

    /// Makes the named operation (`"create"`, `"update"`, …) fail until
    /// cleared.
    pub fn fail_on(&self, op: &str) {
        self.state.lock().unwrap().failing.insert(op.to_string());
    }

    pub fn clear_failures(&self) {
        self.state.lock().unwrap().failing.clear();
    }

    /// Queues a processing delay for the next update call; delays are
    /// consumed in FIFO order.
    pub fn push_update_delay(&self, delay: Duration) {
        self.state.lock().unwrap().update_delays.push_back(delay);
    }

    /// All `(operation, collection)` pairs seen so far, in order.
    pub fn calls(&self) -> Vec<(String, Collection)> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self, op: &str, collection: Collection) -> usize {
        self.calls()
            .iter()
            .filter(|(o, c)| o == op && *c == collection)
            .count()
    }

    /// The store's current rows for a collection.
    pub fn rows(&self, collection: Collection) -> Vec<RawRecord> {
        self.state
            .lock()
            .unwrap()
            .rows
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    fn make_id(&self) -> String {
        format!("srv-{}", self.id_counter.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn record_call(&self, op: &str, collection: Collection) -> SyncResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push((op.to_string(), collection));
        if state.failing.contains(op) {
            Err(SyncError::Network(format!("{op} refused by mock")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RemoteStore for MockStore {
    async fn fetch_all(&self, collection: Collection) -> SyncResult<Vec<RawRecord>> {
        self.record_call("fetch_all", collection)?;
        Ok(self.rows(collection))
    }

    async fn create(&self, collection: Collection, payload: &RawRecord) -> SyncResult<RawRecord> {
        self.record_call("create", collection)?;

        let mut row = payload.clone();
        row.id = Some(RecordId::new(self.make_id()));
        row.set("created_at", "2024-01-01T00:00:00Z")
            .set("updated_at", "2024-01-01T00:00:00Z");

        self.state
            .lock()
            .unwrap()
            .rows
            .entry(collection)
            .or_default()
            .insert(0, row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &RecordId,
        payload: &RawRecord,
    ) -> SyncResult<RawRecord> {
        self.record_call("update", collection)?;

        let delay = self.state.lock().unwrap().update_delays.pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock().unwrap();
        let row = state
            .rows
            .entry(collection)
            .or_default()
            .iter_mut()
            .find(|row| row.id() == *id)
            .ok_or_else(|| SyncError::Network(format!("no row {id}")))?;

        for (key, value) in &payload.fields {
            row.set(key.clone(), value.clone());
        }
        row.set("updated_at", "2024-02-01T00:00:00Z");
        Ok(row.clone())
    }

    async fn delete(&self, collection: Collection, id: &RecordId) -> SyncResult<()> {
        self.record_call("delete", collection)?;

        let mut state = self.state.lock().unwrap();
        let rows = state.rows.entry(collection).or_default();
        let before = rows.len();
        rows.retain(|row| row.id() != *id);
        if rows.len() == before {
            return Err(SyncError::Network(format!("no row {id}")));
        }
        Ok(())
    }

    async fn upload_media(&self, upload: MediaUpload) -> SyncResult<RawRecord> {
        self.record_call("upload", Collection::Media)?;

        let mut row = RawRecord::new();
        row.set("nom_fichier", upload.file_name.clone())
            .set("url", format!("https://cdn.example.org/{}", upload.file_name))
            .set("type", classify_mime(&upload.mime_type).as_str())
            .set("taille", upload.content.len() as u64)
            .set("mime_type", upload.mime_type.clone())
            .set("uploaded_by", upload.uploaded_by.clone())
            .set("created_at", "2024-01-01T00:00:00Z");
        row.id = Some(RecordId::new(self.make_id()));

        self.state
            .lock()
            .unwrap()
            .rows
            .entry(Collection::Media)
            .or_default()
            .insert(0, row.clone());
        Ok(row)
    }
}

#[async_trait]
impl AdminAuth for MockStore {
    async fn login(&self, secret: &str) -> SyncResult<bool> {
        self.record_call("login", Collection::AdminLogs)?;
        Ok(secret == ADMIN_SECRET)
    }
}

/// Builds an event row in the localized dialect.
pub fn event_row(id: &str, title: &str) -> RawRecord {
    let mut row = RawRecord::with_id(id);
    row.set("titre", title)
        .set("statut", "a_venir")
        .set("lieu", "Salle A")
        .set("max_participants", 50u64)
        .set("participants_count", 0u64)
        .set("gratuit", true)
        .set("created_at", "2024-01-01T00:00:00Z")
        .set("updated_at", "2024-01-01T00:00:00Z");
    row
}
