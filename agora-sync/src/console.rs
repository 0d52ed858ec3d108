//! The administration console: every collection's synchronizer behind one
//! authenticated session, plus the cross-collection flows (uploads,
//! registration, referential-integrity checks, action log).

use crate::error::{SyncError, SyncResult};
use crate::store::{AdminAuth, MediaUpload, RemoteStore};
use crate::sync::EntitySync;
use agora_model::{
    AdminLog, Canonical, ContactForm, Event, MediaFile, Message, Participant, Publication,
    RegistrationForm, SupportInfo, Taxonomy,
};
use agora_types::{Collection, RecordId};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// One authenticated administration session over the remote store.
///
/// Construction is cheap and performs no I/O; nothing is loaded until
/// [`login`](Self::login) succeeds and [`load_all`](Self::load_all) runs.
pub struct AdminConsole {
    store: Arc<dyn RemoteStore>,
    auth: Arc<dyn AdminAuth>,
    authenticated: AtomicBool,
    publications: EntitySync<Publication>,
    events: EntitySync<Event>,
    categories: EntitySync<Taxonomy>,
    teams: EntitySync<Taxonomy>,
    event_types: EntitySync<Taxonomy>,
    media: EntitySync<MediaFile>,
    participants: EntitySync<Participant>,
    messages: EntitySync<Message>,
    support_info: EntitySync<SupportInfo>,
    logs: EntitySync<AdminLog>,
}

impl AdminConsole {
    /// Builds a console over the given store and authentication gate.
    pub fn new(store: Arc<dyn RemoteStore>, auth: Arc<dyn AdminAuth>) -> Self {
        Self {
            publications: EntitySync::new(Collection::Publications, store.clone()),
            events: EntitySync::new(Collection::Events, store.clone()),
            categories: EntitySync::new(Collection::Categories, store.clone()),
            teams: EntitySync::new(Collection::Teams, store.clone()),
            event_types: EntitySync::new(Collection::EventTypes, store.clone()),
            media: EntitySync::new(Collection::Media, store.clone()),
            participants: EntitySync::new(Collection::Participants, store.clone()),
            messages: EntitySync::new(Collection::Messages, store.clone()),
            support_info: EntitySync::new(Collection::SupportInfo, store.clone()),
            logs: EntitySync::new(Collection::AdminLogs, store.clone()),
            store,
            auth,
            authenticated: AtomicBool::new(false),
        }
    }

    // ── Session ──────────────────────────────────────────────────

    /// Checks the shared secret. A wrong secret establishes nothing; a
    /// transport failure surfaces as such and likewise establishes
    /// nothing.
    pub async fn login(&self, secret: &str) -> SyncResult<bool> {
        let ok = self.auth.login(secret).await?;
        if ok {
            info!("Admin session opened");
            self.authenticated.store(true, Ordering::SeqCst);
        } else {
            warn!("Admin login rejected");
        }
        Ok(ok)
    }

    /// Ends the session. Cached data stays in memory but becomes
    /// unreachable through the console.
    pub fn logout(&self) {
        self.authenticated.store(false, Ordering::SeqCst);
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    fn ensure_auth(&self) -> SyncResult<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(SyncError::Auth)
        }
    }

    /// Reloads every collection concurrently, the way the admin screen
    /// populates all its tabs at once.
    pub async fn load_all(&self) -> SyncResult<()> {
        self.ensure_auth()?;
        tokio::try_join!(
            self.publications.reload(),
            self.events.reload(),
            self.categories.reload(),
            self.teams.reload(),
            self.event_types.reload(),
            self.media.reload(),
            self.participants.reload(),
            self.messages.reload(),
            self.support_info.reload(),
            self.logs.reload(),
        )?;
        Ok(())
    }

    // ── Gated collection access ──────────────────────────────────

    pub fn publications(&self) -> SyncResult<&EntitySync<Publication>> {
        self.ensure_auth()?;
        Ok(&self.publications)
    }

    pub fn events(&self) -> SyncResult<&EntitySync<Event>> {
        self.ensure_auth()?;
        Ok(&self.events)
    }

    pub fn categories(&self) -> SyncResult<&EntitySync<Taxonomy>> {
        self.ensure_auth()?;
        Ok(&self.categories)
    }

    pub fn teams(&self) -> SyncResult<&EntitySync<Taxonomy>> {
        self.ensure_auth()?;
        Ok(&self.teams)
    }

    pub fn event_types(&self) -> SyncResult<&EntitySync<Taxonomy>> {
        self.ensure_auth()?;
        Ok(&self.event_types)
    }

    pub fn media(&self) -> SyncResult<&EntitySync<MediaFile>> {
        self.ensure_auth()?;
        Ok(&self.media)
    }

    pub fn participants(&self) -> SyncResult<&EntitySync<Participant>> {
        self.ensure_auth()?;
        Ok(&self.participants)
    }

    pub fn messages(&self) -> SyncResult<&EntitySync<Message>> {
        self.ensure_auth()?;
        Ok(&self.messages)
    }

    pub fn support_info(&self) -> SyncResult<&EntitySync<SupportInfo>> {
        self.ensure_auth()?;
        Ok(&self.support_info)
    }

    pub fn logs(&self) -> SyncResult<&EntitySync<AdminLog>> {
        self.ensure_auth()?;
        Ok(&self.logs)
    }

    // ── Publications ─────────────────────────────────────────────

    /// Creates or updates a publication depending on whether it has been
    /// persisted yet. Category and team references are checked locally
    /// first.
    pub async fn save_publication(&self, publication: &Publication) -> SyncResult<Publication> {
        self.ensure_auth()?;
        publication.validate()?;

        let saved = if publication.id.is_empty() {
            self.publications.create(publication).await?
        } else {
            self.publications.update(&publication.id, publication).await?
        };
        self.log_action("publication_saved", json!({ "id": saved.id.as_str() }))
            .await;
        Ok(saved)
    }

    pub async fn delete_publication(&self, id: &RecordId) -> SyncResult<()> {
        self.ensure_auth()?;
        self.publications.delete(id).await?;
        self.log_action("publication_deleted", json!({ "id": id.as_str() }))
            .await;
        Ok(())
    }

    // ── Events ───────────────────────────────────────────────────

    pub async fn save_event(&self, event: &Event) -> SyncResult<Event> {
        self.ensure_auth()?;

        let saved = if event.id.is_empty() {
            self.events.create(event).await?
        } else {
            self.events.update(&event.id, event).await?
        };
        self.log_action("event_saved", json!({ "id": saved.id.as_str() }))
            .await;
        Ok(saved)
    }

    pub async fn delete_event(&self, id: &RecordId) -> SyncResult<()> {
        self.ensure_auth()?;
        self.events.delete(id).await?;
        self.log_action("event_deleted", json!({ "id": id.as_str() }))
            .await;
        Ok(())
    }

    // ── Categories, teams, event types ───────────────────────────
    //
    // Deleting a reference record that cached publications or events
    // still point at is blocked; no cascade, no null-out.

    pub async fn save_category(&self, category: &Taxonomy) -> SyncResult<Taxonomy> {
        self.save_taxonomy(&self.categories, category).await
    }

    pub async fn save_team(&self, team: &Taxonomy) -> SyncResult<Taxonomy> {
        self.save_taxonomy(&self.teams, team).await
    }

    pub async fn save_event_type(&self, event_type: &Taxonomy) -> SyncResult<Taxonomy> {
        self.save_taxonomy(&self.event_types, event_type).await
    }

    pub async fn delete_category(&self, id: &RecordId) -> SyncResult<()> {
        self.ensure_auth()?;
        let referers = self
            .publications
            .list()
            .await
            .iter()
            .filter(|p| &p.category_id == id)
            .count();
        self.delete_taxonomy(&self.categories, id, referers).await
    }

    pub async fn delete_team(&self, id: &RecordId) -> SyncResult<()> {
        self.ensure_auth()?;
        let referers = self
            .publications
            .list()
            .await
            .iter()
            .filter(|p| &p.team_id == id)
            .count();
        self.delete_taxonomy(&self.teams, id, referers).await
    }

    pub async fn delete_event_type(&self, id: &RecordId) -> SyncResult<()> {
        self.ensure_auth()?;
        let referers = self
            .events
            .list()
            .await
            .iter()
            .filter(|e| e.event_type_id.as_ref() == Some(id))
            .count();
        self.delete_taxonomy(&self.event_types, id, referers).await
    }

    async fn save_taxonomy(
        &self,
        sync: &EntitySync<Taxonomy>,
        value: &Taxonomy,
    ) -> SyncResult<Taxonomy> {
        self.ensure_auth()?;

        let saved = if value.id.is_empty() {
            sync.create(value).await?
        } else {
            sync.update(&value.id, value).await?
        };
        self.log_action(
            "reference_saved",
            json!({ "collection": sync.collection().as_str(), "id": saved.id.as_str() }),
        )
        .await;
        Ok(saved)
    }

    async fn delete_taxonomy(
        &self,
        sync: &EntitySync<Taxonomy>,
        id: &RecordId,
        referers: usize,
    ) -> SyncResult<()> {
        if referers > 0 {
            return Err(SyncError::StillReferenced {
                collection: sync.collection(),
                id: id.clone(),
                count: referers,
            });
        }
        sync.delete(id).await?;
        self.log_action(
            "reference_deleted",
            json!({ "collection": sync.collection().as_str(), "id": id.as_str() }),
        )
        .await;
        Ok(())
    }

    // ── Media ────────────────────────────────────────────────────

    /// Uploads a file and inserts the persisted media row at the head of
    /// the gallery cache.
    pub async fn upload_media(&self, upload: MediaUpload) -> SyncResult<MediaFile> {
        self.ensure_auth()?;

        let raw = self.store.upload_media(upload).await?;
        let file = MediaFile::from_raw(&raw);
        self.media.adopt(file.clone()).await;
        self.log_action("media_uploaded", json!({ "id": file.id.as_str() }))
            .await;
        Ok(file)
    }

    pub async fn delete_media(&self, id: &RecordId) -> SyncResult<()> {
        self.ensure_auth()?;
        self.media.delete(id).await?;
        self.log_action("media_deleted", json!({ "id": id.as_str() }))
            .await;
        Ok(())
    }

    // ── Messages & participants ──────────────────────────────────

    pub async fn mark_message_read(&self, id: &RecordId) -> SyncResult<Message> {
        self.ensure_auth()?;
        let mut message = self
            .messages
            .get(id)
            .await
            .ok_or_else(|| SyncError::NotCached {
                collection: Collection::Messages,
                id: id.clone(),
            })?;
        message.read = true;
        self.messages.update(id, &message).await
    }

    pub async fn delete_message(&self, id: &RecordId) -> SyncResult<()> {
        self.ensure_auth()?;
        self.messages.delete(id).await
    }

    pub async fn confirm_participant(&self, id: &RecordId) -> SyncResult<Participant> {
        self.ensure_auth()?;
        let mut participant = self
            .participants
            .get(id)
            .await
            .ok_or_else(|| SyncError::NotCached {
                collection: Collection::Participants,
                id: id.clone(),
            })?;
        participant.confirmed = true;
        self.participants.update(id, &participant).await
    }

    pub async fn delete_participant(&self, id: &RecordId) -> SyncResult<()> {
        self.ensure_auth()?;
        self.participants.delete(id).await
    }

    // ── Support info ─────────────────────────────────────────────

    pub async fn save_support_info(&self, entry: &SupportInfo) -> SyncResult<SupportInfo> {
        self.ensure_auth()?;
        if entry.id.is_empty() {
            self.support_info.create(entry).await
        } else {
            self.support_info.update(&entry.id, entry).await
        }
    }

    pub async fn delete_support_info(&self, id: &RecordId) -> SyncResult<()> {
        self.ensure_auth()?;
        self.support_info.delete(id).await
    }

    // ── Public flows (no session required) ───────────────────────

    /// The public contact form. Validation failures make no remote call
    /// and mutate nothing.
    pub async fn submit_contact(&self, form: ContactForm) -> SyncResult<Message> {
        let message = form.into_message()?;
        self.messages.create(&message).await
    }

    /// The public registration flow: the participant record first, then
    /// the inbox notice pointing back at the event.
    pub async fn register_for_event(
        &self,
        event_id: &RecordId,
        form: RegistrationForm,
    ) -> SyncResult<Participant> {
        form.validate()?;
        let notice = form.into_notice(event_id);
        let participant = form.into_participant(event_id)?;

        let created = self.participants.create(&participant).await?;
        self.messages.create(&notice).await?;
        Ok(created)
    }

    // ── Action log ───────────────────────────────────────────────

    /// Appends to the admin action log. Best-effort: a failed log write
    /// warns and never fails the operation that triggered it.
    async fn log_action(&self, action: &str, details: serde_json::Value) {
        let entry = AdminLog::action(action).with_details(details);
        if let Err(e) = self.logs.create(&entry).await {
            warn!("Failed to record admin action {}: {}", action, e);
        }
    }
}
