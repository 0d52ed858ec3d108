//! HTTP implementation of the remote store.
//!
//! Speaks a PostgREST-style dialect: one route per collection under
//! `/rest/v1/`, row filters as `id=eq.<id>` query parameters, and
//! `Prefer: return=representation` so writes come back with the
//! server-computed fields. Blobs go to the storage API, after which the
//! media row is inserted like any other record.

use crate::error::{SyncError, SyncResult};
use crate::store::{AdminAuth, MediaUpload, RemoteStore};
use agora_model::classify_mime;
use agora_types::{Collection, RawRecord, RecordId};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for the HTTP store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestConfig {
    /// Base URL of the remote store (no trailing slash).
    pub base_url: String,
    /// Public (anonymous) API key, sent on every request.
    pub api_key: String,
    /// Privileged key for admin writes; falls back to `api_key`.
    pub service_key: Option<String>,
    /// Storage bucket media uploads land in.
    pub storage_bucket: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            api_key: String::new(),
            service_key: None,
            storage_bucket: "media".to_string(),
            timeout_secs: 30,
        }
    }
}

/// The production [`RemoteStore`].
pub struct RestStore {
    config: RestConfig,
    client: Client,
}

impl RestStore {
    /// Creates a store client from the given configuration.
    pub fn new(config: RestConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create HTTP client");

        Self { config, client }
    }

    fn auth_key(&self) -> &str {
        self.config
            .service_key
            .as_deref()
            .unwrap_or(&self.config.api_key)
    }

    fn table_url(&self, collection: Collection) -> String {
        format!("{}/rest/v1/{}", self.config.base_url, collection.as_str())
    }

    fn with_keys(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.config.api_key)
            .bearer_auth(self.auth_key())
    }

    /// Maps a non-success status to a transport error carrying the status
    /// and whatever body text the store sent; no payload shape is assumed.
    async fn checked(response: Response, what: &str) -> SyncResult<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(SyncError::Network(format!("{what} failed ({status}): {body}")))
        }
    }

    /// Writes come back as a one-row result set.
    fn single_row(mut rows: Vec<RawRecord>, what: &str) -> SyncResult<RawRecord> {
        if rows.is_empty() {
            Err(SyncError::Network(format!("{what} returned no row")))
        } else {
            Ok(rows.remove(0))
        }
    }
}

#[async_trait]
impl RemoteStore for RestStore {
    async fn fetch_all(&self, collection: Collection) -> SyncResult<Vec<RawRecord>> {
        debug!("Fetching all {}", collection);

        let response = self
            .with_keys(self.client.get(self.table_url(collection)))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await
            .map_err(|e| SyncError::Network(format!("fetch {collection} failed: {e}")))?;

        let response = Self::checked(response, "fetch").await?;
        response
            .json()
            .await
            .map_err(|e| SyncError::Network(format!("parse {collection} list failed: {e}")))
    }

    async fn create(&self, collection: Collection, payload: &RawRecord) -> SyncResult<RawRecord> {
        debug!("Creating {} record", collection);

        let response = self
            .with_keys(self.client.post(self.table_url(collection)))
            .header("Prefer", "return=representation")
            .json(payload)
            .send()
            .await
            .map_err(|e| SyncError::Network(format!("create {collection} failed: {e}")))?;

        let response = Self::checked(response, "create").await?;
        let rows: Vec<RawRecord> = response
            .json()
            .await
            .map_err(|e| SyncError::Network(format!("parse created {collection} failed: {e}")))?;

        let row = Self::single_row(rows, "create")?;
        info!("Created {} record {}", collection, row.id());
        Ok(row)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &RecordId,
        payload: &RawRecord,
    ) -> SyncResult<RawRecord> {
        debug!("Updating {} record {}", collection, id);

        let response = self
            .with_keys(self.client.patch(self.table_url(collection)))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(payload)
            .send()
            .await
            .map_err(|e| SyncError::Network(format!("update {collection} failed: {e}")))?;

        let response = Self::checked(response, "update").await?;
        let rows: Vec<RawRecord> = response
            .json()
            .await
            .map_err(|e| SyncError::Network(format!("parse updated {collection} failed: {e}")))?;

        Self::single_row(rows, "update")
    }

    async fn delete(&self, collection: Collection, id: &RecordId) -> SyncResult<()> {
        debug!("Deleting {} record {}", collection, id);

        let response = self
            .with_keys(self.client.delete(self.table_url(collection)))
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await
            .map_err(|e| SyncError::Network(format!("delete {collection} failed: {e}")))?;

        Self::checked(response, "delete").await?;
        info!("Deleted {} record {}", collection, id);
        Ok(())
    }

    async fn upload_media(&self, upload: MediaUpload) -> SyncResult<RawRecord> {
        let encoded_name = urlencoding::encode(&upload.file_name).into_owned();
        let object_url = format!(
            "{}/storage/v1/object/{}/{}",
            self.config.base_url, self.config.storage_bucket, encoded_name
        );

        debug!(
            "Uploading {} ({} bytes, {})",
            upload.file_name,
            upload.content.len(),
            upload.mime_type
        );

        let response = self
            .with_keys(self.client.post(&object_url))
            .header("Content-Type", upload.mime_type.clone())
            .body(upload.content.clone())
            .send()
            .await
            .map_err(|e| SyncError::Network(format!("upload failed: {e}")))?;

        Self::checked(response, "upload").await?;

        let public_url = format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.base_url, self.config.storage_bucket, encoded_name
        );
        let kind = classify_mime(&upload.mime_type);

        let mut row = RawRecord::new();
        row.set("nom_fichier", upload.file_name.clone())
            .set("url", public_url)
            .set("type", kind.as_str())
            .set("taille", upload.content.len() as u64)
            .set("mime_type", upload.mime_type.clone())
            .set("uploaded_by", upload.uploaded_by.clone());

        let created = self.create(Collection::Media, &row).await?;
        info!("Uploaded {} as {} media", upload.file_name, kind.as_str());
        Ok(created)
    }
}

#[async_trait]
impl AdminAuth for RestStore {
    async fn login(&self, secret: &str) -> SyncResult<bool> {
        let url = format!("{}/rest/v1/rpc/verify_admin_password", self.config.base_url);

        let response = self
            .with_keys(self.client.post(&url))
            .json(&serde_json::json!({ "secret": secret }))
            .send()
            .await
            .map_err(|e| SyncError::Network(format!("login failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<bool>()
                .await
                .map_err(|e| SyncError::Network(format!("parse login response failed: {e}")))
        } else if status.as_u16() == 401 || status.as_u16() == 403 {
            Ok(false)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(SyncError::Network(format!("login failed ({status}): {body}")))
        }
    }
}
