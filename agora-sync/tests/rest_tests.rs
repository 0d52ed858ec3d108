use agora_sync::{AdminAuth, RemoteStore, RestConfig, RestStore, SyncError};
use agora_sync::MediaUpload;
use agora_types::{Collection, RawRecord, RecordId};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mock_config(server: &MockServer) -> RestConfig {
    RestConfig {
        base_url: server.uri(),
        api_key: "anon-key".to_string(),
        service_key: Some("service-key".to_string()),
        ..Default::default()
    }
}

// ── Config ──────────────────────────────────────────────────────

#[test]
fn config_defaults() {
    let cfg = RestConfig::default();
    assert_eq!(cfg.base_url, "http://localhost:54321");
    assert_eq!(cfg.storage_bucket, "media");
    assert_eq!(cfg.timeout_secs, 30);
    assert!(cfg.api_key.is_empty());
    assert!(cfg.service_key.is_none());
}

#[test]
fn config_serde_roundtrip() {
    let cfg = RestConfig {
        base_url: "https://store.example.org".to_string(),
        api_key: "k".to_string(),
        ..Default::default()
    };
    let json = serde_json::to_string(&cfg).unwrap();
    let back: RestConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.base_url, "https://store.example.org");
    assert_eq!(back.storage_bucket, "media");
}

// ── fetch_all ───────────────────────────────────────────────────

#[tokio::test]
async fn fetch_all_hits_the_collection_route() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/events"))
        .and(query_param("select", "*"))
        .and(header("apikey", "anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "e2", "titre": "Récent" },
            { "id": "e1", "titre": "Ancien" }
        ])))
        .mount(&server)
        .await;

    let store = RestStore::new(mock_config(&server));
    let rows = store.fetch_all(Collection::Events).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id().as_str(), "e2");
    assert_eq!(rows[0].get_str("titre"), Some("Récent"));
}

#[tokio::test]
async fn fetch_all_failure_is_a_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/events"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = RestStore::new(mock_config(&server));
    let err = store.fetch_all(Collection::Events).await.unwrap_err();
    assert!(matches!(err, SyncError::Network(_)));
}

// ── create ──────────────────────────────────────────────────────

#[tokio::test]
async fn create_asks_for_the_representation_back() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/categories"))
        .and(header("Prefer", "return=representation"))
        .and(body_json(json!({ "nom": "Justice" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            { "id": "c1", "nom": "Justice", "created_at": "2024-01-01T00:00:00Z" }
        ])))
        .mount(&server)
        .await;

    let store = RestStore::new(mock_config(&server));
    let mut payload = RawRecord::new();
    payload.set("nom", "Justice");

    let row = store.create(Collection::Categories, &payload).await.unwrap();
    assert_eq!(row.id().as_str(), "c1");
    assert_eq!(row.get_str("created_at"), Some("2024-01-01T00:00:00Z"));
}

#[tokio::test]
async fn create_with_an_empty_result_set_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/categories"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .mount(&server)
        .await;

    let store = RestStore::new(mock_config(&server));
    let err = store
        .create(Collection::Categories, &RawRecord::new())
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::Network(_)));
}

#[tokio::test]
async fn create_rejection_surfaces_once_with_the_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/publications"))
        .respond_with(ResponseTemplate::new(400).set_body_string("null value in column"))
        .mount(&server)
        .await;

    let store = RestStore::new(mock_config(&server));
    let err = store
        .create(Collection::Publications, &RawRecord::new())
        .await
        .unwrap_err();

    match err {
        SyncError::Network(message) => {
            assert!(message.contains("400"));
        }
        other => panic!("expected a network error, got {other:?}"),
    }
}

// ── update ──────────────────────────────────────────────────────

#[tokio::test]
async fn update_filters_on_the_record_id() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/events"))
        .and(query_param("id", "eq.e1"))
        .and(header("Prefer", "return=representation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "e1", "titre": "Corrigé", "updated_at": "2024-02-01T00:00:00Z" }
        ])))
        .mount(&server)
        .await;

    let store = RestStore::new(mock_config(&server));
    let mut payload = RawRecord::new();
    payload.set("titre", "Corrigé");

    let row = store
        .update(Collection::Events, &RecordId::new("e1"), &payload)
        .await
        .unwrap();
    assert_eq!(row.get_str("titre"), Some("Corrigé"));
    assert_eq!(row.get_str("updated_at"), Some("2024-02-01T00:00:00Z"));
}

// ── delete ──────────────────────────────────────────────────────

#[tokio::test]
async fn delete_targets_one_row() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/messages"))
        .and(query_param("id", "eq.m1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let store = RestStore::new(mock_config(&server));
    store
        .delete(Collection::Messages, &RecordId::new("m1"))
        .await
        .unwrap();
}

#[tokio::test]
async fn rejected_delete_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/messages"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;

    let store = RestStore::new(mock_config(&server));
    let err = store
        .delete(Collection::Messages, &RecordId::new("m1"))
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::Network(_)));
}

// ── upload ──────────────────────────────────────────────────────

#[tokio::test]
async fn upload_stores_the_blob_then_inserts_the_media_row() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/storage/v1/object/media/affiche.png"))
        .and(header("Content-Type", "image/png"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Key": "media/affiche.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/media"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            {
                "id": "m1",
                "nom_fichier": "affiche.png",
                "type": "image",
                "taille": 128,
                "uploaded_by": "admin"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let store = RestStore::new(mock_config(&server));
    let row = store
        .upload_media(MediaUpload {
            file_name: "affiche.png".to_string(),
            mime_type: "image/png".to_string(),
            content: vec![0u8; 128],
            uploaded_by: "admin".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(row.id().as_str(), "m1");
    assert_eq!(row.get_str("type"), Some("image"));
}

#[tokio::test]
async fn failed_blob_upload_inserts_no_row() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/storage/v1/object/media/affiche.png"))
        .respond_with(ResponseTemplate::new(507))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/media"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{ "id": "m1" }])))
        .expect(0)
        .mount(&server)
        .await;

    let store = RestStore::new(mock_config(&server));
    let err = store
        .upload_media(MediaUpload {
            file_name: "affiche.png".to_string(),
            mime_type: "image/png".to_string(),
            content: Vec::new(),
            uploaded_by: "admin".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::Network(_)));
}

// ── login ───────────────────────────────────────────────────────

#[tokio::test]
async fn login_checks_the_secret_via_rpc() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/verify_admin_password"))
        .and(body_json(json!({ "secret": "sesame" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(true)))
        .mount(&server)
        .await;

    let store = RestStore::new(mock_config(&server));
    assert!(store.login("sesame").await.unwrap());
}

#[tokio::test]
async fn wrong_secret_is_false_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/verify_admin_password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(false)))
        .mount(&server)
        .await;

    let store = RestStore::new(mock_config(&server));
    assert!(!store.login("mauvais").await.unwrap());
}

#[tokio::test]
async fn unauthorized_login_is_false() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/verify_admin_password"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let store = RestStore::new(mock_config(&server));
    assert!(!store.login("sesame").await.unwrap());
}

#[tokio::test]
async fn login_server_failure_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/verify_admin_password"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let store = RestStore::new(mock_config(&server));
    assert!(matches!(
        store.login("sesame").await,
        Err(SyncError::Network(_))
    ));
}
