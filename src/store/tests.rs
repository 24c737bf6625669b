//! Tests for the document store module

use super::*;
use crate::auth::AuthConfig;
use crate::config::StoreConfig;
use crate::error::Error;
use crate::types::{JsonObject, Record};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOCS_PATH: &str = "/v1/projects/demo/databases/(default)/documents";

fn alif() -> JsonObject {
    Record::from_fields(["1", "ا", "alif", "letter", "first letter"])
        .unwrap()
        .to_document()
}

// ============================================================================
// Firestore Encoding
// ============================================================================

#[test]
fn test_encode_record_fields() {
    let encoded = encode_fields(&alif());
    assert_eq!(
        serde_json::Value::Object(encoded),
        json!({
            "id": {"stringValue": "1"},
            "arabic": {"stringValue": "ا"},
            "transliteration": {"stringValue": "alif"},
            "meaning_shaykh": {"stringValue": "letter"},
            "explanation": {"stringValue": "first letter"}
        })
    );
}

#[test]
fn test_encode_scalar_values() {
    assert_eq!(encode_value(&json!(null)), json!({"nullValue": null}));
    assert_eq!(encode_value(&json!(true)), json!({"booleanValue": true}));
    assert_eq!(encode_value(&json!(42)), json!({"integerValue": "42"}));
    assert_eq!(encode_value(&json!(1.5)), json!({"doubleValue": 1.5}));
}

#[test]
fn test_encode_nested_values() {
    let value = json!({"tags": ["a", 1], "meta": {"ok": false}});
    assert_eq!(
        encode_value(&value),
        json!({
            "mapValue": {"fields": {
                "tags": {"arrayValue": {"values": [
                    {"stringValue": "a"},
                    {"integerValue": "1"}
                ]}},
                "meta": {"mapValue": {"fields": {"ok": {"booleanValue": false}}}}
            }}
        })
    );
}

// ============================================================================
// Firestore Store
// ============================================================================

#[test]
fn test_firestore_requires_project() {
    let err = FirestoreStore::new(&StoreConfig::default()).unwrap_err();
    assert!(matches!(err, Error::MissingConfigField { ref field } if field == "project_id"));
}

#[test]
fn test_firestore_rejects_zero_timeout() {
    let mut config = StoreConfig::new("demo");
    config.timeout_secs = 0;
    let err = FirestoreStore::new(&config).unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "timeout_secs"));
}

#[test]
fn test_firestore_rejects_bad_base_url() {
    let config = StoreConfig::new("demo").with_base_url("not a url");
    let err = FirestoreStore::new(&config).unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)));
}

#[test]
fn test_firestore_documents_url() {
    let store = FirestoreStore::new(&StoreConfig::new("demo")).unwrap();
    assert_eq!(
        store.documents_url(),
        "https://firestore.googleapis.com/v1/projects/demo/databases/(default)/documents"
    );
}

#[tokio::test]
async fn test_firestore_create_document() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{DOCS_PATH}/names")))
        .and(header("Authorization", "Bearer token-1"))
        .and(body_json(json!({"fields": encode_fields(&alif())})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "projects/demo/databases/(default)/documents/names/Xy12abc",
            "fields": {},
            "createTime": "2024-01-01T00:00:00Z",
            "updateTime": "2024-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = StoreConfig::new("demo")
        .with_base_url(mock_server.uri())
        .with_auth(AuthConfig::bearer("token-1"));
    let store = FirestoreStore::new(&config).unwrap();

    let key = store.create_document("names", &alif()).await.unwrap();
    assert_eq!(key.id, "Xy12abc");
    assert_eq!(
        key.name.as_deref(),
        Some("projects/demo/databases/(default)/documents/names/Xy12abc")
    );
}

#[tokio::test]
async fn test_firestore_upsert_document() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path(format!("{DOCS_PATH}/names/1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "projects/demo/databases/(default)/documents/names/1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = StoreConfig::emulator(&mock_server.uri(), "demo");
    let store = FirestoreStore::new(&config).unwrap();

    let key = store.upsert_document("names", "1", &alif()).await.unwrap();
    assert_eq!(key.id, "1");
}

#[tokio::test]
async fn test_firestore_permission_denied() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {"code": 403, "status": "PERMISSION_DENIED"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = StoreConfig::emulator(&mock_server.uri(), "demo");
    let store = FirestoreStore::new(&config).unwrap();

    let err = store.create_document("names", &alif()).await.unwrap_err();
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 403);
            assert!(body.contains("PERMISSION_DENIED"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_firestore_rejects_invalid_paths() {
    let store = FirestoreStore::new(&StoreConfig::emulator("localhost:1", "demo")).unwrap();

    assert!(store.create_document("", &alif()).await.is_err());
    assert!(store.create_document("names/../x", &alif()).await.is_err());
    assert!(store.upsert_document("names", "a/b", &alif()).await.is_err());
    assert!(store.upsert_document("names", "", &alif()).await.is_err());
}

// ============================================================================
// Memory Store
// ============================================================================

#[tokio::test]
async fn test_memory_create_generates_distinct_keys() {
    let store = MemoryStore::new();
    let a = store.create_document("names", &alif()).await.unwrap();
    let b = store.create_document("names", &alif()).await.unwrap();

    assert_ne!(a, b);
    assert_eq!(store.len("names"), 2);
    assert_eq!(store.calls(), 2);
    assert!(store.is_empty("other"));
}

#[tokio::test]
async fn test_memory_upsert_replaces() {
    let store = MemoryStore::new();
    store.upsert_document("names", "1", &alif()).await.unwrap();

    let mut changed = alif();
    changed.insert("explanation".to_string(), json!("changed"));
    store.upsert_document("names", "1", &changed).await.unwrap();

    let docs = store.documents("names");
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].key.id, "1");
    assert_eq!(docs[0].fields["explanation"], "changed");
}

#[tokio::test]
async fn test_memory_failing_call() {
    let store = MemoryStore::failing_at(2);
    assert!(store.create_document("names", &alif()).await.is_ok());

    let err = store.create_document("names", &alif()).await.unwrap_err();
    assert!(matches!(err, Error::Store { .. }));
    assert_eq!(store.len("names"), 1);
    assert_eq!(store.calls(), 2);
}

#[tokio::test]
async fn test_boxed_and_shared_store() {
    let boxed: Box<dyn DocumentStore> = Box::new(MemoryStore::new());
    assert_eq!(boxed.name(), "memory");
    boxed.create_document("names", &alif()).await.unwrap();

    let shared = std::sync::Arc::new(MemoryStore::new());
    let handle = std::sync::Arc::clone(&shared);
    handle.create_document("names", &alif()).await.unwrap();
    assert_eq!(shared.len("names"), 1);
}
