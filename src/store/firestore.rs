//! Cloud Firestore over REST
//!
//! Documents are created with
//! `POST /v1/projects/{project}/databases/{database}/documents/{collection}`
//! and upserted with `PATCH .../documents/{collection}/{key}`.

use super::DocumentStore;
use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::types::{DocumentKey, JsonObject, JsonValue};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Document resource returned by the Firestore API
#[derive(Debug, Deserialize)]
struct FirestoreDocument {
    name: String,
}

/// Firestore-backed document store
#[derive(Debug)]
pub struct FirestoreStore {
    client: HttpClient,
    documents_url: Url,
}

impl FirestoreStore {
    /// Create a store handle from configuration.
    ///
    /// No request is made here; credentials and connectivity are first
    /// exercised by the first write.
    pub fn new(config: &StoreConfig) -> Result<Self> {
        config.validate()?;

        let mut documents_url = Url::parse(&config.base_url)?;
        if documents_url.cannot_be_a_base() {
            return Err(Error::invalid_value(
                "base_url",
                format!("'{}' cannot be used as a base URL", config.base_url),
            ));
        }
        documents_url
            .path_segments_mut()
            .map_err(|()| Error::invalid_value("base_url", "cannot be a base"))?
            .pop_if_empty()
            .extend([
                "v1",
                "projects",
                config.project_id.as_str(),
                "databases",
                config.database.as_str(),
                "documents",
            ]);

        let client = HttpClient::new(
            Duration::from_secs(config.timeout_secs),
            config.auth.clone(),
        )?;

        Ok(Self {
            client,
            documents_url,
        })
    }

    /// URL of the documents root, e.g. `.../v1/projects/p/databases/(default)/documents`
    pub fn documents_url(&self) -> &str {
        self.documents_url.as_str()
    }

    fn collection_url(&self, collection: &str, key: Option<&str>) -> Result<Url> {
        validate_path("collection", collection)?;
        if let Some(key) = key {
            if key.contains('/') {
                return Err(Error::store(format!(
                    "document key '{key}' must not contain '/'"
                )));
            }
            validate_path("document key", key)?;
        }

        let mut url = self.documents_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::store("documents URL cannot be a base"))?
            .extend(collection.split('/'))
            .extend(key);
        Ok(url)
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    fn name(&self) -> &str {
        "firestore"
    }

    async fn create_document(
        &self,
        collection: &str,
        fields: &JsonObject,
    ) -> Result<DocumentKey> {
        let url = self.collection_url(collection, None)?;
        let body = json!({ "fields": encode_fields(fields) });

        let doc: FirestoreDocument = self
            .client
            .post_json(&url, &body)
            .await?;

        debug!("Created document {}", doc.name);
        Ok(DocumentKey::from_resource_name(doc.name))
    }

    async fn upsert_document(
        &self,
        collection: &str,
        key: &str,
        fields: &JsonObject,
    ) -> Result<DocumentKey> {
        let url = self.collection_url(collection, Some(key))?;
        let body = json!({ "fields": encode_fields(fields) });

        let doc: FirestoreDocument = self
            .client
            .patch_json(&url, &body)
            .await?;

        debug!("Upserted document {}", doc.name);
        Ok(DocumentKey::from_resource_name(doc.name))
    }
}

/// Reject empty path segments and the reserved `.`/`..` names
fn validate_path(what: &str, value: &str) -> Result<()> {
    if value.is_empty() || value.split('/').any(|s| s.is_empty() || s == "." || s == "..") {
        return Err(Error::store(format!("invalid {what} '{value}'")));
    }
    Ok(())
}

/// Encode a JSON object as a Firestore `fields` map
pub fn encode_fields(fields: &JsonObject) -> JsonObject {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), encode_value(v)))
        .collect()
}

/// Encode a JSON value as a Firestore typed `Value`
pub fn encode_value(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Null => json!({ "nullValue": null }),
        JsonValue::Bool(b) => json!({ "booleanValue": b }),
        JsonValue::Number(n) => match n.as_i64() {
            // integerValue is an int64 carried as a string
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64() }),
        },
        JsonValue::String(s) => json!({ "stringValue": s }),
        JsonValue::Array(items) => {
            let values: Vec<JsonValue> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        JsonValue::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}
