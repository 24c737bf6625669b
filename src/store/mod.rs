//! Document store module
//!
//! The `DocumentStore` trait is the seam between the writer and the remote
//! collection. Two implementations are provided:
//!
//! - `FirestoreStore` - Cloud Firestore over the REST v1 API
//! - `MemoryStore` - in-process collections, used for dry runs and tests

mod firestore;
mod memory;

pub use firestore::{encode_fields, encode_value, FirestoreStore};
pub use memory::{MemoryStore, StoredDocument};

use crate::error::Result;
use crate::types::{DocumentKey, JsonObject};
use async_trait::async_trait;
use std::sync::Arc;

/// A writable, collection-oriented document store
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Create a new document; the store assigns its key.
    ///
    /// Calling this twice with the same fields creates two documents.
    async fn create_document(&self, collection: &str, fields: &JsonObject)
        -> Result<DocumentKey>;

    /// Create or replace the document stored under `key`
    async fn upsert_document(
        &self,
        collection: &str,
        key: &str,
        fields: &JsonObject,
    ) -> Result<DocumentKey>;
}

#[async_trait]
impl<S: DocumentStore + ?Sized> DocumentStore for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn create_document(
        &self,
        collection: &str,
        fields: &JsonObject,
    ) -> Result<DocumentKey> {
        (**self).create_document(collection, fields).await
    }

    async fn upsert_document(
        &self,
        collection: &str,
        key: &str,
        fields: &JsonObject,
    ) -> Result<DocumentKey> {
        (**self).upsert_document(collection, key, fields).await
    }
}

#[async_trait]
impl<S: DocumentStore + ?Sized> DocumentStore for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn create_document(
        &self,
        collection: &str,
        fields: &JsonObject,
    ) -> Result<DocumentKey> {
        (**self).create_document(collection, fields).await
    }

    async fn upsert_document(
        &self,
        collection: &str,
        key: &str,
        fields: &JsonObject,
    ) -> Result<DocumentKey> {
        (**self).upsert_document(collection, key, fields).await
    }
}

#[cfg(test)]
mod tests;
