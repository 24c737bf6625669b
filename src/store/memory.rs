//! In-memory document store

use super::DocumentStore;
use crate::error::{Error, Result};
use crate::types::{DocumentKey, JsonObject};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A document held by [`MemoryStore`]
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// Key the document was stored under
    pub key: DocumentKey,
    /// Stored fields
    pub fields: JsonObject,
}

#[derive(Debug, Default)]
struct MemoryState {
    calls: usize,
    next_id: u64,
    collections: BTreeMap<String, Vec<StoredDocument>>,
}

/// Document store that keeps collections in process memory.
///
/// Keys are generated from a counter. A store built with
/// [`MemoryStore::failing_at`] rejects exactly one write call, which makes
/// partial-load behavior observable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    fail_at: Option<usize>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose `call`-th write (1-based) fails
    pub fn failing_at(call: usize) -> Self {
        Self {
            state: Mutex::default(),
            fail_at: Some(call),
        }
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of write calls received, including failed ones
    pub fn calls(&self) -> usize {
        self.state().calls
    }

    /// Documents in `collection`, in insertion order
    pub fn documents(&self, collection: &str) -> Vec<StoredDocument> {
        self.state()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of documents in `collection`
    pub fn len(&self, collection: &str) -> usize {
        self.state().collections.get(collection).map_or(0, Vec::len)
    }

    /// Whether `collection` holds no documents
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    /// Count the call and fail it if it is the configured failing call
    fn begin_call(&self, state: &mut MemoryState) -> Result<()> {
        state.calls += 1;
        if self.fail_at == Some(state.calls) {
            return Err(Error::store(format!(
                "injected failure on write call {}",
                state.calls
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn create_document(
        &self,
        collection: &str,
        fields: &JsonObject,
    ) -> Result<DocumentKey> {
        let mut state = self.state();
        self.begin_call(&mut state)?;

        state.next_id += 1;
        let key = DocumentKey::new(format!("mem-{:08}", state.next_id));
        state
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(StoredDocument {
                key: key.clone(),
                fields: fields.clone(),
            });
        Ok(key)
    }

    async fn upsert_document(
        &self,
        collection: &str,
        key: &str,
        fields: &JsonObject,
    ) -> Result<DocumentKey> {
        let mut state = self.state();
        self.begin_call(&mut state)?;

        let key = DocumentKey::new(key);
        let docs = state.collections.entry(collection.to_string()).or_default();
        match docs.iter_mut().find(|d| d.key.id == key.id) {
            Some(existing) => existing.fields = fields.clone(),
            None => docs.push(StoredDocument {
                key: key.clone(),
                fields: fields.clone(),
            }),
        }
        Ok(key)
    }
}
