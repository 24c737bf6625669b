//! Store writer
//!
//! Writes records one at a time, in order. The first failed write stops the
//! run; documents written before it stay in the store.

use crate::error::{Error, Result};
use crate::store::DocumentStore;
use crate::types::{DocumentKey, KeyMode, Record};
use tracing::{debug, info, warn};

/// Outcome of a completed write pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Number of documents written
    pub written: usize,
    /// Keys of the written documents, in record order
    pub keys: Vec<DocumentKey>,
}

/// Sequential writer from records to a single collection
pub struct StoreWriter<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
    collection: String,
    key_mode: KeyMode,
}

impl<'a, S: DocumentStore + ?Sized> StoreWriter<'a, S> {
    /// Writer for `collection` using store-generated keys
    pub fn new(store: &'a S, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
            key_mode: KeyMode::Generated,
        }
    }

    /// Choose how documents are keyed
    #[must_use]
    pub fn with_key_mode(mut self, key_mode: KeyMode) -> Self {
        self.key_mode = key_mode;
        self
    }

    /// Target collection
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Write every record, in order, stopping at the first failure.
    ///
    /// On failure the returned [`Error::Write`] names the record and how many
    /// documents were written before it. Nothing is rolled back.
    pub async fn write_all(&self, records: &[Record]) -> Result<WriteSummary> {
        if self.key_mode == KeyMode::Identifier {
            warn!(
                "Using record ids as document keys in '{}': existing documents with the same id are overwritten",
                self.collection
            );
        }

        let mut summary = WriteSummary {
            written: 0,
            keys: Vec::with_capacity(records.len()),
        };

        for (index, record) in records.iter().enumerate() {
            let key = self.write_one(record).await.map_err(|source| {
                warn!(
                    "Write of record '{}' failed after {} documents: {}",
                    record.id, summary.written, source
                );
                Error::Write {
                    record_id: record.id.clone(),
                    position: index + 1,
                    written: summary.written,
                    source: Box::new(source),
                }
            })?;

            debug!("Record '{}' stored as {}", record.id, key);
            summary.written += 1;
            summary.keys.push(key);
        }

        info!(
            "Wrote {} documents to '{}' via {}",
            summary.written,
            self.collection,
            self.store.name()
        );
        Ok(summary)
    }

    async fn write_one(&self, record: &Record) -> Result<DocumentKey> {
        let fields = record.to_document();
        match self.key_mode {
            KeyMode::Generated => self.store.create_document(&self.collection, &fields).await,
            KeyMode::Identifier => {
                self.store
                    .upsert_document(&self.collection, &record.id, &fields)
                    .await
            }
        }
    }
}
