//! Load pipeline
//!
//! Runs configuration check → parse → write, failing fast.
//!
//! # Overview
//!
//! - `Loader` - owns the config and the store handle and runs one load
//! - `LoadReport` - what a successful run did
//!
//! Every error leaving `Loader::run` is tagged with the [`Stage`] it came
//! from. A loader runs once: `Init → Parsing → Writing → Done`, or to
//! `Failed` from whichever stage broke.

mod types;

pub use types::LoadReport;

use crate::config::{LoadConfig, StoreConfig};
use crate::error::{Error, Result};
use crate::parse::read_records;
use crate::store::{DocumentStore, FirestoreStore};
use crate::types::Stage;
use crate::writer::StoreWriter;
use std::time::Instant;
use tracing::{debug, info};

/// One-shot loader from a CSV file into a document collection
#[derive(Debug)]
pub struct Loader<S: DocumentStore> {
    config: LoadConfig,
    store: S,
    stage: Stage,
}

impl Loader<FirestoreStore> {
    /// Build a loader writing to Firestore.
    ///
    /// Failure to build the store handle is an `init` stage error.
    pub fn connect(config: LoadConfig, store_config: &StoreConfig) -> Result<Self> {
        let store = FirestoreStore::new(store_config).map_err(|e| e.at_stage(Stage::Init))?;
        debug!("Firestore handle ready: {}", store.documents_url());
        Ok(Self::new(config, store))
    }
}

impl<S: DocumentStore> Loader<S> {
    /// Create a loader over an existing store handle
    pub fn new(config: LoadConfig, store: S) -> Self {
        Self {
            config,
            store,
            stage: Stage::Init,
        }
    }

    /// The load configuration
    pub fn config(&self) -> &LoadConfig {
        &self.config
    }

    /// The store handle
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The last stage reached
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Run the load. May be called once.
    pub async fn run(&mut self) -> Result<LoadReport> {
        if self.stage != Stage::Init {
            return Err(Error::config(format!(
                "loader has already run (stage: {})",
                self.stage
            )));
        }

        let start = Instant::now();
        match self.execute(start).await {
            Ok(report) => {
                self.stage = Stage::Done;
                info!(
                    "Upload complete: {} documents written to '{}' in {:?}",
                    report.written, report.collection, report.elapsed
                );
                Ok(report)
            }
            Err(e) => {
                let failed_at = self.stage;
                self.stage = Stage::Failed;
                Err(e.at_stage(failed_at))
            }
        }
    }

    async fn execute(&mut self, start: Instant) -> Result<LoadReport> {
        self.config.validate()?;

        self.stage = Stage::Parsing;
        let records = read_records(&self.config.input_path, &self.config.parse)?;
        info!(
            "Parsed {} records from {}",
            records.len(),
            self.config.input_path.display()
        );

        self.stage = Stage::Writing;
        let summary = StoreWriter::new(&self.store, self.config.collection.as_str())
            .with_key_mode(self.config.key_mode)
            .write_all(&records)
            .await?;

        Ok(LoadReport {
            input_path: self.config.input_path.clone(),
            collection: self.config.collection.clone(),
            records: records.len(),
            written: summary.written,
            keys: summary.keys,
            elapsed: start.elapsed(),
        })
    }
}
