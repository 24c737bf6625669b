//! # docstore-loader
//!
//! A one-shot batch loader: reads five-column CSV records and creates one
//! Firestore document per record.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docstore_loader::{config::{LoadConfig, StoreConfig}, pipeline::Loader, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let store = StoreConfig::emulator("localhost:8080", "demo");
//!     let mut loader = Loader::connect(LoadConfig::new("./names.csv"), &store)?;
//!     let report = loader.run().await?;
//!     println!("wrote {} documents", report.written);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   Vec<Record>   ┌─────────────┐   create/upsert   ┌───────────────┐
//! │  parse   │ ──────────────▶ │   writer    │ ────────────────▶ │ DocumentStore │
//! │  (csv)   │                 │ (sequential)│                   │ Firestore/Mem │
//! └──────────┘                 └─────────────┘                   └───────────────┘
//!       ▲                             ▲                                  │
//!       └──────────── pipeline::Loader (Init → Parsing → Writing → Done) ┘
//! ```
//!
//! Writes are not transactional and, with the default key mode, not
//! idempotent: a failure part way leaves earlier documents in place, and
//! loading the same file twice stores every record twice.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Records, keys and pipeline stages
pub mod types;

/// Loader configuration
pub mod config;

/// Store authentication
pub mod auth;

/// HTTP client
pub mod http;

/// CSV record parser
pub mod parse;

/// Document stores (Firestore, in-memory)
pub mod store;

/// Sequential record writer
pub mod writer;

/// Load orchestration
pub mod pipeline;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use config::{LoadConfig, LoaderConfig, StoreConfig};
pub use parse::{parse_records, read_records, ParseOptions};
pub use pipeline::{LoadReport, Loader};
pub use store::{DocumentStore, FirestoreStore, MemoryStore};
pub use writer::{StoreWriter, WriteSummary};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
