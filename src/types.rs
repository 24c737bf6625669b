//! Common types used throughout the loader
//!
//! This module contains the record model, pipeline stages and the
//! small value types shared by the parser, writer and stores.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type, the shape of a stored document
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Record
// ============================================================================

/// One row of input: an external identifier plus four free-text fields.
///
/// Columns map positionally, in this order. The identifier is ordinary data;
/// it is not checked for uniqueness and is not the storage key unless
/// [`KeyMode::Identifier`] is selected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    /// External identifier
    pub id: String,
    /// Primary script form
    pub arabic: String,
    /// Romanized form
    pub transliteration: String,
    /// Short gloss
    #[serde(rename = "meaning_shaykh")]
    pub meaning: String,
    /// Longer explanatory text
    pub explanation: String,
}

impl Record {
    /// Number of columns every input row must have
    pub const FIELD_COUNT: usize = 5;

    /// Build a record from a row, copying fields verbatim.
    ///
    /// Returns `None` when the row does not have exactly
    /// [`Record::FIELD_COUNT`] fields.
    pub fn from_fields<I, S>(fields: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut it = fields.into_iter().map(Into::<String>::into);
        let record = Self {
            id: it.next()?,
            arabic: it.next()?,
            transliteration: it.next()?,
            meaning: it.next()?,
            explanation: it.next()?,
        };
        if it.next().is_some() {
            return None;
        }
        Some(record)
    }

    /// Field name/value pairs in column order, as they are stored
    pub fn fields(&self) -> [(&'static str, &str); Record::FIELD_COUNT] {
        [
            ("id", self.id.as_str()),
            ("arabic", self.arabic.as_str()),
            ("transliteration", self.transliteration.as_str()),
            ("meaning_shaykh", self.meaning.as_str()),
            ("explanation", self.explanation.as_str()),
        ]
    }

    /// The record as a document body
    pub fn to_document(&self) -> JsonObject {
        self.fields()
            .into_iter()
            .map(|(k, v)| (k.to_string(), JsonValue::String(v.to_string())))
            .collect()
    }
}

// ============================================================================
// Document Keys
// ============================================================================

/// Key of a document in the remote store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentKey {
    /// Short document id (last path segment)
    pub id: String,
    /// Fully qualified resource name, when the store reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl DocumentKey {
    /// Create a key with only a short id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    /// Create a key from a resource name like `projects/p/databases/d/documents/c/abc`
    pub fn from_resource_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let id = name.rsplit('/').next().unwrap_or_default().to_string();
        Self {
            id,
            name: Some(name),
        }
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

// ============================================================================
// Key Mode
// ============================================================================

/// How documents are keyed in the remote collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum KeyMode {
    /// The store assigns a fresh key per create; re-runs duplicate documents
    #[default]
    Generated,
    /// The record identifier is the key; writes upsert
    Identifier,
}

// ============================================================================
// Pipeline Stage
// ============================================================================

/// Stage of a load run. Runs move forward only: `Init → Parsing → Writing → Done`,
/// or from any stage to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Configuration and store handle acquisition
    #[default]
    Init,
    /// Reading and parsing the input file
    Parsing,
    /// Creating documents
    Writing,
    /// All records written
    Done,
    /// Terminal failure
    Failed,
}

impl Stage {
    /// Whether no further transitions are possible
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Failed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Init => "init",
            Stage::Parsing => "parsing",
            Stage::Writing => "writing",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(s)
    }
}
