//! Pipeline types

use crate::types::DocumentKey;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of a successful load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// File the records were read from
    pub input_path: PathBuf,
    /// Collection the documents were written to
    pub collection: String,
    /// Records parsed from the input
    pub records: usize,
    /// Documents written
    pub written: usize,
    /// Keys of the written documents, in input order
    pub keys: Vec<DocumentKey>,
    /// Wall time of the run
    #[serde(serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    #[allow(clippy::cast_possible_truncation)]
    let millis = d.as_millis() as u64;
    s.serialize_u64(millis)
}
