//! CSV reader for input records

use crate::error::{Error, Result};
use crate::types::Record;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Options controlling how input rows are parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Drop the first row instead of treating it as data
    #[serde(default)]
    pub skip_header: bool,
}

fn default_delimiter() -> char {
    ','
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            skip_header: false,
        }
    }
}

impl ParseOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Skip (or keep) the first row
    #[must_use]
    pub fn skip_header(mut self, skip: bool) -> Self {
        self.skip_header = skip;
        self
    }

    fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(|b| b.is_ascii() && *b != b'"')
            .ok_or_else(|| {
                Error::invalid_value("delimiter", format!("'{}' is not an ASCII non-quote character", self.delimiter))
            })
    }
}

/// Read and parse the file at `path`
pub fn read_records(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Vec<Record>> {
    let path = path.as_ref();
    info!("Reading CSV from {}", path.display());

    let file = File::open(path).map_err(|source| Error::InputUnreadable {
        path: path.display().to_string(),
        source,
    })?;
    parse_records(file, options)
}

/// Parse records from an in-memory string
pub fn parse_str(input: &str, options: &ParseOptions) -> Result<Vec<Record>> {
    parse_records(input.as_bytes(), options)
}

/// Parse all records from `source`.
///
/// The source is read to the end first. Parsing stops at the first
/// malformed row and no records are returned in that case.
pub fn parse_records<R: Read>(mut source: R, options: &ParseOptions) -> Result<Vec<Record>> {
    let delimiter = options.delimiter_byte()?;

    let mut buf = Vec::new();
    source.read_to_end(&mut buf)?;
    check_quoting(&buf, delimiter)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(buf.as_slice());

    let mut rows = reader.records();
    if options.skip_header {
        if let Some(header) = rows.next() {
            let header = header.map_err(csv_error)?;
            debug!("Skipping header row: {:?}", header);
        }
    }

    let mut records = Vec::new();
    for row in rows {
        let row = row.map_err(csv_error)?;
        let line = row.position().map_or(0, csv::Position::line);
        let found = row.len();

        let record = Record::from_fields(row.iter()).ok_or(Error::MalformedRecord {
            line,
            expected: Record::FIELD_COUNT,
            found,
        })?;
        records.push(record);
    }

    debug!("Parsed {} records", records.len());
    Ok(records)
}

/// Position within a field while scanning for quote errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    Start,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Reject quoting the `csv` reader would otherwise accept.
///
/// A `"` may only open a field, appear doubled inside a quoted field, or
/// close a quoted field right before a delimiter or line end. Every quoted
/// field must be closed.
fn check_quoting(buf: &[u8], delimiter: u8) -> Result<()> {
    let mut state = FieldState::Start;
    let mut line: u64 = 1;
    let mut quote_line: u64 = 1;

    for &b in buf {
        state = match (state, b) {
            (FieldState::Start, b'"') => {
                quote_line = line;
                FieldState::Quoted
            }
            (_, b'\n' | b'\r') if state != FieldState::Quoted => FieldState::Start,
            (_, d) if d == delimiter && state != FieldState::Quoted => FieldState::Start,
            (FieldState::Unquoted, b'"') => {
                return Err(quote_error(line, "bare \" in non-quoted field"));
            }
            (FieldState::Start | FieldState::Unquoted, _) => FieldState::Unquoted,
            (FieldState::Quoted, b'"') => FieldState::QuoteInQuoted,
            (FieldState::Quoted, _) => FieldState::Quoted,
            (FieldState::QuoteInQuoted, b'"') => FieldState::Quoted,
            (FieldState::QuoteInQuoted, _) => {
                return Err(quote_error(line, "extraneous or missing \" in quoted field"));
            }
        };
        if b == b'\n' {
            line += 1;
        }
    }

    if state == FieldState::Quoted {
        return Err(quote_error(quote_line, "quoted field is never closed"));
    }
    Ok(())
}

fn quote_error(line: u64, message: &str) -> Error {
    Error::Csv {
        line,
        message: message.to_string(),
    }
}

fn csv_error(err: csv::Error) -> Error {
    let line = err.position().map_or(0, csv::Position::line);
    Error::Csv {
        line,
        message: err.to_string(),
    }
}
