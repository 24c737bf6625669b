//! Record parser module
//!
//! Turns delimited text into an ordered `Vec<Record>`.
//!
//! # Overview
//!
//! - The whole source is read before any record is produced
//! - Rows are split with standard CSV quoting rules
//! - Every row must have exactly five fields; one bad row fails the whole parse
//! - A header row is only skipped when `ParseOptions::skip_header` is set

mod reader;

pub use reader::{parse_records, parse_str, read_records, ParseOptions};

#[cfg(test)]
mod tests;
