//! CLI module
//!
//! Command-line interface for the loader.
//!
//! # Commands
//!
//! - `load` - Parse the input file and write every record to the collection
//! - `validate` - Parse the input file only and report what would be written

mod commands;
mod runner;

pub use commands::{Cli, Commands, InputArgs, OutputFormat, StoreArgs};
pub use runner::Runner;
