//! CLI commands and argument parsing

use crate::types::KeyMode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Load CSV records into a Firestore collection
#[derive(Parser, Debug)]
#[command(name = "docstore-loader")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse the input and create one document per record
    Load {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        store: StoreArgs,

        /// Target collection
        #[arg(long, env = "FIRESTORE_COLLECTION")]
        collection: Option<String>,

        /// How documents are keyed. `identifier` upserts by record id
        /// instead of creating new documents on every run.
        #[arg(long, value_enum)]
        key_mode: Option<KeyMode>,

        /// Write to an in-memory store instead of Firestore
        #[arg(long)]
        dry_run: bool,
    },

    /// Parse the input without writing anything
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },
}

/// Input file options
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Input CSV file [default: ./names.csv]
    #[arg(short, long, env = "CSV_PATH")]
    pub input: Option<PathBuf>,

    /// Treat the first row as a header and skip it
    #[arg(long)]
    pub skip_header: bool,
}

/// Firestore connection options
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// Google Cloud project id
    #[arg(long, env = "GOOGLE_CLOUD_PROJECT")]
    pub project: Option<String>,

    /// Project id used when `--project` is not given
    #[arg(long = "firestore-project-id", env = "FIRESTORE_PROJECT_ID", hide = true)]
    pub fallback_project: Option<String>,

    /// Firestore database id
    #[arg(long, env = "FIRESTORE_DATABASE")]
    pub database: Option<String>,

    /// Firestore emulator host (e.g. localhost:8080); disables auth
    #[arg(long, env = "FIRESTORE_EMULATOR_HOST")]
    pub emulator_host: Option<String>,

    /// OAuth2 access token
    #[arg(long, env = "FIRESTORE_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// API key
    #[arg(long, env = "FIRESTORE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Single-line JSON report
    Json,
    /// Human-readable output
    Pretty,
}
