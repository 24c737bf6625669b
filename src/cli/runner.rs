//! CLI runner - executes commands

use crate::auth::AuthConfig;
use crate::cli::commands::{Cli, Commands, InputArgs, OutputFormat, StoreArgs};
use crate::config::{load_config, LoaderConfig, StoreConfig};
use crate::error::Result;
use crate::parse::read_records;
use crate::pipeline::{LoadReport, Loader};
use crate::store::MemoryStore;
use crate::types::Stage;
use serde_json::json;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Load { dry_run, .. } => {
                let config = self.resolve_config()?;
                let report = if *dry_run {
                    info!("Dry run: writing to an in-memory store");
                    Loader::new(config.load, MemoryStore::new()).run().await?
                } else {
                    Loader::connect(config.load, &config.store)?.run().await?
                };
                self.print_report(&report, *dry_run)
            }
            Commands::Validate { .. } => self.validate(),
        }
    }

    /// Build the effective configuration: defaults, then the config file,
    /// then flags and environment variables.
    pub fn resolve_config(&self) -> Result<LoaderConfig> {
        let mut config = match &self.cli.config {
            Some(path) => load_config(path).map_err(|e| e.at_stage(Stage::Init))?,
            None => LoaderConfig::default(),
        };

        match &self.cli.command {
            Commands::Load {
                input,
                store,
                collection,
                key_mode,
                ..
            } => {
                apply_input_args(&mut config, input);
                apply_store_args(&mut config.store, store);
                if let Some(collection) = collection {
                    config.load.collection.clone_from(collection);
                }
                if let Some(key_mode) = key_mode {
                    config.load.key_mode = *key_mode;
                }
            }
            Commands::Validate { input } => apply_input_args(&mut config, input),
        }

        config.load.validate().map_err(|e| e.at_stage(Stage::Init))?;
        Ok(config)
    }

    /// Parse the input and report the record count
    fn validate(&self) -> Result<()> {
        let config = self.resolve_config()?;
        let records = read_records(&config.load.input_path, &config.load.parse)
            .map_err(|e| e.at_stage(Stage::Parsing))?;

        match self.cli.format {
            OutputFormat::Json => {
                let out = json!({
                    "input_path": config.load.input_path,
                    "records": records.len(),
                    "valid": true,
                });
                println!("{out}");
            }
            OutputFormat::Pretty => {
                println!(
                    "{}: {} records OK",
                    config.load.input_path.display(),
                    records.len()
                );
                if self.cli.verbose {
                    for record in &records {
                        println!("  {} {} ({})", record.id, record.transliteration, record.meaning);
                    }
                }
            }
        }
        Ok(())
    }

    fn print_report(&self, report: &LoadReport, dry_run: bool) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => {
                let mut out = serde_json::to_value(report)?;
                out["dry_run"] = json!(dry_run);
                println!("{out}");
            }
            OutputFormat::Pretty => {
                let suffix = if dry_run { " (dry run)" } else { "" };
                println!(
                    "Upload complete{suffix}: {} of {} records written to '{}' in {:.2?}",
                    report.written, report.records, report.collection, report.elapsed
                );
                if self.cli.verbose {
                    for key in &report.keys {
                        println!("  {}", key.name.as_deref().unwrap_or(&key.id));
                    }
                }
            }
        }
        Ok(())
    }
}

fn apply_input_args(config: &mut LoaderConfig, args: &InputArgs) {
    if let Some(input) = &args.input {
        config.load.input_path.clone_from(input);
    }
    if args.skip_header {
        config.load.parse.skip_header = true;
    }
}

fn apply_store_args(store: &mut StoreConfig, args: &StoreArgs) {
    if let Some(project) = args.project.as_ref().or(args.fallback_project.as_ref()) {
        store.project_id.clone_from(project);
    }
    if let Some(database) = &args.database {
        store.database.clone_from(database);
    }
    if let Some(timeout) = args.timeout_secs {
        store.timeout_secs = timeout;
    }

    if let Some(host) = &args.emulator_host {
        let emulator = StoreConfig::emulator(host, store.project_id.clone());
        store.base_url = emulator.base_url;
        store.auth = AuthConfig::None;
        return;
    }

    if let Some(token) = &args.access_token {
        store.auth = AuthConfig::bearer(token.clone());
    } else if let Some(key) = &args.api_key {
        store.auth = AuthConfig::api_key(key.clone());
    }

    if store.auth.is_none() {
        warn!("No Firestore credentials configured; requests will be unauthenticated");
    }
}
