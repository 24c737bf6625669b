//! Loader configuration
//!
//! Configuration is an explicit value handed to the pipeline. Defaults are
//! filled in here and at the CLI boundary; nothing below the CLI reads the
//! process environment.
//!
//! A config file is optional YAML:
//!
//! ```yaml
//! input_path: ./names.csv
//! collection: names
//! skip_header: false
//! key_mode: generated
//! store:
//!   project_id: my-project
//!   auth:
//!     type: command
//!     program: gcloud
//!     args: [auth, print-access-token]
//! ```

use crate::auth::AuthConfig;
use crate::error::{Error, Result, ResultExt};
use crate::parse::ParseOptions;
use crate::types::KeyMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Input file used when none is configured
pub const DEFAULT_INPUT_PATH: &str = "./names.csv";

/// Collection written to when none is configured
pub const DEFAULT_COLLECTION: &str = "names";

/// Firestore database id used when none is configured
pub const DEFAULT_DATABASE: &str = "(default)";

/// Production Firestore endpoint
pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Load Config
// ============================================================================

/// What to load and where to put it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadConfig {
    /// Input CSV file
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,

    /// Target collection
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Row parsing options
    #[serde(flatten)]
    pub parse: ParseOptions,

    /// Document keying
    #[serde(default)]
    pub key_mode: KeyMode,
}

fn default_input_path() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT_PATH)
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            collection: default_collection(),
            parse: ParseOptions::default(),
            key_mode: KeyMode::default(),
        }
    }
}

impl LoadConfig {
    /// Config for `input_path` with every other setting defaulted
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            ..Self::default()
        }
    }

    /// Set the target collection
    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Set the parse options
    #[must_use]
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    /// Set the key mode
    #[must_use]
    pub fn with_key_mode(mut self, key_mode: KeyMode) -> Self {
        self.key_mode = key_mode;
        self
    }

    /// Check settings that would otherwise fail late
    pub fn validate(&self) -> Result<()> {
        if self.input_path.as_os_str().is_empty() {
            return Err(Error::invalid_value("input_path", "cannot be empty"));
        }
        if self.collection.trim().is_empty() {
            return Err(Error::invalid_value("collection", "cannot be empty"));
        }
        Ok(())
    }
}

// ============================================================================
// Store Config
// ============================================================================

/// How to reach the Firestore database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Google Cloud project id
    #[serde(default)]
    pub project_id: String,

    /// Database id
    #[serde(default = "default_database")]
    pub database: String,

    /// API endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Credentials
    #[serde(default)]
    pub auth: AuthConfig,
}

fn default_database() -> String {
    DEFAULT_DATABASE.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            database: default_database(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            auth: AuthConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Production endpoint for `project_id`, without credentials
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Self::default()
        }
    }

    /// Local emulator at `host` (e.g. `localhost:8080`). The emulator
    /// accepts unauthenticated requests.
    pub fn emulator(host: &str, project_id: impl Into<String>) -> Self {
        let base_url = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("http://{host}")
        };
        Self {
            base_url,
            auth: AuthConfig::None,
            ..Self::new(project_id)
        }
    }

    /// Set credentials
    #[must_use]
    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = auth;
        self
    }

    /// Set the API endpoint
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Check settings needed before the first request
    pub fn validate(&self) -> Result<()> {
        if self.project_id.trim().is_empty() {
            return Err(Error::missing_field("project_id"));
        }
        if self.database.trim().is_empty() {
            return Err(Error::invalid_value("database", "cannot be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be greater than zero"));
        }
        Ok(())
    }
}

// ============================================================================
// Config File
// ============================================================================

/// Complete configuration as read from a YAML file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Input and target settings
    #[serde(flatten)]
    pub load: LoadConfig,

    /// Store connection settings
    #[serde(default)]
    pub store: StoreConfig,
}

/// Load configuration from a YAML file
pub fn load_config(path: impl AsRef<Path>) -> Result<LoaderConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    load_config_from_str(&content)
}

/// Load configuration from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<LoaderConfig> {
    let config: LoaderConfig = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse config YAML: {e}")))?;
    config.load.validate()?;
    Ok(config)
}
