//! Auth configuration types

use serde::{Deserialize, Serialize};

/// Authentication configuration for the document store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// No authentication (local emulator)
    #[default]
    None,

    /// OAuth2 access token sent as `Authorization: Bearer <token>`
    Bearer {
        /// The access token
        token: String,
    },

    /// API key sent as a query parameter
    ApiKey {
        /// The API key value
        value: String,
        /// Query parameter name
        #[serde(default = "default_api_key_param")]
        query_param: String,
    },

    /// Run a command once and use its trimmed stdout as a Bearer token,
    /// e.g. `gcloud auth print-access-token`
    Command {
        /// Program to run
        program: String,
        /// Program arguments
        #[serde(default)]
        args: Vec<String>,
    },
}

fn default_api_key_param() -> String {
    "key".to_string()
}

impl AuthConfig {
    /// Bearer token auth
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// API key auth using the `key` query parameter
    pub fn api_key(value: impl Into<String>) -> Self {
        Self::ApiKey {
            value: value.into(),
            query_param: default_api_key_param(),
        }
    }

    /// Whether requests carry any credentials
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
