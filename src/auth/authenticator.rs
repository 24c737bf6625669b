//! Authenticator implementation
//!
//! Applies credentials to requests and caches command-issued tokens.

use super::types::AuthConfig;
use crate::error::{Error, Result};
use reqwest::RequestBuilder;
use std::sync::Arc;
use tokio::process::Command;
use tokio::sync::RwLock;
use tracing::debug;

/// Authenticator handles applying authentication to HTTP requests
#[derive(Debug, Clone)]
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
    /// Token produced by a token command
    cached_token: Arc<RwLock<Option<String>>>,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config,
            cached_token: Arc::new(RwLock::new(None)),
        }
    }

    /// The auth configuration
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Apply authentication to a request builder
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.config {
            AuthConfig::None => Ok(req),

            AuthConfig::Bearer { token } => Ok(req.bearer_auth(token)),

            AuthConfig::ApiKey { value, query_param } => {
                Ok(req.query(&[(query_param.as_str(), value.as_str())]))
            }

            AuthConfig::Command { .. } => {
                let token = self.get_or_fetch_token().await?;
                Ok(req.bearer_auth(token))
            }
        }
    }

    /// Get the cached command token, running the command on first use
    async fn get_or_fetch_token(&self) -> Result<String> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                return Ok(token.clone());
            }
        }

        let mut cached = self.cached_token.write().await;
        if let Some(token) = cached.as_ref() {
            return Ok(token.clone());
        }

        let token = self.run_token_command().await?;
        *cached = Some(token.clone());
        Ok(token)
    }

    async fn run_token_command(&self) -> Result<String> {
        let AuthConfig::Command { program, args } = &self.config else {
            return Err(Error::auth("token command not configured"));
        };

        debug!("Fetching access token via `{}`", program);
        let output = Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|e| Error::auth(format!("failed to run `{program}`: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::auth(format!(
                "`{program}` exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(Error::auth(format!("`{program}` printed an empty token")));
        }
        Ok(token)
    }
}
