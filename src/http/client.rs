//! HTTP client
//!
//! Sends single-shot JSON requests with authentication applied, and turns
//! transport failures and error statuses into crate errors.

use crate::auth::{AuthConfig, Authenticator};
use crate::error::{Error, Result};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("docstore-loader/", env!("CARGO_PKG_VERSION"));

/// HTTP client for talking to the document store
pub struct HttpClient {
    client: Client,
    timeout: Duration,
    authenticator: Authenticator,
}

impl HttpClient {
    /// Create a client with a per-request timeout and authentication
    pub fn new(timeout: Duration, auth_config: AuthConfig) -> Result<Self> {
        if timeout.is_zero() {
            return Err(Error::invalid_value("timeout", "must be greater than zero"));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            timeout,
            authenticator: Authenticator::new(auth_config),
        })
    }

    /// The per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POST a JSON body and parse the JSON response
    pub async fn post_json<T: DeserializeOwned>(&self, url: &Url, body: &Value) -> Result<T> {
        self.send_json(Method::POST, url, body).await
    }

    /// PATCH a JSON body and parse the JSON response
    pub async fn patch_json<T: DeserializeOwned>(&self, url: &Url, body: &Value) -> Result<T> {
        self.send_json(Method::PATCH, url, body).await
    }

    /// Send a request once. Non-success statuses are returned as errors.
    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &Url,
        body: &Value,
    ) -> Result<T> {
        let req = self.client.request(method.clone(), url.clone()).json(body);
        let req = self.authenticator.apply(req).await?;

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
                }
            } else {
                Error::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Request failed: {} {} -> {}", method, url, status);
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!("Request succeeded: {} {}", method, url);
        Ok(response.json().await?)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("timeout", &self.timeout)
            .field("has_auth", &!self.authenticator.config().is_none())
            .finish_non_exhaustive()
    }
}
