//! Authentication module
//!
//! Supports: no auth (emulator), Bearer access token, API key, and a token
//! command whose output is used as a Bearer token.
//!
//! The `Authenticator` applies the configured credentials to each request and
//! caches the token produced by a token command for the lifetime of the run.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;
