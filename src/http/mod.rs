//! HTTP client module
//!
//! Thin wrapper over `reqwest` used by the Firestore store.
//!
//! # Features
//!
//! - **Authentication**: integration with the auth module
//! - **Error classification**: non-2xx responses become `Error::HttpStatus`,
//!   timeouts become `Error::Timeout`
//!
//! Requests are sent exactly once. There is no retry, backoff or rate
//! limiting; a failed request is returned to the caller as-is.

mod client;

pub use client::HttpClient;
