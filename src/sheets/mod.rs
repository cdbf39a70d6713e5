mod auth;
mod client;
mod envelope;
#[cfg(test)]
pub(crate) mod mock;
pub mod request;
mod service;
mod update;

pub use client::{AUTH_SCOPE, HttpTransport};
pub use request::{BatchUpdateResponse, Dimension, Request};
pub use service::Service;
pub use update::UpdateRequest;

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Authenticated access to the Sheets REST API.
///
/// Paths are relative to the API base URL. Implementations return the raw
/// response body whatever the HTTP status; error envelopes are decoded by
/// the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<u8>>;

    async fn post(&self, path: &str, body: &Value) -> Result<Vec<u8>>;
}
