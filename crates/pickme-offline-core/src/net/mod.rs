//! Network access for the worker.
//!
//! The worker never talks to reqwest directly; it goes through the `Fetcher`
//! capability so the cache-first logic can be exercised against a scripted
//! network in tests. `HttpFetcher` is the real implementation.

pub mod error;
pub mod http;

use async_trait::async_trait;

use crate::models::{Request, Response};

pub use error::FetchError;
pub use http::HttpFetcher;

/// Perform a real network fetch for a request.
///
/// A returned `Ok` may carry any status; only transport-level failures
/// (offline, DNS, TLS, timeout) are errors.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError>;
}
