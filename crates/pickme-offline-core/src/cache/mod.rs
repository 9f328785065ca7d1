//! Named cache stores for offline data access.
//!
//! A `CacheStorage` holds any number of named `Cache`s. The worker only ever
//! writes to the store named after its version; older stores are removed
//! when a new version activates.
//!
//! Implementations:
//! - `MemoryCacheStorage`: process-local, used by tests and embedders
//! - `DiskCacheStorage`: one directory per store, one JSON file per entry

pub mod disk;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Request, RequestKey, Response};

pub use disk::DiskCacheStorage;
pub use memory::MemoryCacheStorage;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Invalid cache name: {0:?}")]
    InvalidName(String),

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode cache entry: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// One named cache store: request identity to response snapshot.
#[async_trait]
pub trait Cache: Send + Sync {
    fn name(&self) -> &str;

    /// Stored response for the request, if any.
    async fn match_request(&self, request: &Request) -> Result<Option<Response>, CacheError>;

    /// Store a response under the request's key. Last write wins.
    async fn put(&self, request: &Request, response: Response) -> Result<(), CacheError>;

    /// Remove one entry. Returns whether it existed.
    async fn delete(&self, request: &Request) -> Result<bool, CacheError>;

    async fn keys(&self) -> Result<Vec<RequestKey>, CacheError>;
}

/// The set of named cache stores for an origin.
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Open the named store, creating it if absent.
    async fn open(&self, name: &str) -> Result<Arc<dyn Cache>, CacheError>;

    async fn has(&self, name: &str) -> Result<bool, CacheError>;

    /// Delete the named store and all its entries. Returns whether it existed.
    async fn delete(&self, name: &str) -> Result<bool, CacheError>;

    /// Names of all existing stores.
    async fn keys(&self) -> Result<Vec<String>, CacheError>;

    /// Look a request up in one store without creating it.
    async fn match_in(&self, name: &str, request: &Request) -> Result<Option<Response>, CacheError> {
        if !self.has(name).await? {
            return Ok(None);
        }
        self.open(name).await?.match_request(request).await
    }
}

/// Store names become directory names, so keep them to one path segment.
pub(crate) fn validate_name(name: &str) -> Result<(), CacheError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if invalid {
        return Err(CacheError::InvalidName(name.to_string()));
    }
    Ok(())
}
