//! Core library for pickme-offline.
//!
//! This crate provides the cache-first offline worker for the PickMe web
//! application together with the pieces it is built from:
//!
//! - `models`: requests, responses, messages, notifications and clients
//! - `cache`: the named cache store capability, in memory and on disk
//! - `net`: the network fetch capability and its reqwest implementation
//! - `host`: the host runtime capability (skip-waiting, windows, notifications)
//! - `worker`: `OfflineCacheWorker` and its event handlers
//! - `lifecycle`: install / activate state tracking for a worker version
//! - `config`: worker configuration (cache version, precache list, app URLs)

pub mod cache;
pub mod config;
pub mod error;
pub mod host;
pub mod lifecycle;
pub mod models;
pub mod net;
pub mod worker;

pub use cache::{Cache, CacheError, CacheStorage, DiskCacheStorage, MemoryCacheStorage};
pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use host::{Host, HostError};
pub use lifecycle::{Registration, WorkerState};
pub use models::{
    Destination, Method, Notification, NotificationData, Request, RequestKey, Response,
    ResponseType, WindowClient, WorkerMessage,
};
pub use net::{FetchError, Fetcher, HttpFetcher};
pub use worker::{ClickOutcome, EventOutcome, OfflineCacheWorker, WorkerEvent};
