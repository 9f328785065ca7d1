//! Fakes for the worker's capabilities.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use pickme_offline_core::cache::{Cache, CacheError, CacheStorage, MemoryCacheStorage};
use pickme_offline_core::config::WorkerConfig;
use pickme_offline_core::host::{Host, HostError};
use pickme_offline_core::models::{Notification, Request, RequestKey, Response, WindowClient};
use pickme_offline_core::net::{FetchError, Fetcher};
use pickme_offline_core::OfflineCacheWorker;

/// Network that answers from a script and counts every call.
/// Unscripted URLs behave as if offline.
#[derive(Default)]
pub struct ScriptedFetcher {
    routes: Mutex<HashMap<String, Response>>,
    malformed: Mutex<HashSet<String>>,
    calls: Mutex<Vec<String>>,
    offline: AtomicBool,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every precache URL answers 200 with a same-origin body.
    pub fn serving_precache(config: &WorkerConfig) -> Self {
        let fetcher = Self::new();
        for url in &config.precache_urls {
            fetcher.respond(url, Response::ok(format!("body of {}", url)));
        }
        fetcher
    }

    pub fn respond(&self, url: &str, response: Response) {
        self.routes.lock().unwrap().insert(url.to_string(), response);
    }

    pub fn unroute(&self, url: &str) {
        self.routes.lock().unwrap().remove(url);
    }

    /// Requests to this URL fail as malformed, not as a network failure.
    pub fn reject_as_malformed(&self, url: &str) {
        self.malformed.lock().unwrap().insert(url.to_string());
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_for(&self, url: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|u| *u == url).count()
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        self.calls.lock().unwrap().push(request.url.clone());
        if self.malformed.lock().unwrap().contains(&request.url) {
            return Err(FetchError::InvalidHeader {
                name: "x-bad".to_string(),
                reason: "invalid value".to_string(),
            });
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(FetchError::unreachable("offline"));
        }
        self.routes
            .lock()
            .unwrap()
            .get(&request.url)
            .cloned()
            .ok_or_else(|| FetchError::unreachable(format!("no route to {}", request.url)))
    }
}

/// Host that records every call the worker makes.
pub struct RecordingHost {
    pub skip_waiting_calls: AtomicUsize,
    pub closed: Mutex<Vec<Notification>>,
    pub clients: Mutex<Vec<WindowClient>>,
    pub focused: Mutex<Vec<String>>,
    pub opened: Mutex<Vec<String>>,
    pub include_uncontrolled_seen: Mutex<Vec<bool>>,
    pub can_open: bool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::with_clients(Vec::new())
    }

    pub fn with_clients(clients: Vec<WindowClient>) -> Self {
        Self {
            skip_waiting_calls: AtomicUsize::new(0),
            closed: Mutex::new(Vec::new()),
            clients: Mutex::new(clients),
            focused: Mutex::new(Vec::new()),
            opened: Mutex::new(Vec::new()),
            include_uncontrolled_seen: Mutex::new(Vec::new()),
            can_open: true,
        }
    }

    pub fn without_open_window(mut self) -> Self {
        self.can_open = false;
        self
    }

    pub fn skip_waiting_calls(&self) -> usize {
        self.skip_waiting_calls.load(Ordering::SeqCst)
    }

    pub fn focused(&self) -> Vec<String> {
        self.focused.lock().unwrap().clone()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl Host for RecordingHost {
    async fn skip_waiting(&self) -> Result<(), HostError> {
        self.skip_waiting_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn close_notification(&self, notification: &Notification) -> Result<(), HostError> {
        self.closed.lock().unwrap().push(notification.clone());
        Ok(())
    }

    async fn window_clients(&self, include_uncontrolled: bool) -> Result<Vec<WindowClient>, HostError> {
        self.include_uncontrolled_seen.lock().unwrap().push(include_uncontrolled);
        Ok(self.clients.lock().unwrap().clone())
    }

    async fn focus(&self, client: &WindowClient) -> Result<(), HostError> {
        self.focused.lock().unwrap().push(client.id.clone());
        Ok(())
    }

    fn can_open_window(&self) -> bool {
        self.can_open
    }

    async fn open_window(&self, url: &str) -> Result<Option<WindowClient>, HostError> {
        if !self.can_open {
            return Err(HostError::OpenWindowUnsupported);
        }
        self.opened.lock().unwrap().push(url.to_string());
        Ok(Some(WindowClient::new("new", url)))
    }
}

/// Storage whose `delete` fails for one store name.
pub struct FlakyDeleteStorage {
    pub inner: MemoryCacheStorage,
    pub fail_on: String,
}

#[async_trait]
impl CacheStorage for FlakyDeleteStorage {
    async fn open(&self, name: &str) -> Result<Arc<dyn Cache>, CacheError> {
        self.inner.open(name).await
    }

    async fn has(&self, name: &str) -> Result<bool, CacheError> {
        self.inner.has(name).await
    }

    async fn delete(&self, name: &str) -> Result<bool, CacheError> {
        if name == self.fail_on {
            return Err(CacheError::Io(std::io::Error::other("disk busy")));
        }
        self.inner.delete(name).await
    }

    async fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.inner.keys().await
    }
}

/// Storage whose stores fail every lookup and every write.
#[derive(Default)]
pub struct BrokenStorage {
    pub lookups: AtomicUsize,
    pub puts: Arc<AtomicUsize>,
}

struct BrokenCache {
    name: String,
    puts: Arc<AtomicUsize>,
}

fn broken() -> CacheError {
    CacheError::Io(std::io::Error::other("store unavailable"))
}

#[async_trait]
impl Cache for BrokenCache {
    fn name(&self) -> &str {
        &self.name
    }

    async fn match_request(&self, _request: &Request) -> Result<Option<Response>, CacheError> {
        Err(broken())
    }

    async fn put(&self, _request: &Request, _response: Response) -> Result<(), CacheError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        Err(broken())
    }

    async fn delete(&self, _request: &Request) -> Result<bool, CacheError> {
        Err(broken())
    }

    async fn keys(&self) -> Result<Vec<RequestKey>, CacheError> {
        Err(broken())
    }
}

#[async_trait]
impl CacheStorage for BrokenStorage {
    async fn open(&self, name: &str) -> Result<Arc<dyn Cache>, CacheError> {
        Ok(Arc::new(BrokenCache {
            name: name.to_string(),
            puts: self.puts.clone(),
        }))
    }

    async fn has(&self, _name: &str) -> Result<bool, CacheError> {
        Ok(true)
    }

    async fn delete(&self, _name: &str) -> Result<bool, CacheError> {
        Err(broken())
    }

    async fn keys(&self) -> Result<Vec<String>, CacheError> {
        Err(broken())
    }

    async fn match_in(&self, _name: &str, _request: &Request) -> Result<Option<Response>, CacheError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Err(broken())
    }
}

pub struct Harness {
    pub worker: OfflineCacheWorker,
    pub storage: Arc<MemoryCacheStorage>,
    pub network: Arc<ScriptedFetcher>,
    pub host: Arc<RecordingHost>,
}

pub fn harness_with(config: WorkerConfig, network: ScriptedFetcher, host: RecordingHost) -> Harness {
    let storage = Arc::new(MemoryCacheStorage::new());
    let network = Arc::new(network);
    let host = Arc::new(host);
    let worker = OfflineCacheWorker::new(config, storage.clone(), network.clone(), host.clone());
    Harness {
        worker,
        storage,
        network,
        host,
    }
}

pub fn harness() -> Harness {
    let config = WorkerConfig::default();
    let network = ScriptedFetcher::serving_precache(&config);
    harness_with(config, network, RecordingHost::new())
}
