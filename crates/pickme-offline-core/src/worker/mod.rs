//! The offline cache worker.
//!
//! `OfflineCacheWorker` reacts to the five events a host dispatches to it:
//!
//! - install: precache the configured URLs into the current-version store
//! - activate: delete every store whose name is not the current version
//! - fetch: cache first, then network, then the offline page for navigations
//! - message: `SKIP_WAITING` asks the host to activate this version now
//! - notification click: focus an open application window or open one
//!
//! Each handler's future completes only once the work it started has
//! settled, with one exception: the cache write after a successful network
//! fetch runs as a detached task so the page gets its response without
//! waiting on storage. Failures of that write are logged and dropped.

mod offline_page;

use std::sync::Arc;

use futures::future::{join_all, try_join_all};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{Cache, CacheError, CacheStorage};
use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};
use crate::host::Host;
use crate::models::{Method, Notification, Request, Response, WorkerMessage};
use crate::net::{FetchError, Fetcher};

pub use offline_page::{offline_page, OFFLINE_PAGE_HTML};

/// An event dispatched by the host.
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    Install,
    Activate,
    Fetch(Request),
    Message(WorkerMessage),
    NotificationClick(Notification),
}

/// What handling an event produced.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    Installed,
    /// Names of the stale stores that were deleted
    Activated(Vec<String>),
    Response(Response),
    /// Whether the message made the worker ask to skip waiting
    Message(bool),
    NotificationClick(ClickOutcome),
}

/// What a notification click ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// An open application window (by client id) was focused
    Focused(String),
    /// A new window was opened at this URL
    Opened(String),
    /// No matching window and the host cannot open one
    Nothing,
}

pub struct OfflineCacheWorker {
    config: Arc<WorkerConfig>,
    caches: Arc<dyn CacheStorage>,
    network: Arc<dyn Fetcher>,
    host: Arc<dyn Host>,
    background: Mutex<Vec<JoinHandle<()>>>,
}

impl OfflineCacheWorker {
    pub fn new(
        config: WorkerConfig,
        caches: Arc<dyn CacheStorage>,
        network: Arc<dyn Fetcher>,
        host: Arc<dyn Host>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            caches,
            network,
            host,
            background: Mutex::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    pub fn cache_name(&self) -> &str {
        &self.config.cache_name
    }

    /// Route a host event to its handler.
    pub async fn dispatch(&self, event: WorkerEvent) -> WorkerResult<EventOutcome> {
        match event {
            WorkerEvent::Install => self.install().await.map(|_| EventOutcome::Installed),
            WorkerEvent::Activate => self.activate().await.map(EventOutcome::Activated),
            WorkerEvent::Fetch(request) => self.fetch(&request).await.map(EventOutcome::Response),
            WorkerEvent::Message(message) => self.message(&message).await.map(EventOutcome::Message),
            WorkerEvent::NotificationClick(notification) => self
                .notification_click(&notification)
                .await
                .map(EventOutcome::NotificationClick),
        }
    }

    // ===== Install =====

    /// Open the current-version store and precache every configured URL.
    ///
    /// All or nothing: one failed or non-2xx fetch fails the install and no
    /// precache entry is written.
    pub async fn install(&self) -> WorkerResult<()> {
        let cache = self.caches.open(&self.config.cache_name).await?;
        info!(cache = %self.config.cache_name, "Cache opened");

        self.add_all(cache.as_ref(), &self.config.precache_urls).await?;
        info!(
            cache = %self.config.cache_name,
            count = self.config.precache_urls.len(),
            "Precache complete"
        );
        Ok(())
    }

    async fn add_all(&self, cache: &dyn Cache, urls: &[String]) -> WorkerResult<()> {
        let requests: Vec<Request> = urls.iter().map(|url| Request::get(url.as_str())).collect();

        let fetches = requests.iter().map(|request| async move {
            match self.network.fetch(request).await {
                Ok(response) if response.is_success() => Ok(response),
                Ok(response) => Err(WorkerError::Precache {
                    url: request.url.clone(),
                    source: FetchError::BadStatus {
                        status: response.status,
                        url: request.url.clone(),
                    },
                }),
                Err(source) => Err(WorkerError::Precache {
                    url: request.url.clone(),
                    source,
                }),
            }
        });
        let responses = try_join_all(fetches).await?;

        for (request, response) in requests.iter().zip(responses) {
            cache.put(request, response).await?;
        }
        Ok(())
    }

    // ===== Activate =====

    /// Delete every store whose name is not the current version.
    ///
    /// Deletions run concurrently and independently; one failing does not
    /// stop the others or fail activation. Returns the stores removed.
    pub async fn activate(&self) -> WorkerResult<Vec<String>> {
        let current = self.config.cache_name.as_str();
        let stale: Vec<String> = self
            .caches
            .keys()
            .await?
            .into_iter()
            .filter(|name| name != current)
            .collect();

        let deletions = stale.iter().map(|name| async move {
            info!(cache = %name, "Deleting stale cache");
            match self.caches.delete(name).await {
                Ok(_) => Some(name.clone()),
                Err(e) => {
                    warn!(cache = %name, error = %e, "Failed to delete stale cache");
                    None
                }
            }
        });

        Ok(join_all(deletions).await.into_iter().flatten().collect())
    }

    // ===== Fetch =====

    /// Cache first, then network.
    ///
    /// A network response is stored only when it is exactly `200` and
    /// same-origin. When the network is unreachable, navigations get the
    /// offline page; every other request, and any malformed request, gets
    /// the error.
    pub async fn fetch(&self, request: &Request) -> WorkerResult<Response> {
        match self.caches.match_in(&self.config.cache_name, request).await {
            Ok(Some(cached)) => {
                debug!(url = %request.url, "Serving from cache");
                return Ok(cached);
            }
            Ok(None) => {}
            Err(e) => warn!(url = %request.url, error = %e, "Cache lookup failed, using network"),
        }

        match self.network.fetch(request).await {
            Ok(response) => {
                if response.is_cacheable() {
                    self.spawn_cache_write(request.clone(), response.clone()).await;
                } else {
                    debug!(
                        url = %request.url,
                        status = response.status,
                        response_type = ?response.response_type,
                        "Not caching response"
                    );
                }
                Ok(response)
            }
            Err(e) if request.is_navigation() && e.is_network() => {
                warn!(url = %request.url, error = %e, "Navigation failed, serving offline page");
                Ok(offline_page())
            }
            Err(e) => {
                debug!(url = %request.url, error = %e, "Network request failed");
                Err(WorkerError::Network(e))
            }
        }
    }

    /// Store a response copy without making the caller wait for it.
    async fn spawn_cache_write(&self, request: Request, response: Response) {
        let caches = Arc::clone(&self.caches);
        let config = Arc::clone(&self.config);

        let handle = tokio::spawn(async move {
            // Stores only take GET entries
            if request.method != Method::Get {
                debug!(url = %request.url, method = %request.method, "Skipping cache write");
                return;
            }
            let result: Result<(), CacheError> = async {
                caches.open(&config.cache_name).await?.put(&request, response).await
            }
            .await;
            if let Err(e) = result {
                debug!(url = %request.url, error = %e, "Background cache write failed");
            }
        });

        let mut background = self.background.lock().await;
        background.retain(|h| !h.is_finished());
        background.push(handle);
    }

    /// Wait for every background cache write started so far.
    pub async fn flush_background(&self) {
        let handles = std::mem::take(&mut *self.background.lock().await);
        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "Background cache write task failed");
            }
        }
    }

    // ===== Message =====

    /// Returns whether the host was asked to skip waiting.
    pub async fn message(&self, message: &WorkerMessage) -> WorkerResult<bool> {
        match message {
            WorkerMessage::SkipWaiting => {
                info!("Skip waiting requested");
                self.host.skip_waiting().await?;
                Ok(true)
            }
            other => {
                debug!(message = ?other, "Ignoring message");
                Ok(false)
            }
        }
    }

    /// Parse a raw JSON message and handle it. Malformed payloads are ignored.
    pub async fn message_json(&self, json: &str) -> WorkerResult<bool> {
        match WorkerMessage::from_json(json) {
            Ok(message) => self.message(&message).await,
            Err(e) => {
                debug!(error = %e, "Ignoring malformed message");
                Ok(false)
            }
        }
    }

    // ===== Notification click =====

    /// Close the notification, then focus the first open application window
    /// or, failing that, open one at the notification's URL.
    pub async fn notification_click(&self, notification: &Notification) -> WorkerResult<ClickOutcome> {
        info!(title = %notification.title, tag = ?notification.tag, "Notification clicked");
        self.host.close_notification(notification).await?;

        let clients = self.host.window_clients(true).await?;
        if let Some(client) = clients
            .iter()
            .find(|c| c.url.contains(self.config.app_domain.as_str()))
        {
            debug!(client = %client.id, url = %client.url, "Focusing open window");
            self.host.focus(client).await?;
            return Ok(ClickOutcome::Focused(client.id.clone()));
        }

        if !self.host.can_open_window() {
            debug!("No application window open and host cannot open one");
            return Ok(ClickOutcome::Nothing);
        }

        let url = notification
            .target_url()
            .filter(|u| !u.is_empty())
            .unwrap_or(self.config.default_app_url.as_str());
        debug!(url = %url, "Opening window");
        self.host.open_window(url).await?;
        Ok(ClickOutcome::Opened(url.to_string()))
    }
}
