//! Worker lifecycle.
//!
//! A worker version goes through the same states a browser puts a service
//! worker through:
//!
//! ```text
//! Parsed -> Installing -> Installed (waiting) -> Activating -> Activated
//!               \
//!                -> Redundant (install failed)
//! ```
//!
//! `Registration` drives those transitions around an `OfflineCacheWorker`
//! and only routes fetches and notification clicks to an activated worker.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{WorkerError, WorkerResult};
use crate::models::{Notification, Request, Response, WorkerMessage};
use crate::worker::{ClickOutcome, OfflineCacheWorker};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WorkerState {
    /// Registered, install not yet run
    #[default]
    Parsed,
    Installing,
    /// Installed and waiting for the previous version to let go
    Installed,
    Activating,
    /// Active and handling fetches
    Activated,
    /// Discarded; never becomes active
    Redundant,
}

pub struct Registration {
    worker: OfflineCacheWorker,
    state: WorkerState,
    /// Skip waiting was asked for before install finished
    skip_waiting: bool,
}

impl Registration {
    pub fn new(worker: OfflineCacheWorker) -> Self {
        Self {
            worker,
            state: WorkerState::Parsed,
            skip_waiting: false,
        }
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    fn require(&self, expected: WorkerState, action: &'static str) -> WorkerResult<()> {
        if self.state != expected {
            return Err(WorkerError::InvalidState {
                action,
                state: self.state,
            });
        }
        Ok(())
    }

    fn transition(&mut self, to: WorkerState) {
        info!(
            cache = %self.worker.cache_name(),
            from = ?self.state,
            to = ?to,
            "Worker state change"
        );
        self.state = to;
    }

    /// Run the install handler. A failed install makes this version
    /// redundant; it can never be activated. If skip waiting was requested
    /// earlier, a successful install goes straight on to activation.
    pub async fn install(&mut self) -> WorkerResult<()> {
        self.require(WorkerState::Parsed, "install")?;
        self.transition(WorkerState::Installing);

        match self.worker.install().await {
            Ok(()) => {
                self.transition(WorkerState::Installed);
                if self.skip_waiting {
                    self.activate().await?;
                }
                Ok(())
            }
            Err(e) => {
                warn!(cache = %self.worker.cache_name(), error = %e, "Install failed");
                self.transition(WorkerState::Redundant);
                Err(e)
            }
        }
    }

    /// Run the activate handler. If it errors the version stays installed
    /// so activation can be attempted again.
    pub async fn activate(&mut self) -> WorkerResult<Vec<String>> {
        self.require(WorkerState::Installed, "activate")?;
        self.transition(WorkerState::Activating);

        match self.worker.activate().await {
            Ok(removed) => {
                self.transition(WorkerState::Activated);
                Ok(removed)
            }
            Err(e) => {
                warn!(cache = %self.worker.cache_name(), error = %e, "Activate failed");
                self.transition(WorkerState::Installed);
                Err(e)
            }
        }
    }

    /// Deliver a page message. A skip-waiting request activates an
    /// installed worker right away, or is held until install completes.
    /// A redundant version takes no messages.
    pub async fn post_message(&mut self, message: &WorkerMessage) -> WorkerResult<bool> {
        if self.state == WorkerState::Redundant {
            return Err(WorkerError::InvalidState {
                action: "post a message to",
                state: self.state,
            });
        }

        let skip = self.worker.message(message).await?;
        if skip {
            match self.state {
                WorkerState::Installed => {
                    self.activate().await?;
                }
                WorkerState::Parsed | WorkerState::Installing => self.skip_waiting = true,
                _ => {}
            }
        }
        Ok(skip)
    }

    pub async fn fetch(&self, request: &Request) -> WorkerResult<Response> {
        self.require(WorkerState::Activated, "fetch through")?;
        self.worker.fetch(request).await
    }

    pub async fn notification_click(&self, notification: &Notification) -> WorkerResult<ClickOutcome> {
        self.require(WorkerState::Activated, "deliver a notification click to")?;
        self.worker.notification_click(notification).await
    }
}
