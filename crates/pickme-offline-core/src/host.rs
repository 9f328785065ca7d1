//! The host runtime as seen by the worker.
//!
//! Everything the worker asks of its environment that is not a cache or a
//! network call goes through `Host`: taking over from an older version,
//! closing notifications, and finding or opening application windows.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Notification, WindowClient};

#[derive(Error, Debug)]
pub enum HostError {
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    #[error("Opening windows is not supported by this host")]
    OpenWindowUnsupported,
}

#[async_trait]
pub trait Host: Send + Sync {
    /// Activate this worker version now instead of waiting for every page
    /// controlled by the previous version to close.
    async fn skip_waiting(&self) -> Result<(), HostError>;

    async fn close_notification(&self, notification: &Notification) -> Result<(), HostError>;

    /// Every window of the origin, in the host's enumeration order.
    /// `include_uncontrolled` also lists windows this worker does not control.
    async fn window_clients(&self, include_uncontrolled: bool)
        -> Result<Vec<WindowClient>, HostError>;

    async fn focus(&self, client: &WindowClient) -> Result<(), HostError>;

    /// Whether `open_window` is available at all.
    fn can_open_window(&self) -> bool;

    async fn open_window(&self, url: &str) -> Result<Option<WindowClient>, HostError>;
}
