//! Host for running the worker from a terminal.
//!
//! There are no browser windows here: client enumeration is empty and
//! "opening a window" just reports the URL a browser would have opened.

use async_trait::async_trait;
use tracing::info;

use pickme_offline_core::host::{Host, HostError};
use pickme_offline_core::models::{Notification, WindowClient};

#[derive(Debug, Default)]
pub struct ConsoleHost;

#[async_trait]
impl Host for ConsoleHost {
    async fn skip_waiting(&self) -> Result<(), HostError> {
        info!("Host: skip waiting");
        Ok(())
    }

    async fn close_notification(&self, notification: &Notification) -> Result<(), HostError> {
        info!(title = %notification.title, "Host: notification closed");
        Ok(())
    }

    async fn window_clients(&self, _include_uncontrolled: bool) -> Result<Vec<WindowClient>, HostError> {
        Ok(Vec::new())
    }

    async fn focus(&self, client: &WindowClient) -> Result<(), HostError> {
        Err(HostError::ClientNotFound(client.id.clone()))
    }

    fn can_open_window(&self) -> bool {
        true
    }

    async fn open_window(&self, url: &str) -> Result<Option<WindowClient>, HostError> {
        info!(url = %url, "Host: open window");
        Ok(None)
    }
}
