//! pickme-offline - drive the PickMe offline worker from a terminal.
//!
//! Runs worker events against a real origin with an on-disk cache store,
//! which is handy for checking that a deployment precaches cleanly and for
//! inspecting what a version has stored.

mod console_host;

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pickme_offline_core::cache::{CacheStorage, DiskCacheStorage};
use pickme_offline_core::models::{Notification, Request};
use pickme_offline_core::net::HttpFetcher;
use pickme_offline_core::{ClickOutcome, OfflineCacheWorker, WorkerConfig};

use console_host::ConsoleHost;

/// Environment variable overriding the configured origin
const ORIGIN_ENV: &str = "PICKME_ORIGIN";

const USAGE: &str = "\
Usage: pickme-offline <command>

Commands:
  install                     Precache the configured URLs
  activate                    Delete cache stores from older versions
  fetch <url> [--document]    Fetch through the worker (cache first)
  keys                        List cache stores and their entries
  message <json>              Post a message, e.g. '{\"type\":\"SKIP_WAITING\"}'
  click [<url>]               Simulate a notification click";

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn load_config() -> Result<WorkerConfig> {
    let mut config = WorkerConfig::load()?;
    if let Ok(origin) = std::env::var(ORIGIN_ENV) {
        config.origin = origin;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        eprintln!("{}", USAGE);
        return Ok(());
    };

    let config = load_config()?;
    let storage = Arc::new(
        DiskCacheStorage::new(config.cache_dir()?).context("Failed to open cache directory")?,
    );
    let fetcher = HttpFetcher::new(&config.origin).context("Invalid origin")?;
    info!(origin = %config.origin, cache = %config.cache_name, "pickme-offline starting");

    let worker = OfflineCacheWorker::new(
        config,
        storage.clone(),
        Arc::new(fetcher),
        Arc::new(ConsoleHost),
    );

    match command.as_str() {
        "install" => {
            worker.install().await.context("Install failed")?;
            println!(
                "Precached {} URLs into {}",
                worker.config().precache_urls.len(),
                worker.cache_name()
            );
        }
        "activate" => {
            let removed = worker.activate().await?;
            if removed.is_empty() {
                println!("No stale caches");
            }
            for name in removed {
                println!("Deleted {}", name);
            }
        }
        "fetch" => {
            let url = args
                .get(1)
                .ok_or_else(|| anyhow::anyhow!("fetch needs a URL\n\n{}", USAGE))?;
            let request = if args.iter().any(|a| a == "--document") {
                Request::navigate(url.as_str())
            } else {
                Request::get(url.as_str())
            };

            let cached = storage.match_in(worker.cache_name(), &request).await?.is_some();
            let response = worker.fetch(&request).await?;
            worker.flush_background().await;

            println!(
                "{} {:?} {} ({} bytes, {})",
                response.status,
                response.response_type,
                response.content_type().unwrap_or("-"),
                response.body.len(),
                if cached { "cache" } else { "network" }
            );
        }
        "keys" => {
            for name in storage.keys().await? {
                let marker = if name == worker.cache_name() { "*" } else { " " };
                println!("{} {}", marker, name);
                for key in storage.open(&name).await?.keys().await? {
                    println!("    {}", key);
                }
            }
        }
        "message" => {
            let json = args
                .get(1)
                .ok_or_else(|| anyhow::anyhow!("message needs a JSON payload\n\n{}", USAGE))?;
            if worker.message_json(json).await? {
                println!("Skip waiting requested");
            } else {
                println!("Message ignored");
            }
        }
        "click" => {
            let mut notification = Notification::new("PickMe");
            if let Some(url) = args.get(1) {
                notification = notification.with_url(url.as_str());
            }
            match worker.notification_click(&notification).await? {
                ClickOutcome::Focused(id) => println!("Focused window {}", id),
                ClickOutcome::Opened(url) => println!("Would open {}", url),
                ClickOutcome::Nothing => println!("Nothing to do"),
            }
        }
        other => {
            anyhow::bail!("Unknown command: {}\n\n{}", other, USAGE);
        }
    }

    Ok(())
}
