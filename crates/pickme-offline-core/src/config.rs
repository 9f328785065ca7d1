//! Worker configuration.
//!
//! Holds what would otherwise be free-floating constants: the cache version
//! name, the precache list, the application domain and URLs. Passing these
//! in at construction lets two worker versions run side by side.
//!
//! Configuration is stored at `~/.config/pickme-offline/config.json`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
pub const APP_NAME: &str = "pickme-offline";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Current cache version. Bump to invalidate every older store on the next
/// activation.
pub const DEFAULT_CACHE_NAME: &str = "pickme-v1";

/// Pages and assets every installed version must have offline.
pub const DEFAULT_PRECACHE_URLS: [&str; 5] = [
    "/",
    "/tech.html",
    "/manifest.json",
    "/pickme_logo.png",
    "/api/search",
];

/// Substring identifying an application window.
pub const DEFAULT_APP_DOMAIN: &str = "pickme.tv";

/// Where a notification click lands when it carries no URL.
pub const DEFAULT_APP_URL: &str = "https://app.pickme.tv";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    pub cache_name: String,
    pub precache_urls: Vec<String>,
    pub app_domain: String,
    pub default_app_url: String,
    /// Origin relative request URLs resolve against.
    pub origin: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            cache_name: DEFAULT_CACHE_NAME.to_string(),
            precache_urls: DEFAULT_PRECACHE_URLS.iter().map(|u| u.to_string()).collect(),
            app_domain: DEFAULT_APP_DOMAIN.to_string(),
            default_app_url: DEFAULT_APP_URL.to_string(),
            origin: DEFAULT_APP_URL.to_string(),
        }
    }
}

impl WorkerConfig {
    /// Same settings under a different cache version.
    pub fn with_cache_name(mut self, name: impl Into<String>) -> Self {
        self.cache_name = name.into();
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Root directory for on-disk cache stores.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}
