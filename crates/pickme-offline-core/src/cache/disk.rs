use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::debug;

use super::{validate_name, Cache, CacheError, CacheStorage};
use crate::models::{Request, RequestKey, Response};

/// File extension for cache entries
const ENTRY_EXT: &str = "json";

/// What one entry file holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedEntry {
    pub key: RequestKey,
    pub response: Response,
    pub cached_at: DateTime<Utc>,
}

impl CachedEntry {
    pub fn new(key: RequestKey, response: Response) -> Self {
        Self {
            key,
            response,
            cached_at: Utc::now(),
        }
    }
}

/// A cache store backed by a directory of JSON files.
#[derive(Debug)]
pub struct DiskCache {
    name: String,
    dir: PathBuf,
}

impl DiskCache {
    fn entry_path(&self, key: &RequestKey) -> PathBuf {
        let digest = Sha256::digest(key.as_str().as_bytes());
        self.dir.join(format!("{}.{}", hex::encode(digest), ENTRY_EXT))
    }

    async fn load(path: &Path) -> Result<Option<CachedEntry>, CacheError> {
        let contents = match fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&contents) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Unreadable cache entry, treating as miss");
                Ok(None)
            }
        }
    }

    async fn entries(&self) -> Result<Vec<CachedEntry>, CacheError> {
        let mut entries = Vec::new();
        let mut dir = match fs::read_dir(&self.dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(entries),
            Err(e) => return Err(e.into()),
        };
        while let Some(item) = dir.next_entry().await? {
            let path = item.path();
            if path.extension().and_then(|e| e.to_str()) != Some(ENTRY_EXT) {
                continue;
            }
            if let Some(entry) = Self::load(&path).await? {
                entries.push(entry);
            }
        }
        Ok(entries)
    }
}

#[async_trait]
impl Cache for DiskCache {
    fn name(&self) -> &str {
        &self.name
    }

    async fn match_request(&self, request: &Request) -> Result<Option<Response>, CacheError> {
        let key = request.key();
        let entry = Self::load(&self.entry_path(&key)).await?;
        // Guard against a digest collision handing back someone else's entry
        Ok(entry.filter(|e| e.key == key).map(|e| e.response))
    }

    async fn put(&self, request: &Request, response: Response) -> Result<(), CacheError> {
        let key = request.key();
        let path = self.entry_path(&key);
        let contents = serde_json::to_string_pretty(&CachedEntry::new(key, response))?;
        fs::create_dir_all(&self.dir).await?;
        fs::write(&path, contents).await?;
        Ok(())
    }

    async fn delete(&self, request: &Request) -> Result<bool, CacheError> {
        match fs::remove_file(self.entry_path(&request.key())).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn keys(&self) -> Result<Vec<RequestKey>, CacheError> {
        let mut keys: Vec<RequestKey> = self.entries().await?.into_iter().map(|e| e.key).collect();
        keys.sort();
        Ok(keys)
    }
}

/// `CacheStorage` rooted at a directory; each store is a subdirectory.
///
/// Store names are listed in lexical order since the filesystem does not
/// keep creation order.
#[derive(Debug, Clone)]
pub struct DiskCacheStorage {
    root: PathBuf,
}

impl DiskCacheStorage {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn store_dir(&self, name: &str) -> Result<PathBuf, CacheError> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl CacheStorage for DiskCacheStorage {
    async fn open(&self, name: &str) -> Result<Arc<dyn Cache>, CacheError> {
        let dir = self.store_dir(name)?;
        fs::create_dir_all(&dir).await?;
        Ok(Arc::new(DiskCache {
            name: name.to_string(),
            dir,
        }))
    }

    async fn has(&self, name: &str) -> Result<bool, CacheError> {
        let dir = self.store_dir(name)?;
        match fs::metadata(&dir).await {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, name: &str) -> Result<bool, CacheError> {
        let dir = self.store_dir(name)?;
        match fs::remove_dir_all(&dir).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut names = Vec::new();
        let mut dir = fs::read_dir(&self.root).await?;
        while let Some(item) = dir.next_entry().await? {
            if item.file_type().await?.is_dir() {
                if let Some(name) = item.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
