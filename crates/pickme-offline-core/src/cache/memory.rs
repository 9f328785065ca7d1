use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{validate_name, Cache, CacheError, CacheStorage};
use crate::models::{Request, RequestKey, Response};

/// A cache store that lives in process memory.
#[derive(Debug)]
pub struct MemoryCache {
    name: String,
    entries: RwLock<BTreeMap<RequestKey, Response>>,
}

impl MemoryCache {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    fn name(&self) -> &str {
        &self.name
    }

    async fn match_request(&self, request: &Request) -> Result<Option<Response>, CacheError> {
        Ok(self.entries.read().await.get(&request.key()).cloned())
    }

    async fn put(&self, request: &Request, response: Response) -> Result<(), CacheError> {
        self.entries.write().await.insert(request.key(), response);
        Ok(())
    }

    async fn delete(&self, request: &Request) -> Result<bool, CacheError> {
        Ok(self.entries.write().await.remove(&request.key()).is_some())
    }

    async fn keys(&self) -> Result<Vec<RequestKey>, CacheError> {
        Ok(self.entries.read().await.keys().cloned().collect())
    }
}

/// In-memory `CacheStorage`. Store names are listed in creation order.
#[derive(Debug, Default)]
pub struct MemoryCacheStorage {
    stores: RwLock<Vec<Arc<MemoryCache>>>,
}

impl MemoryCacheStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concrete handle to a store, for inspecting it in tests.
    pub async fn get(&self, name: &str) -> Option<Arc<MemoryCache>> {
        self.stores
            .read()
            .await
            .iter()
            .find(|c| c.name == name)
            .cloned()
    }
}

#[async_trait]
impl CacheStorage for MemoryCacheStorage {
    async fn open(&self, name: &str) -> Result<Arc<dyn Cache>, CacheError> {
        validate_name(name)?;
        let mut stores = self.stores.write().await;
        if let Some(existing) = stores.iter().find(|c| c.name == name) {
            return Ok(existing.clone());
        }
        let cache = Arc::new(MemoryCache::new(name));
        stores.push(cache.clone());
        Ok(cache)
    }

    async fn has(&self, name: &str) -> Result<bool, CacheError> {
        Ok(self.stores.read().await.iter().any(|c| c.name == name))
    }

    async fn delete(&self, name: &str) -> Result<bool, CacheError> {
        let mut stores = self.stores.write().await;
        let before = stores.len();
        stores.retain(|c| c.name != name);
        Ok(stores.len() != before)
    }

    async fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(self
            .stores
            .read()
            .await
            .iter()
            .map(|c| c.name.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_creates_once() {
        let storage = MemoryCacheStorage::new();
        let a = storage.open("pickme-v1").await.unwrap();
        a.put(&Request::get("/"), Response::ok("home")).await.unwrap();

        let b = storage.open("pickme-v1").await.unwrap();
        let hit = b.match_request(&Request::get("/")).await.unwrap();
        assert_eq!(hit.map(|r| r.text()), Some("home".to_string()));
        assert_eq!(storage.keys().await.unwrap(), vec!["pickme-v1".to_string()]);
    }

    #[tokio::test]
    async fn test_keys_in_creation_order() {
        let storage = MemoryCacheStorage::new();
        storage.open("pickme-v2").await.unwrap();
        storage.open("pickme-v1").await.unwrap();
        storage.open("other").await.unwrap();

        assert_eq!(
            storage.keys().await.unwrap(),
            vec!["pickme-v2", "pickme-v1", "other"]
        );
    }

    #[tokio::test]
    async fn test_delete_store() {
        let storage = MemoryCacheStorage::new();
        storage.open("old").await.unwrap();

        assert!(storage.delete("old").await.unwrap());
        assert!(!storage.delete("old").await.unwrap());
        assert!(!storage.has("old").await.unwrap());
    }

    #[tokio::test]
    async fn test_match_is_keyed_by_method() {
        let storage = MemoryCacheStorage::new();
        let cache = storage.open("v").await.unwrap();
        cache.put(&Request::get("/api/search"), Response::ok("[]")).await.unwrap();

        let head = Request::get("/api/search").with_method(crate::models::Method::Head);
        assert!(cache.match_request(&head).await.unwrap().is_none());
        assert!(cache.delete(&Request::get("/api/search")).await.unwrap());
        assert!(cache.keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_match_in_does_not_create() {
        let storage = MemoryCacheStorage::new();
        let hit = storage.match_in("ghost", &Request::get("/")).await.unwrap();
        assert!(hit.is_none());
        assert!(!storage.has("ghost").await.unwrap());
    }
}
