//! Cache manager that dispatches to the configured backend.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cache::memory::MemoryCache;
use crate::cache::{CacheBackend, CacheError, NoOpCache};
use crate::config::settings::CacheConfig;

/// Cache manager that provides access to the configured cache backend.
///
/// Cloning shares the same backend.
#[derive(Clone)]
pub struct CacheManager {
    backend: Arc<dyn CacheBackend>,
    enabled: bool,
}

impl CacheManager {
    /// Create a new cache manager with the given configuration.
    ///
    /// If caching is disabled, a NoOpCache is used.
    pub fn new(config: &CacheConfig) -> Self {
        let backend: Arc<dyn CacheBackend> = if config.enabled {
            Arc::new(MemoryCache::new(&config.memory))
        } else {
            Arc::new(NoOpCache)
        };

        Self {
            backend,
            enabled: config.enabled,
        }
    }

    /// A manager that caches nothing.
    pub fn disabled() -> Self {
        Self {
            backend: Arc::new(NoOpCache),
            enabled: false,
        }
    }

    /// Check if caching is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Read and deserialize a JSON value.
    ///
    /// Entries that no longer deserialize are treated as misses.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let Some(bytes) = self.backend.get(key).await? else {
            return Ok(None);
        };
        Ok(serde_json::from_slice(&bytes).ok())
    }

    /// Serialize and store a JSON value.
    pub async fn set_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value).map_err(|source| CacheError::Serialization {
            key: key.to_string(),
            source,
        })?;
        self.backend.set(key, bytes).await
    }

    /// Clear all values from the cache.
    pub async fn clear(&self) -> Result<(), CacheError> {
        self.backend.clear().await
    }
}
