use async_trait::async_trait;

use crate::cache::CacheError;

/// Byte store behind [`CacheManager`](super::CacheManager).
///
/// Keys are request URLs and values are serialized response bodies. Expiry
/// and eviction are up to the backend.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), CacheError>;

    /// Drop every entry, e.g. after the signed-in user changes.
    async fn clear(&self) -> Result<(), CacheError>;
}

/// Backend for `cache.enabled = false`: every read misses.
#[derive(Debug, Default)]
pub struct NoOpCache;

#[async_trait]
impl CacheBackend for NoOpCache {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: Vec<u8>) -> Result<(), CacheError> {
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        Ok(())
    }
}
