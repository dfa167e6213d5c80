use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    /// A thread panicked while holding the cache lock
    #[error("Cache lock poisoned")]
    Poisoned,

    #[error("Failed to serialize cache entry for {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
