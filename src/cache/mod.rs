//! Response cache used by the HTTP layer.
//!
//! Successful GET responses are stored under their full request URL so that
//! repeated reads of the same listing are served locally. Two backends exist:
//! - Memory cache (size-bounded, time-limited)
//! - NoOp cache (used when caching is disabled)
//!
//! # Configuration
//!
//! ```toml
//! [cache]
//! enabled = true
//!
//! [cache.memory]
//! max_size = 100
//! ttl_seconds = 300
//! ```

mod backend;
mod error;
mod manager;
mod memory;

pub use backend::{CacheBackend, NoOpCache};
pub use error::CacheError;
pub use manager::CacheManager;
pub use memory::MemoryCache;

// Re-export config types
pub use crate::config::settings::{CacheConfig, MemoryCacheConfig};
