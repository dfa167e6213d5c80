//! Configuration management
//!
//! Layered configuration loading with support for:
//! - TOML configuration files
//! - Environment variable overrides
//! - Per-environment files (development, test, production)
//!
//! # Configuration Priority (lowest to highest)
//! 1. Built-in defaults
//! 2. `default.toml` - Base configuration
//! 3. `{environment}.toml` - Environment-specific configuration
//! 4. `local.toml` - Local overrides (not committed to version control)
//! 5. `KODILAN_*` environment variables

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{ApiConfig, CacheConfig, ClientConfig, Settings, StorageConfig};
