//! Configuration settings structures
//!
//! All structures can be loaded from TOML files and environment variables.
//! Every field has a default, so an empty file is a valid configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::logger::LoggerConfig;

// ============================================================================
// Default value functions
// ============================================================================

fn default_base_url() -> String {
    "http://apiv2.kodilan.com/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_recent_post_count() -> u32 {
    10
}

fn default_per_page() -> u32 {
    20
}

fn default_featured_count() -> u32 {
    3
}

fn default_period() -> String {
    "all".to_string()
}

fn default_token_path() -> PathBuf {
    PathBuf::from(".kodilan/session.json")
}

fn default_true() -> bool {
    true
}

fn default_cache_max_size() -> usize {
    100
}

fn default_cache_ttl() -> u64 {
    300
}

// ============================================================================
// API Configuration
// ============================================================================

/// Remote REST API connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every request path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// TCP connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,

    /// Overrides the `kodilan-rs/{version}` user agent
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            user_agent: None,
        }
    }
}

// ============================================================================
// Client Configuration
// ============================================================================

/// Listing sizes and defaults used by the actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// `get` parameter of the recent-posts listing
    #[serde(default = "default_recent_post_count")]
    pub recent_post_count: u32,

    /// `get` parameter of the paginated all-posts listing
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// `get` parameter of the featured-posts listing
    #[serde(default = "default_featured_count")]
    pub featured_count: u32,

    /// Period the state starts with before `set_period` is called
    #[serde(default = "default_period")]
    pub default_period: String,

    /// Maximum number of related posts returned; unlimited when absent
    #[serde(default)]
    pub related_limit: Option<usize>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            recent_post_count: default_recent_post_count(),
            per_page: default_per_page(),
            featured_count: default_featured_count(),
            default_period: default_period(),
            related_limit: None,
        }
    }
}

// ============================================================================
// Storage Configuration
// ============================================================================

/// Where the session token is persisted between runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            token_path: default_token_path(),
        }
    }
}

// ============================================================================
// Cache Configuration
// ============================================================================

/// Memory cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryCacheConfig {
    /// Maximum number of entries in the cache
    #[serde(default = "default_cache_max_size")]
    pub max_size: usize,

    /// Time-to-live in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,
}

impl Default for MemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_size: default_cache_max_size(),
            ttl_seconds: default_cache_ttl(),
        }
    }
}

/// GET response cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub memory: MemoryCacheConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            memory: MemoryCacheConfig::default(),
        }
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logger: LoggerConfig,
}
