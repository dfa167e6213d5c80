use std::time::Duration;

use crate::config::ApiConfig;
use crate::error::{AppError, AppResult};

/// User agent sent when the configuration does not override it
pub const DEFAULT_USER_AGENT: &str = concat!("kodilan-rs/", env!("CARGO_PKG_VERSION"));

/// Build the shared HTTP client.
///
/// - **Timeouts**: whole-request and connect timeouts from [`ApiConfig`]
/// - **Connection pooling**: idle connections are reused per host
/// - **Compression**: gzip, deflate, brotli and zstd
/// - **TLS**: rustls
pub fn build_http_client(config: &ApiConfig) -> AppResult<reqwest::Client> {
    let user_agent = config
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .zstd(true)
        .user_agent(user_agent)
        .build()
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::new(e).context("Failed to build HTTP client"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds_from_defaults() {
        assert!(build_http_client(&ApiConfig::default()).is_ok());
    }

    #[test]
    fn test_default_user_agent_carries_version() {
        assert!(DEFAULT_USER_AGENT.starts_with("kodilan-rs/"));
        assert!(DEFAULT_USER_AGENT.ends_with(env!("CARGO_PKG_VERSION")));
    }
}
