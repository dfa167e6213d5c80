//! Configuration validation logic

use crate::config::error::ConfigError;
use crate::config::settings::{ApiConfig, CacheConfig, ClientConfig, Settings, StorageConfig};

/// Upper bound the API accepts for the `get` listing parameter
const MAX_PAGE_SIZE: u32 = 100;

impl ApiConfig {
    /// # Validation Rules
    /// - Base URL must parse and use http or https
    /// - Timeouts must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            ConfigError::validation("api.base_url", format!("Invalid base URL: {}", e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::validation(
                "api.base_url",
                "Base URL must use the http or https scheme.",
            ));
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "api.timeout_seconds",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.connect_timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "api.connect_timeout_seconds",
                "Connect timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("client.recent_post_count", self.recent_post_count),
            ("client.per_page", self.per_page),
            ("client.featured_count", self.featured_count),
        ] {
            if value == 0 || value > MAX_PAGE_SIZE {
                return Err(ConfigError::validation(
                    field,
                    format!("Must be between 1 and {}.", MAX_PAGE_SIZE),
                ));
            }
        }

        if self.default_period.trim().is_empty() {
            return Err(ConfigError::validation(
                "client.default_period",
                "Default period cannot be empty.",
            ));
        }

        if self.related_limit == Some(0) {
            return Err(ConfigError::validation(
                "client.related_limit",
                "Related limit must be greater than 0 when set.",
            ));
        }

        Ok(())
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token_path.as_os_str().is_empty() {
            return Err(ConfigError::validation(
                "storage.token_path",
                "Token path cannot be empty.",
            ));
        }
        Ok(())
    }
}

impl CacheConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }
        if self.memory.max_size == 0 {
            return Err(ConfigError::validation(
                "cache.memory.max_size",
                "Cache size must be greater than 0.",
            ));
        }
        if self.memory.ttl_seconds == 0 {
            return Err(ConfigError::validation(
                "cache.memory.ttl_seconds",
                "Cache TTL must be greater than 0 seconds.",
            ));
        }
        Ok(())
    }
}

impl Settings {
    /// Validate every section, stopping at the first failure
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.client.validate()?;
        self.storage.validate()?;
        self.cache.validate()?;
        self.logger
            .validate()
            .map_err(|e| ConfigError::validation("logger", format!("{e:#}")))?;
        Ok(())
    }
}
