//! Configuration loader
//!
//! `ConfigLoader` stacks built-in defaults, TOML files and `KODILAN_*`
//! environment variables, then validates the result.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "KODILAN_CONFIG_DIR";

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "KODILAN_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "KODILAN";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

type Builder = ConfigBuilder<DefaultState>;

/// Configuration loader that handles layered configuration loading
///
/// Sources, in order of priority:
/// 1. `default.toml` (required by [`ConfigLoader::load`])
/// 2. `{environment}.toml` (optional)
/// 3. `local.toml` (optional)
/// 4. `KODILAN_*` environment variables
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    /// When set, layered loading is skipped and only this file is read
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a loader from `KODILAN_CONFIG_DIR`, `KODILAN_CONFIG_FILE` and
    /// `KODILAN_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Returns an error if both `KODILAN_CONFIG_DIR` and `KODILAN_CONFIG_FILE`
    /// are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from);
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if let (Some(dir), Some(file)) = (&config_dir, &config_file) {
            return Err(ConfigError::ConflictingSources {
                dir: dir.clone(),
                file: file.clone(),
            });
        }

        Ok(Self {
            config_dir: config_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Loader for a single explicit configuration file.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(path.into()),
            environment: AppEnvironment::from_env(),
        }
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// - the single config file, or `default.toml` in layered mode, is missing
    /// - parsing or validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        self.load_with(true)
    }

    /// Like [`ConfigLoader::load`], but a missing `default.toml` falls back to
    /// built-in defaults. An explicit config file is still required.
    pub fn load_or_default(&self) -> Result<Settings, ConfigError> {
        self.load_with(false)
    }

    fn load_with(&self, require_default: bool) -> Result<Settings, ConfigError> {
        let config = self.build_config(require_default)?;
        let settings: Settings = config.try_deserialize().map_err(ConfigError::ParseError)?;

        settings.validate()?;
        Ok(settings)
    }

    fn build_config(&self, require_default: bool) -> Result<Config, ConfigError> {
        let builder = Config::builder().add_source(Config::try_from(&Settings::default())?);

        let builder = if let Some(ref config_file) = self.config_file {
            Self::add_file_source(builder, config_file, true)?
        } else {
            self.build_layered_config(builder, require_default)?
        };

        // KODILAN_API__BASE_URL -> api.base_url
        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        );

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: Builder,
        require_default: bool,
    ) -> Result<Builder, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = Self::add_file_source(builder, &default_path, require_default)?;

        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = Self::add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        Self::add_file_source(builder, &local_path, false)
    }

    fn add_file_source(
        builder: Builder,
        path: &Path,
        required: bool,
    ) -> Result<Builder, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        Ok(builder.add_source(
            File::new(path.to_str().unwrap_or_default(), FileFormat::Toml).required(required),
        ))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: None,
            environment: AppEnvironment::default(),
        })
    }
}
