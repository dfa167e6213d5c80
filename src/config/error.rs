use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Sources merged, but the result does not fit [`Settings`](super::Settings)
    #[error("Failed to deserialize settings: {0}")]
    ParseError(#[source] config::ConfigError),

    #[error("Invalid value for `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("Unknown environment '{value}', expected development, test or production")]
    UnknownEnvironment { value: String },

    #[error(
        "KODILAN_CONFIG_DIR ({}) and KODILAN_CONFIG_FILE ({}) cannot both be set",
        dir.display(),
        file.display()
    )]
    ConflictingSources { dir: PathBuf, file: PathBuf },

    /// Reading or merging a source failed
    #[error("Configuration error: {0}")]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}
