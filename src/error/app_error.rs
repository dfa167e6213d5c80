use thiserror::Error;

use crate::cache::CacheError;
use crate::config::error::ConfigError;
use crate::storage::StorageError;

/// Application-wide error type for every action and transport call.
#[derive(Error, Debug)]
pub enum AppError {
    /// The request never produced a response (DNS, connect, timeout, body read)
    #[error("Request to {path} failed")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status
    #[error("API returned {status} for {path}")]
    Api {
        path: String,
        status: u16,
        /// Parsed error body, or the raw text wrapped in a JSON string
        body: serde_json::Value,
    },

    /// The response body did not have the expected shape
    #[error("Unexpected response shape from {path}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A request payload could not be serialized
    #[error("Could not encode request body for {path}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A request path or base URL could not be turned into a valid URL
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Request payload rejected before it was sent
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn decode(path: impl Into<String>, source: serde_json::Error) -> Self {
        AppError::Decode {
            path: path.into(),
            source,
        }
    }

    pub fn encode(path: impl Into<String>, source: serde_json::Error) -> Self {
        AppError::Encode {
            path: path.into(),
            source,
        }
    }

    /// The API error body, if the failure came from a non-success response.
    pub fn response_body(&self) -> Option<&serde_json::Value> {
        match self {
            AppError::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            AppError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let (field, reason) = errors
            .field_errors()
            .into_iter()
            .next()
            .map(|(field, errs)| {
                let reason = errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "invalid value".to_string());
                (field.to_string(), reason)
            })
            .unwrap_or_else(|| ("request".to_string(), errors.to_string()));
        AppError::Validation { field, reason }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
