use async_trait::async_trait;
use serde_json::Value;

use crate::error::AppResult;

/// One HTTP round trip against the REST API.
///
/// Paths are relative to the API base URL and start with `/`. Bodies travel
/// as JSON values; callers decide which shape they expect.
#[async_trait]
pub trait ApiBackend: Send + Sync {
    async fn get(&self, path: &str, query: &[(String, String)]) -> AppResult<Value>;

    async fn post(&self, path: &str, body: Value) -> AppResult<Value>;

    /// Drop anything remembered from earlier responses.
    async fn invalidate(&self) {}
}
