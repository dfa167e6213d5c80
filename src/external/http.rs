use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, Response, Url};
use serde_json::Value;

use super::backend::ApiBackend;
use super::client::build_http_client;
use crate::cache::CacheManager;
use crate::config::ApiConfig;
use crate::error::{AppError, AppResult};
use crate::storage::TokenStore;

/// [`ApiBackend`] over HTTP.
///
/// Every request carries `Authorization: Bearer <token>` when a token is
/// stored. Successful GET bodies are cached by full URL.
#[derive(Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: Url,
    cache: CacheManager,
    tokens: Arc<dyn TokenStore>,
}

impl HttpApi {
    pub fn new(
        config: &ApiConfig,
        cache: CacheManager,
        tokens: Arc<dyn TokenStore>,
    ) -> AppResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|_| AppError::InvalidUrl {
            url: config.base_url.clone(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::InvalidUrl {
                url: config.base_url.clone(),
            });
        }

        Ok(Self {
            client: build_http_client(config)?,
            base_url,
            cache,
            tokens,
        })
    }

    /// Resolve `path` under the base URL. Each path segment is
    /// percent-encoded on its own.
    pub fn url_for(&self, path: &str, query: &[(String, String)]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| AppError::InvalidUrl {
                url: self.base_url.to_string(),
            })?;
            segments.pop_if_empty();
            for segment in path.split('/').filter(|s| !s.is_empty()) {
                segments.push(segment);
            }
        }
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }

    /// Attach the stored token, if any.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.access_token() {
            Ok(Some(token)) => request.header(AUTHORIZATION, format!("Bearer {}", token)),
            Ok(None) => request,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read access token; sending request without it");
                request
            }
        }
    }

    async fn send(&self, path: &str, request: RequestBuilder) -> AppResult<Value> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|source| AppError::Transport {
                path: path.to_string(),
                source,
            })?;
        read_body(path, response).await
    }
}

async fn read_body(path: &str, response: Response) -> AppResult<Value> {
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|source| AppError::Transport {
            path: path.to_string(),
            source,
        })?;

    if !status.is_success() {
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        tracing::debug!(path, status = status.as_u16(), "API error response");
        return Err(AppError::Api {
            path: path.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|e| AppError::decode(path, e))
}

#[async_trait]
impl ApiBackend for HttpApi {
    async fn get(&self, path: &str, query: &[(String, String)]) -> AppResult<Value> {
        let url = self.url_for(path, query)?;
        let key = url.as_str().to_string();

        if !self.cache.is_enabled() {
            tracing::debug!(url = %key, "GET");
            return self.send(path, self.client.get(url)).await;
        }

        match self.cache.get_json::<Value>(&key).await {
            Ok(Some(hit)) => {
                tracing::debug!(url = %key, "GET served from cache");
                return Ok(hit);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, url = %key, "Cache read failed"),
        }

        tracing::debug!(url = %key, "GET");
        let body = self.send(path, self.client.get(url)).await?;

        if let Err(e) = self.cache.set_json(&key, &body).await {
            tracing::warn!(error = %e, url = %key, "Cache write failed");
        }
        Ok(body)
    }

    async fn post(&self, path: &str, body: Value) -> AppResult<Value> {
        let url = self.url_for(path, &[])?;
        tracing::debug!(url = %url, "POST");
        self.send(path, self.client.post(url).json(&body)).await
    }

    async fn invalidate(&self) {
        if let Err(e) = self.cache.clear().await {
            tracing::warn!(error = %e, "Cache clear failed");
        }
    }
}
