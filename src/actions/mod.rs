//! Application actions.
//!
//! Each action performs at most one HTTP call through the [`ApiBackend`],
//! reshapes the response where needed, and either commits a [`Mutation`] to
//! the [`Store`] or hands the payload back to the caller.

mod auth;
mod posts;
mod ranking;
mod related;

#[cfg(test)]
pub(crate) mod testing;

pub use ranking::{PostRanker, SharedTagRanker};
pub use related::{Category, main_tag};

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cache::CacheManager;
use crate::config::{ClientConfig, Settings};
use crate::error::{AppError, AppResult};
use crate::external::{ApiBackend, HttpApi};
use crate::storage::{FileTokenStore, TokenStore};
use crate::store::{Mutation, State, Store};

/// Handle bundling the API, the state store and the token store.
///
/// Cloning is cheap; clones share all three.
#[derive(Clone)]
pub struct Actions {
    api: Arc<dyn ApiBackend>,
    store: Store,
    tokens: Arc<dyn TokenStore>,
    ranker: Arc<dyn PostRanker>,
    options: ClientConfig,
}

impl Actions {
    pub fn new(
        api: Arc<dyn ApiBackend>,
        store: Store,
        tokens: Arc<dyn TokenStore>,
        options: ClientConfig,
    ) -> Self {
        let ranker = Arc::new(SharedTagRanker::new(options.related_limit));
        Self {
            api,
            store,
            tokens,
            ranker,
            options,
        }
    }

    /// Wire everything from configuration: file-backed token storage, the
    /// response cache and the HTTP backend.
    ///
    /// The initial state starts logged in when a token is already stored.
    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        let tokens: Arc<dyn TokenStore> =
            Arc::new(FileTokenStore::new(&settings.storage.token_path));
        let cache = CacheManager::new(&settings.cache);
        let api = Arc::new(HttpApi::new(&settings.api, cache, tokens.clone())?);

        let mut initial = State::with_period(&settings.client.default_period);
        initial.is_logged_in = tokens.access_token()?.is_some();

        Ok(Self::new(
            api,
            Store::new(initial),
            tokens,
            settings.client.clone(),
        ))
    }

    /// Replace the related-posts ranking strategy.
    pub fn with_ranker(mut self, ranker: Arc<dyn PostRanker>) -> Self {
        self.ranker = ranker;
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn toggle_loading(&self) {
        self.store.commit(Mutation::ToggleLoading);
    }

    pub fn set_period(&self, period: impl Into<String>) {
        self.store.commit(Mutation::SetActivePeriod(period.into()));
    }

    async fn get_as<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> AppResult<T> {
        let body = self.api.get(path, query).await?;
        decode(path, body)
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, data: &B) -> AppResult<Value> {
        let body = serde_json::to_value(data).map_err(|e| AppError::encode(path, e))?;
        self.api.post(path, body).await
    }
}

fn decode<T: DeserializeOwned>(path: &str, body: Value) -> AppResult<T> {
    serde_json::from_value(body).map_err(|e| AppError::decode(path, e))
}

/// Build a query list from borrowed pairs.
fn query<const N: usize>(pairs: [(&str, String); N]) -> Vec<(String, String)> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
