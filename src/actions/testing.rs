//! In-memory [`ApiBackend`] for action tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::Actions;
use crate::config::ClientConfig;
use crate::error::{AppError, AppResult};
use crate::external::ApiBackend;
use crate::storage::MemoryTokenStore;
use crate::store::{State, Store};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// Answers from canned responses keyed by `"METHOD path"`.
#[derive(Default)]
pub(crate) struct FakeApi {
    responses: Mutex<HashMap<String, Result<Value, (u16, Value)>>>,
    requests: Mutex<Vec<Recorded>>,
    invalidations: Mutex<usize>,
}

impl FakeApi {
    pub fn actions() -> (Actions, Arc<FakeApi>) {
        let api = Arc::new(FakeApi::default());
        let actions = Actions::new(
            api.clone(),
            Store::new(State::with_period("all")),
            Arc::new(MemoryTokenStore::new()),
            ClientConfig::default(),
        );
        (actions, api)
    }

    pub fn respond(&self, method: &str, path: &str, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(format!("{method} {path}"), Ok(body));
    }

    pub fn fail(&self, method: &str, path: &str, status: u16, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(format!("{method} {path}"), Err((status, body)));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn invalidations(&self) -> usize {
        *self.invalidations.lock().unwrap()
    }

    fn answer(&self, method: &'static str, path: &str) -> AppResult<Value> {
        match self.responses.lock().unwrap().get(&format!("{method} {path}")) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err((status, body))) => Err(AppError::Api {
                path: path.to_string(),
                status: *status,
                body: body.clone(),
            }),
            None => Err(AppError::Api {
                path: path.to_string(),
                status: 404,
                body: Value::Null,
            }),
        }
    }
}

#[async_trait]
impl ApiBackend for FakeApi {
    async fn get(&self, path: &str, query: &[(String, String)]) -> AppResult<Value> {
        self.requests.lock().unwrap().push(Recorded {
            method: "GET",
            path: path.to_string(),
            query: query.to_vec(),
            body: None,
        });
        self.answer("GET", path)
    }

    async fn post(&self, path: &str, body: Value) -> AppResult<Value> {
        self.requests.lock().unwrap().push(Recorded {
            method: "POST",
            path: path.to_string(),
            query: Vec::new(),
            body: Some(body),
        });
        self.answer("POST", path)
    }

    async fn invalidate(&self) {
        *self.invalidations.lock().unwrap() += 1;
    }
}

/// Shorthand for an owned query pair list.
pub(crate) fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
