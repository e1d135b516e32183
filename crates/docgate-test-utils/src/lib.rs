//! Testing utilities for docgate workspace
//!
//! Shared test helpers, fixtures, and observers.

#![allow(missing_docs)]

use async_trait::async_trait;
use docgate_core::{
    Controller, FetchError, FetchResponse, ResourceFetcher, StateObserver, UiState, ViewerConfig,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Canned {
    Response(FetchResponse),
    Failure(String),
}

/// In-memory site; unknown paths answer 404
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    resources: Arc<Mutex<HashMap<String, Canned>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(self, path: &str, value: Value) -> Self {
        self.with_body(path, value.to_string())
    }

    pub fn with_body(self, path: &str, body: impl Into<Vec<u8>>) -> Self {
        self.insert(path, Canned::Response(FetchResponse::ok(body)))
    }

    pub fn with_status(self, path: &str, status: u16) -> Self {
        self.insert(path, Canned::Response(FetchResponse::status(status)))
    }

    /// Path fails at the transport level
    pub fn with_failure(self, path: &str, message: &str) -> Self {
        self.insert(path, Canned::Failure(message.to_string()))
    }

    /// Paths requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    fn insert(self, path: &str, canned: Canned) -> Self {
        self.resources.lock().insert(path.to_string(), canned);
        self
    }
}

#[async_trait]
impl ResourceFetcher for MemoryFetcher {
    async fn fetch(&self, path: &str) -> Result<FetchResponse, FetchError> {
        self.requests.lock().push(path.to_string());
        let canned = self.resources.lock().get(path).cloned();
        match canned {
            Some(Canned::Response(response)) => Ok(response),
            Some(Canned::Failure(message)) => Err(FetchError::Transport {
                path: path.to_string(),
                message,
            }),
            None => Ok(FetchResponse::status(404)),
        }
    }
}

/// Records every state it is shown
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    states: Arc<Mutex<Vec<UiState>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn states(&self) -> Vec<UiState> {
        self.states.lock().clone()
    }
}

impl StateObserver for RecordingObserver {
    fn on_state(&mut self, state: &UiState) {
        self.states.lock().push(state.clone());
    }
}

pub fn sample_allow_list() -> Value {
    json!(["SN-100", "SN-200"])
}

pub fn sample_catalog() -> Value {
    json!([
        {
            "title": "History of the 1st Company",
            "description": "Unit history, 1950-1990",
            "filename": "history.html"
        },
        {
            "title": "Standing Orders",
            "filename": "orders.html"
        },
        {
            "title": "Doc A",
            "filename": "a.html"
        }
    ])
}

pub const HISTORY_PAGE: &str = "<!DOCTYPE html>\n<html>\n<head>\n<title>History</title>\n\
<script src=\"analytics.js\"></script>\n</head>\n<body class=\"doc\">\n<h1>History</h1>\n\
<p>Founded in 1950.</p>\n<script>document.cookie = 'x';</script>\n</body>\n</html>\n";

pub const ORDERS_FRAGMENT: &str = "<h2>Standing Orders</h2><ol><li>Sign in.</li></ol>";

/// Site with the sample allow-list, catalog and two documents; `docs/a.html` is missing
pub fn sample_site() -> MemoryFetcher {
    MemoryFetcher::new()
        .with_json("allowed.json", sample_allow_list())
        .with_json("documents.json", sample_catalog())
        .with_body("docs/history.html", HISTORY_PAGE)
        .with_body("docs/orders.html", ORDERS_FRAGMENT)
}

pub async fn setup_test_controller(fetcher: MemoryFetcher) -> Controller<MemoryFetcher> {
    Controller::bootstrap(fetcher, ViewerConfig::new()).await
}
