//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::json;
use tokio::sync::Notify;

use resume_router::config::RouterConfig;
use resume_router::loaders::{LoadFuture, Loader, LoaderError, LoaderRegistry, ResumeStore};
use resume_router::render::ComponentRegistry;
use resume_router::routing::Params;
use resume_router::App;

/// Loader that records every call and answers with a fixed result.
#[derive(Clone)]
pub struct RecordingLoader {
    calls: Arc<Mutex<Vec<Params>>>,
    result: Result<serde_json::Value, LoaderError>,
}

impl RecordingLoader {
    pub fn ok() -> Self {
        Self::with_result(Ok(json!({ "loaded": true })))
    }

    pub fn failing(error: LoaderError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(result: Result<serde_json::Value, LoaderError>) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            result,
        }
    }

    pub fn calls(&self) -> Vec<Params> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Loader for RecordingLoader {
    fn load(&self, params: &Params) -> LoadFuture {
        self.calls.lock().unwrap().push(params.clone());
        let result = self.result.clone();
        Box::pin(async move { result })
    }
}

/// Loader that blocks until released, so tests can interleave navigations.
#[derive(Clone, Default)]
pub struct GatedLoader {
    started: Arc<Notify>,
    gate: Arc<Notify>,
    calls: Arc<AtomicUsize>,
}

impl GatedLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until a call has entered the loader.
    pub async fn started(&self) {
        self.started.notified().await;
    }

    /// Let one waiting call finish.
    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Loader for GatedLoader {
    fn load(&self, params: &Params) -> LoadFuture {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let started = self.started.clone();
        let gate = self.gate.clone();
        let id = params.get("id").unwrap_or_default().to_string();

        Box::pin(async move {
            started.notify_one();
            gate.notified().await;
            Ok(json!({ "id": id }))
        })
    }
}

/// The default application.
pub fn default_app() -> App {
    App::from_config(RouterConfig::default()).unwrap()
}

/// The default application with loaders replaced or added by `customize`.
pub fn app_with_loaders(customize: impl FnOnce(&mut LoaderRegistry)) -> App {
    let config = RouterConfig::default();
    let store = ResumeStore::from_resumes(config.resumes.iter().cloned());
    let mut loaders = LoaderRegistry::for_store(&store);
    customize(&mut loaders);
    App::with_registries(config, store, &ComponentRegistry::with_defaults(), &loaders).unwrap()
}
