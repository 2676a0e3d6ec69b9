//! Route data loaders.
//!
//! # Data Flow
//! ```text
//! matched chain
//!     → resolver picks routes that declare a loader
//!     → Loader::load(params) (concurrently, bounded by a timeout)
//!     → Ok(data)  → handed to that route's component
//!     → Err(e)    → nearest error element in the chain
//! ```
//!
//! # Design Decisions
//! - Loaders own what they need: the returned future is `'static`
//! - Loaders are looked up by name so route tables stay declarative

pub mod resume;
pub mod store;

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::routing::params::Params;

pub use resume::{BuilderLoader, PublicLoader};
pub use store::ResumeStore;

/// Data produced by a loader.
pub type LoaderData = Value;

/// Future returned by [`Loader::load`].
pub type LoadFuture = BoxFuture<'static, Result<LoaderData, LoaderError>>;

/// Errors a loader can fail with.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum LoaderError {
    #[error("missing route parameter `{0}`")]
    MissingParam(String),

    #[error("resume not found: {0}")]
    NotFound(String),

    #[error("resume is not public: {0}")]
    NotPublic(String),

    #[error("loader timed out after {0} ms")]
    Timeout(u64),

    #[error("loader failed: {0}")]
    Failed(String),
}

impl LoaderError {
    /// Whether the failure means "nothing to show here" rather than a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::NotPublic(_))
    }
}

/// Asynchronous data fetch run before a route renders.
pub trait Loader: Send + Sync {
    fn load(&self, params: &Params) -> LoadFuture;
}

/// Adapts an async closure into a [`Loader`].
pub struct FnLoader<F>(F);

/// Build a loader from `Fn(Params) -> impl Future<Output = Result<..>>`.
pub fn loader_fn<F, Fut>(f: F) -> FnLoader<F>
where
    F: Fn(Params) -> Fut + Send + Sync,
    Fut: Future<Output = Result<LoaderData, LoaderError>> + Send + 'static,
{
    FnLoader(f)
}

impl<F, Fut> Loader for FnLoader<F>
where
    F: Fn(Params) -> Fut + Send + Sync,
    Fut: Future<Output = Result<LoaderData, LoaderError>> + Send + 'static,
{
    fn load(&self, params: &Params) -> LoadFuture {
        Box::pin((self.0)(params.clone()))
    }
}

/// Registry resolving loader names used in route configuration.
#[derive(Clone, Default)]
pub struct LoaderRegistry {
    loaders: HashMap<String, Arc<dyn Loader>>,
}

impl LoaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The `builder` and `public` loaders backed by `store`.
    pub fn for_store(store: &ResumeStore) -> Self {
        let mut registry = Self::new();
        registry
            .register("builder", BuilderLoader::new(store.clone()))
            .register("public", PublicLoader::new(store.clone()));
        registry
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        loader: impl Loader + 'static,
    ) -> &mut Self {
        self.loaders.insert(name.into(), Arc::new(loader));
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Loader>> {
        self.loaders.get(name).cloned()
    }
}

impl std::fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.loaders.keys().collect();
        names.sort();
        f.debug_struct("LoaderRegistry").field("loaders", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_fn_loader_receives_params() {
        let loader = loader_fn(|params: Params| async move {
            Ok(json!({ "id": params.get("id") }))
        });
        let params: Params = [("id", "abc123")].into_iter().collect();

        let data = loader.load(&params).await.unwrap();
        assert_eq!(data, json!({ "id": "abc123" }));
    }

    #[test]
    fn test_not_found_classification() {
        assert!(LoaderError::NotFound("x".into()).is_not_found());
        assert!(LoaderError::NotPublic("x".into()).is_not_found());
        assert!(!LoaderError::Timeout(10).is_not_found());
        assert_eq!(
            LoaderError::Timeout(250).to_string(),
            "loader timed out after 250 ms"
        );
    }

    #[test]
    fn test_registry_for_store() {
        let registry = LoaderRegistry::for_store(&ResumeStore::new());
        assert!(registry.get("builder").is_some());
        assert!(registry.get("public").is_some());
        assert!(registry.get("missing").is_none());
    }
}
