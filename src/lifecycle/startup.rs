//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate configuration
//! - Seed the resume store and bind the default loaders
//! - Build the route tree once and hand it to the resolver
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Custom components and loaders may be registered before the tree is built

use std::sync::Arc;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::cta::{CtaError, HeroCta};
use crate::loaders::{LoaderRegistry, ResumeStore};
use crate::navigation::{NavigationState, Resolver};
use crate::render::ComponentRegistry;
use crate::routing::router::BuildError;
use crate::routing::RouteTree;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
    Invalid(Vec<ValidationError>),

    #[error("failed to build route tree: {0}")]
    Build(#[from] BuildError),

    #[error(transparent)]
    Cta(#[from] CtaError),
}

/// A fully wired router application.
#[derive(Debug, Clone)]
pub struct App {
    config: Arc<RouterConfig>,
    store: ResumeStore,
    resolver: Resolver,
    cta: HeroCta,
}

impl App {
    /// Build with the default components and the store-backed loaders.
    pub fn from_config(config: RouterConfig) -> Result<Self, StartupError> {
        let store = ResumeStore::from_resumes(config.resumes.iter().cloned());
        let loaders = LoaderRegistry::for_store(&store);
        Self::with_registries(config, store, &ComponentRegistry::with_defaults(), &loaders)
    }

    /// Build with caller-supplied registries.
    pub fn with_registries(
        config: RouterConfig,
        store: ResumeStore,
        components: &ComponentRegistry,
        loaders: &LoaderRegistry,
    ) -> Result<Self, StartupError> {
        validate_config(&config).map_err(StartupError::Invalid)?;

        let tree = RouteTree::from_config(
            &config.routes,
            components,
            loaders,
            &config.navigation.not_found_element,
        )?;
        let resolver = Resolver::new(Arc::new(tree), &config.navigation);
        let cta = HeroCta::from_config(&config.cta)?;

        tracing::info!(
            routes = resolver.tree().branches().len(),
            resumes = store.len(),
            max_redirect_hops = config.navigation.max_redirect_hops,
            loader_timeout_ms = config.navigation.loader_timeout_ms,
            "Router initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            store,
            resolver,
            cta,
        })
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn store(&self) -> &ResumeStore {
        &self.store
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn tree(&self) -> &RouteTree {
        self.resolver.tree()
    }

    pub fn cta(&self) -> &HeroCta {
        &self.cta
    }

    /// A fresh browsing context.
    pub fn new_state(&self) -> NavigationState {
        NavigationState::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    #[test]
    fn test_default_app_builds() {
        let app = App::from_config(RouterConfig::default()).unwrap();
        assert_eq!(app.store().len(), 2);
        assert_eq!(app.tree().routes().len(), 1);
        assert_eq!(app.cta().get_started().label(), "Get Started");
    }

    #[test]
    fn test_unknown_component_fails() {
        let config = RouterConfig {
            routes: vec![RouteConfig::page("/", "missing")],
            ..RouterConfig::default()
        };
        assert!(matches!(
            App::from_config(config),
            Err(StartupError::Build(BuildError::UnknownComponent { .. }))
        ));
    }

    #[test]
    fn test_invalid_config_fails() {
        let mut config = RouterConfig::default();
        config.navigation.max_redirect_hops = 0;
        assert!(matches!(
            App::from_config(config),
            Err(StartupError::Invalid(errors)) if errors == [ValidationError::ZeroRedirectHops]
        ));
    }
}
