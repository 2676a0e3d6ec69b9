//! The route tree.
//!
//! # Responsibilities
//! - Build the tree from configuration, binding component and loader names
//! - Answer path lookups via the matcher
//! - Expose the application shell and the list of matchable branches
//! - Detect redirect cycles and dangling redirect targets
//!
//! # Design Decisions
//! - Immutable after construction (shared via `Arc` without locks)
//! - Explicit `NotFound` rather than a silent default route

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::config::schema::RouteConfig;
use crate::loaders::{Loader, LoaderRegistry};
use crate::render::{Component, ComponentRegistry, StaticComponent};
use crate::routing::matcher::{self, Resolution};
use crate::routing::pattern::PatternError;
use crate::routing::route::{Element, Redirect, Route, RoutePath};

/// Errors building a tree from configuration.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("unknown component `{name}` (route {route})")]
    UnknownComponent { route: String, name: String },

    #[error("unknown loader `{name}` (route {route})")]
    UnknownLoader { route: String, name: String },

    #[error("invalid path `{path}` (route {route}): {source}")]
    InvalidPattern {
        route: String,
        path: String,
        #[source]
        source: PatternError,
    },

    #[error("route {route} declares both `index` and `path`")]
    IndexWithPath { route: String },

    #[error("route {route} declares both an element and a redirect")]
    ElementAndRedirect { route: String },
}

/// Redirect defects found by [`RouteTree::check_redirects`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RedirectIssue {
    #[error("redirect at `{from}` never settles: {}", .trail.join(" -> "))]
    Cycle { from: String, trail: Vec<String> },

    #[error("redirect at `{from}` targets `{to}`, which matches no route")]
    Dangling { from: String, to: String },
}

/// A matchable branch of the tree, for listings.
#[derive(Debug, Clone, Serialize)]
pub struct Branch {
    pub route: String,
    pub pattern: String,
    pub components: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loader: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<Redirect>,
}

/// Immutable route tree plus the root-level fallback element.
#[derive(Clone)]
pub struct RouteTree {
    routes: Vec<Route>,
    not_found: Arc<dyn Component>,
}

impl RouteTree {
    pub fn new(mut routes: Vec<Route>, not_found: Arc<dyn Component>) -> Self {
        Route::assign_ids(&mut routes, "");
        Self { routes, not_found }
    }

    /// Build from configuration, resolving names through the registries.
    pub fn from_config(
        routes: &[RouteConfig],
        components: &ComponentRegistry,
        loaders: &LoaderRegistry,
        not_found_element: &str,
    ) -> Result<Self, BuildError> {
        let binder = Registries {
            components,
            loaders,
        };
        let built = build_routes(routes, "", &binder)?;
        let not_found = components
            .get(not_found_element)
            .ok_or_else(|| BuildError::UnknownComponent {
                route: "<not-found>".to_string(),
                name: not_found_element.to_string(),
            })?;
        Ok(Self::new(built, not_found))
    }

    /// Structure-only tree: paths and redirects, placeholder components,
    /// no loaders. Enough for matching and redirect analysis.
    pub fn skeleton(routes: &[RouteConfig]) -> Result<Self, BuildError> {
        let built = build_routes(routes, "", &Skeleton)?;
        Ok(Self::new(built, Arc::new(StaticComponent::new("not-found"))))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn not_found(&self) -> &Arc<dyn Component> {
        &self.not_found
    }

    pub fn resolve(&self, path: &str) -> Resolution<'_> {
        matcher::resolve(&self.routes, path)
    }

    /// Routes every navigation passes through: descend from the root while
    /// a level holds exactly one pathless route.
    pub fn shell(&self) -> Vec<&Route> {
        let mut shell = Vec::new();
        let mut level = self.routes.as_slice();
        while let [only] = level {
            if !only.is_pathless() {
                break;
            }
            shell.push(only);
            level = only.children();
        }
        shell
    }

    /// Every route that can end a match, in declaration order.
    pub fn branches(&self) -> Vec<Branch> {
        let mut out = Vec::new();
        collect_branches(&self.routes, &mut Vec::new(), &mut Vec::new(), &mut out);
        out
    }

    /// Follow every redirect target up to `max_hops` redirects.
    pub fn check_redirects(&self, max_hops: usize) -> Vec<RedirectIssue> {
        let mut issues = Vec::new();
        for branch in self.branches() {
            let Some(redirect) = branch.redirect else {
                continue;
            };

            let mut trail = vec![branch.pattern.clone()];
            let mut target = redirect.to.clone();
            let mut hops = 1;
            loop {
                match self.resolve(&target) {
                    Resolution::Matched(_) => break,
                    Resolution::NotFound { location } => {
                        issues.push(RedirectIssue::Dangling {
                            from: branch.pattern.clone(),
                            to: location,
                        });
                        break;
                    }
                    Resolution::Redirect { location, redirect } => {
                        trail.push(location);
                        hops += 1;
                        if hops > max_hops {
                            trail.push(redirect.to);
                            issues.push(RedirectIssue::Cycle {
                                from: branch.pattern.clone(),
                                trail,
                            });
                            break;
                        }
                        target = redirect.to;
                    }
                }
            }
        }
        issues
    }
}

impl std::fmt::Debug for RouteTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteTree")
            .field("routes", &self.routes)
            .field("not_found", &self.not_found.name())
            .finish()
    }
}

fn collect_branches(
    routes: &[Route],
    patterns: &mut Vec<String>,
    components: &mut Vec<String>,
    out: &mut Vec<Branch>,
) {
    for route in routes {
        let pattern_mark = patterns.len();
        let component_mark = components.len();

        if let RoutePath::Pattern(pattern) = route.path() {
            patterns.extend(
                pattern
                    .as_str()
                    .split('/')
                    .filter(|s| !s.is_empty())
                    .map(String::from),
            );
        }
        if let Some(component) = route.component() {
            components.push(component.name().to_string());
        }

        if !route.is_pathless() {
            out.push(Branch {
                route: route.id().to_string(),
                pattern: format!("/{}", patterns.join("/")),
                components: components.clone(),
                loader: route.loader().map(|l| l.name.clone()),
                redirect: route.redirect().cloned(),
            });
        }
        collect_branches(route.children(), patterns, components, out);

        patterns.truncate(pattern_mark);
        components.truncate(component_mark);
    }
}

/// Name → implementation binding used while building.
trait Binder {
    fn component(&self, route: &str, name: &str) -> Result<Arc<dyn Component>, BuildError>;
    fn loader(&self, route: &str, name: &str) -> Result<Option<Arc<dyn Loader>>, BuildError>;
}

struct Registries<'a> {
    components: &'a ComponentRegistry,
    loaders: &'a LoaderRegistry,
}

impl Binder for Registries<'_> {
    fn component(&self, route: &str, name: &str) -> Result<Arc<dyn Component>, BuildError> {
        self.components
            .get(name)
            .ok_or_else(|| BuildError::UnknownComponent {
                route: route.to_string(),
                name: name.to_string(),
            })
    }

    fn loader(&self, route: &str, name: &str) -> Result<Option<Arc<dyn Loader>>, BuildError> {
        self.loaders
            .get(name)
            .map(Some)
            .ok_or_else(|| BuildError::UnknownLoader {
                route: route.to_string(),
                name: name.to_string(),
            })
    }
}

struct Skeleton;

impl Binder for Skeleton {
    fn component(&self, _route: &str, name: &str) -> Result<Arc<dyn Component>, BuildError> {
        Ok(Arc::new(StaticComponent::new(name)))
    }

    fn loader(&self, _route: &str, _name: &str) -> Result<Option<Arc<dyn Loader>>, BuildError> {
        Ok(None)
    }
}

fn build_routes(
    configs: &[RouteConfig],
    prefix: &str,
    binder: &dyn Binder,
) -> Result<Vec<Route>, BuildError> {
    configs
        .iter()
        .enumerate()
        .map(|(i, config)| {
            let id = if prefix.is_empty() {
                i.to_string()
            } else {
                format!("{prefix}.{i}")
            };
            build_route(config, &id, binder)
        })
        .collect()
}

fn build_route(config: &RouteConfig, id: &str, binder: &dyn Binder) -> Result<Route, BuildError> {
    let path = match (&config.path, config.index) {
        (Some(_), true) => {
            return Err(BuildError::IndexWithPath {
                route: id.to_string(),
            })
        }
        (None, true) => RoutePath::Index,
        (None, false) => RoutePath::Pathless,
        (Some(raw), false) => {
            RoutePath::pattern(raw).map_err(|source| BuildError::InvalidPattern {
                route: id.to_string(),
                path: raw.clone(),
                source,
            })?
        }
    };

    let mut route = Route::new(path);

    match (&config.element, &config.redirect) {
        (Some(_), Some(_)) => {
            return Err(BuildError::ElementAndRedirect {
                route: id.to_string(),
            })
        }
        (Some(name), None) => {
            route = route.with_element(Element::Component(binder.component(id, name)?));
        }
        (None, Some(redirect)) => {
            route = route.with_redirect(redirect.to.clone(), redirect.replace);
        }
        (None, None) => {}
    }

    if let Some(name) = &config.loader {
        if let Some(loader) = binder.loader(id, name)? {
            route = route.with_loader(name.clone(), loader);
        }
    }
    if let Some(name) = &config.error_element {
        route = route.with_error_element(binder.component(id, name)?);
    }

    let children = build_routes(&config.children, id, binder)?;
    Ok(route.with_children(children))
}
