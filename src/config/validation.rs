//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route shapes (patterns, index routes, element vs redirect)
//! - Check redirect targets settle within the hop limit
//! - Validate value ranges, addresses, resume uniqueness, CTA targets
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{RouteConfig, RouterConfig};
use crate::cta::{CtaError, HeroCta};
use crate::routing::pattern::{PathPattern, PatternError};
use crate::routing::router::{RedirectIssue, RouteTree};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("navigation.max_redirect_hops must be at least 1")]
    ZeroRedirectHops,

    #[error("navigation.loader_timeout_ms must be at least 1")]
    ZeroLoaderTimeout,

    #[error("{route}: invalid path: {source}")]
    InvalidPattern {
        route: String,
        #[source]
        source: PatternError,
    },

    #[error("{route}: parameter `{name}` already bound by an ancestor")]
    DuplicateParam { route: String, name: String },

    #[error("{route}: index route {reason}")]
    IndexRoute { route: String, reason: &'static str },

    #[error("{route}: declares both an element and a redirect")]
    ElementAndRedirect { route: String },

    #[error("{route}: redirect target `{to}` must be an absolute path")]
    RelativeRedirect { route: String, to: String },

    #[error(transparent)]
    Redirect(#[from] RedirectIssue),

    #[error("duplicate resume id `{0}`")]
    DuplicateResumeId(String),

    #[error("duplicate public path `/{username}/{slug}`")]
    DuplicateResumeSlug { username: String, slug: String },

    #[error("cta: {0}")]
    Cta(#[from] CtaError),

    #[error("{field}: invalid socket address `{value}`")]
    InvalidAddress { field: &'static str, value: String },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.navigation.max_redirect_hops == 0 {
        errors.push(ValidationError::ZeroRedirectHops);
    }
    if config.navigation.loader_timeout_ms == 0 {
        errors.push(ValidationError::ZeroLoaderTimeout);
    }

    let route_errors_before = errors.len();
    validate_routes(&config.routes, "routes", &[], &mut errors);

    // Redirect analysis needs a well-formed tree.
    if errors.len() == route_errors_before && config.navigation.max_redirect_hops > 0 {
        match RouteTree::skeleton(&config.routes) {
            Ok(tree) => errors.extend(
                tree.check_redirects(config.navigation.max_redirect_hops)
                    .into_iter()
                    .map(ValidationError::from),
            ),
            Err(e) => tracing::warn!(error = %e, "Skipping redirect analysis"),
        }
    }

    validate_resumes(config, &mut errors);

    if let Err(e) = HeroCta::from_config(&config.cta) {
        errors.push(e.into());
    }

    check_address("server.bind_address", &config.server.bind_address, &mut errors);
    if config.observability.metrics_enabled {
        check_address(
            "observability.metrics_address",
            &config.observability.metrics_address,
            &mut errors,
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_routes(
    routes: &[RouteConfig],
    pointer: &str,
    bound: &[String],
    errors: &mut Vec<ValidationError>,
) {
    for (i, route) in routes.iter().enumerate() {
        let here = format!("{pointer}[{i}]");
        let mut params = bound.to_vec();

        if route.index {
            if route.path.is_some() {
                errors.push(ValidationError::IndexRoute {
                    route: here.clone(),
                    reason: "cannot declare a path",
                });
            }
            if !route.children.is_empty() {
                errors.push(ValidationError::IndexRoute {
                    route: here.clone(),
                    reason: "cannot have children",
                });
            }
        }

        if let Some(path) = &route.path {
            match PathPattern::parse(path) {
                Ok(pattern) => {
                    for name in pattern.param_names() {
                        if params.iter().any(|p| p == name) {
                            errors.push(ValidationError::DuplicateParam {
                                route: here.clone(),
                                name: name.to_string(),
                            });
                        } else {
                            params.push(name.to_string());
                        }
                    }
                }
                Err(source) => errors.push(ValidationError::InvalidPattern {
                    route: here.clone(),
                    source,
                }),
            }
        }

        if route.element.is_some() && route.redirect.is_some() {
            errors.push(ValidationError::ElementAndRedirect {
                route: here.clone(),
            });
        }
        if let Some(redirect) = &route.redirect {
            if !redirect.to.starts_with('/') {
                errors.push(ValidationError::RelativeRedirect {
                    route: here.clone(),
                    to: redirect.to.clone(),
                });
            }
        }

        validate_routes(&route.children, &format!("{here}.children"), &params, errors);
    }
}

fn validate_resumes(config: &RouterConfig, errors: &mut Vec<ValidationError>) {
    let mut ids = HashSet::new();
    let mut slugs = HashSet::new();
    for resume in &config.resumes {
        if !ids.insert(resume.id.as_str()) {
            errors.push(ValidationError::DuplicateResumeId(resume.id.clone()));
        }
        if !slugs.insert((resume.username.as_str(), resume.slug.as_str())) {
            errors.push(ValidationError::DuplicateResumeSlug {
                username: resume.username.clone(),
                slug: resume.slug.clone(),
            });
        }
    }
}

fn check_address(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}
