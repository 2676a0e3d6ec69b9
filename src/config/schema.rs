//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::table;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RouterConfig {
    /// Resolver limits.
    pub navigation: NavigationConfig,

    /// Route tree, outermost routes first.
    pub routes: Vec<RouteConfig>,

    /// Resumes served by the in-memory store.
    pub resumes: Vec<ResumeConfig>,

    /// Hero call-to-action targets.
    pub cta: CtaConfig,

    /// Preview server settings.
    pub server: ServerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            navigation: NavigationConfig::default(),
            routes: table::default_routes(),
            resumes: table::sample_resumes(),
            cta: CtaConfig::default(),
            server: ServerConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Resolver settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct NavigationConfig {
    /// Redirect hops allowed before a navigation is declared misconfigured.
    pub max_redirect_hops: usize,

    /// Per-loader timeout in milliseconds.
    pub loader_timeout_ms: u64,

    /// Component rendered when no error element is available.
    pub not_found_element: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            max_redirect_hops: 8,
            loader_timeout_ms: 10_000,
            not_found_element: "not-found".to_string(),
        }
    }
}

/// A route node.
///
/// A route with neither `path` nor `index` is pathless: it consumes no
/// segments and only matches through its children.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RouteConfig {
    /// Pattern relative to the parent (`dashboard`, `:id`, `/`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Matches when the parent consumed the whole path.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub index: bool,

    /// Component name rendered for this route.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,

    /// Re-navigate instead of rendering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<RedirectConfig>,

    /// Loader name run before rendering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loader: Option<String>,

    /// Component rendered when matching or loading fails beneath this route.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_element: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteConfig>,
}

impl RouteConfig {
    /// A pathless layout route.
    pub fn layout(element: &str, children: Vec<RouteConfig>) -> Self {
        Self {
            element: Some(element.to_string()),
            children,
            ..Self::default()
        }
    }

    /// A route that only contributes a path segment.
    pub fn segment(path: &str, children: Vec<RouteConfig>) -> Self {
        Self {
            path: Some(path.to_string()),
            children,
            ..Self::default()
        }
    }

    /// A leaf page.
    pub fn page(path: &str, element: &str) -> Self {
        Self {
            path: Some(path.to_string()),
            element: Some(element.to_string()),
            ..Self::default()
        }
    }

    /// An index route redirecting (with replace) to `to`.
    pub fn index_redirect(to: &str) -> Self {
        Self {
            index: true,
            redirect: Some(RedirectConfig {
                to: to.to_string(),
                replace: true,
            }),
            ..Self::default()
        }
    }

    pub fn with_loader(mut self, loader: &str) -> Self {
        self.loader = Some(loader.to_string());
        self
    }

    pub fn with_error_element(mut self, element: &str) -> Self {
        self.error_element = Some(element.to_string());
        self
    }
}

/// Redirect target.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RedirectConfig {
    /// Absolute target path.
    pub to: String,

    /// Replace the current history entry instead of pushing.
    #[serde(default = "default_replace")]
    pub replace: bool,
}

fn default_replace() -> bool {
    true
}

/// A resume record.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ResumeConfig {
    pub id: String,
    pub username: String,
    pub slug: String,
    pub title: String,

    /// Visible through the public `/:username/:slug` route.
    #[serde(default)]
    pub public: bool,
}

/// Hero call-to-action configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CtaConfig {
    pub get_started_label: String,

    /// Internal path the "Get Started" action navigates to.
    pub dashboard_path: String,

    pub learn_more_label: String,

    /// External documentation URL.
    pub docs_url: String,
}

impl Default for CtaConfig {
    fn default() -> Self {
        Self {
            get_started_label: "Get Started".to_string(),
            dashboard_path: "/dashboard".to_string(),
            learn_more_label: "Learn more".to_string(),
            docs_url: "https://freeresumebuilder.co/docs".to_string(),
        }
    }
}

/// Preview server configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:3000").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive.
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable the Prometheus endpoint (preview server only).
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RouterConfig::default();
        assert_eq!(config.navigation.max_redirect_hops, 8);
        assert_eq!(config.routes.len(), 1);
        assert!(!config.resumes.is_empty());
        assert_eq!(config.cta.dashboard_path, "/dashboard");
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_str = r#"
            [navigation]
            loader_timeout_ms = 500

            [[routes]]
            element = "home-layout"

            [[routes.children]]
            path = "/"
            element = "home"

            [[routes.children]]
            index = true
            redirect = { to = "/" }
        "#;

        let config: RouterConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.navigation.loader_timeout_ms, 500);
        assert_eq!(config.navigation.max_redirect_hops, 8);
        assert_eq!(config.routes.len(), 1);

        let children = &config.routes[0].children;
        assert_eq!(children[0], RouteConfig::page("/", "home"));
        assert_eq!(children[1].redirect.as_ref().map(|r| r.replace), Some(true));
        // resumes fall back to the built-in samples
        assert!(!config.resumes.is_empty());
    }

    #[test]
    fn test_unknown_route_field_rejected() {
        let toml_str = r#"
            [[routes]]
            path = "x"
            elemnt = "home"
        "#;
        assert!(toml::from_str::<RouterConfig>(toml_str).is_err());
    }
}
