//! Hero call-to-action.
//!
//! Two static actions: "Get Started" navigates inside the app, "Learn more"
//! opens the documentation in a new browsing context without opener or
//! referrer and with a no-follow hint.

use thiserror::Error;
use url::Url;

use crate::config::schema::CtaConfig;
use crate::navigation::{
    NavigationError, NavigationOutcome, NavigationRequest, NavigationState, Resolver,
};

/// `target` of the external link.
pub const EXTERNAL_TARGET: &str = "_blank";

/// `rel` of the external link.
pub const EXTERNAL_REL: &str = "noopener noreferrer nofollow";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CtaError {
    #[error("invalid documentation URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("dashboard path must be absolute, got `{0}`")]
    RelativePath(String),
}

/// A call-to-action button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CtaAction {
    Navigate { label: String, to: String },
    ExternalLink { label: String, href: Url },
}

/// What activating an action did.
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    Navigated(NavigationOutcome),
    OpenExternal {
        href: Url,
        target: &'static str,
        rel: &'static str,
    },
}

impl CtaAction {
    pub fn label(&self) -> &str {
        match self {
            Self::Navigate { label, .. } | Self::ExternalLink { label, .. } => label,
        }
    }

    /// Trigger the action. Internal navigation pushes a history entry.
    pub async fn activate(
        &self,
        resolver: &Resolver,
        state: &NavigationState,
    ) -> Result<Activation, NavigationError> {
        match self {
            Self::Navigate { to, .. } => resolver
                .navigate(state, NavigationRequest::push(to.as_str()))
                .await
                .map(Activation::Navigated),
            Self::ExternalLink { href, .. } => Ok(Activation::OpenExternal {
                href: href.clone(),
                target: EXTERNAL_TARGET,
                rel: EXTERNAL_REL,
            }),
        }
    }

    /// Render as an anchor element.
    pub fn to_html(&self) -> String {
        match self {
            Self::Navigate { label, to } => {
                format!(r#"<a href="{}">{}</a>"#, escape(to), escape(label))
            }
            Self::ExternalLink { label, href } => format!(
                r#"<a href="{}" target="{EXTERNAL_TARGET}" rel="{EXTERNAL_REL}">{}</a>"#,
                escape(href.as_str()),
                escape(label)
            ),
        }
    }
}

/// The pair of hero actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroCta {
    get_started: CtaAction,
    learn_more: CtaAction,
}

impl HeroCta {
    pub fn from_config(config: &CtaConfig) -> Result<Self, CtaError> {
        if !config.dashboard_path.starts_with('/') {
            return Err(CtaError::RelativePath(config.dashboard_path.clone()));
        }
        let href = parse_docs_url(&config.docs_url)?;

        Ok(Self {
            get_started: CtaAction::Navigate {
                label: config.get_started_label.clone(),
                to: config.dashboard_path.clone(),
            },
            learn_more: CtaAction::ExternalLink {
                label: config.learn_more_label.clone(),
                href,
            },
        })
    }

    pub fn get_started(&self) -> &CtaAction {
        &self.get_started
    }

    pub fn learn_more(&self) -> &CtaAction {
        &self.learn_more
    }

    pub fn actions(&self) -> [&CtaAction; 2] {
        [&self.get_started, &self.learn_more]
    }

    pub fn to_html(&self) -> String {
        format!("{}\n{}", self.get_started.to_html(), self.learn_more.to_html())
    }
}

/// Parse an absolute http(s) URL.
pub fn parse_docs_url(raw: &str) -> Result<Url, CtaError> {
    let url = Url::parse(raw).map_err(|e| CtaError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(CtaError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme `{other}`"),
        }),
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_actions() {
        let cta = HeroCta::from_config(&CtaConfig::default()).unwrap();

        assert_eq!(
            cta.get_started(),
            &CtaAction::Navigate {
                label: "Get Started".into(),
                to: "/dashboard".into()
            }
        );
        assert_eq!(cta.learn_more().label(), "Learn more");
    }

    #[test]
    fn test_external_link_html() {
        let cta = HeroCta::from_config(&CtaConfig::default()).unwrap();
        assert_eq!(
            cta.learn_more().to_html(),
            r#"<a href="https://freeresumebuilder.co/docs" target="_blank" rel="noopener noreferrer nofollow">Learn more</a>"#
        );
        assert_eq!(cta.get_started().to_html(), r#"<a href="/dashboard">Get Started</a>"#);
    }

    #[test]
    fn test_labels_are_escaped() {
        let config = CtaConfig {
            get_started_label: "Start <now> & \"free\"".into(),
            ..CtaConfig::default()
        };
        let html = HeroCta::from_config(&config).unwrap().get_started().to_html();
        assert!(html.contains("Start &lt;now&gt; &amp; &quot;free&quot;"));
    }

    #[test]
    fn test_rejects_bad_targets() {
        let config = CtaConfig {
            docs_url: "javascript:alert(1)".into(),
            ..CtaConfig::default()
        };
        assert!(matches!(
            HeroCta::from_config(&config),
            Err(CtaError::InvalidUrl { .. })
        ));

        let config = CtaConfig {
            dashboard_path: "dashboard".into(),
            ..CtaConfig::default()
        };
        assert_eq!(
            HeroCta::from_config(&config),
            Err(CtaError::RelativePath("dashboard".into()))
        );
    }
}
