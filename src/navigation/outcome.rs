//! Navigation results.

use serde::Serialize;
use uuid::Uuid;

use crate::loaders::LoaderError;
use crate::render::View;

/// What ended up on screen for a committed navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavigationStatus {
    /// The matched page rendered.
    Rendered,
    /// Nothing matched; an error element rendered.
    NotFound,
    /// A loader failed; the nearest error element rendered.
    LoaderFailed {
        route: String,
        loader: String,
        error: LoaderError,
    },
}

/// A navigation that reached history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Committed {
    pub request_id: Uuid,
    /// Final location after redirects.
    pub location: String,
    pub status: NavigationStatus,
    pub view: Option<View>,
    /// Locations redirected away from, in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub redirects: Vec<String>,
}

impl Committed {
    pub fn is_rendered(&self) -> bool {
        self.status == NavigationStatus::Rendered
    }

    /// Component names of the rendered view, outermost first.
    pub fn components(&self) -> Vec<&str> {
        self.view.as_ref().map(View::components).unwrap_or_default()
    }
}

/// Result of [`Resolver::navigate`](crate::navigation::Resolver::navigate).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavigationOutcome {
    Committed(Committed),
    /// A later navigation was issued before this one settled; its result
    /// was discarded.
    Superseded { request_id: Uuid, path: String },
}

impl NavigationOutcome {
    pub fn committed(&self) -> Option<&Committed> {
        match self {
            Self::Committed(committed) => Some(committed),
            Self::Superseded { .. } => None,
        }
    }

    pub fn into_committed(self) -> Option<Committed> {
        match self {
            Self::Committed(committed) => Some(committed),
            Self::Superseded { .. } => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded { .. })
    }

    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Committed(c) => match c.status {
                NavigationStatus::Rendered => "rendered",
                NavigationStatus::NotFound => "not_found",
                NavigationStatus::LoaderFailed { .. } => "loader_failed",
            },
            Self::Superseded { .. } => "superseded",
        }
    }
}
