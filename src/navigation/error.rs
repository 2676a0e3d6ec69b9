//! Navigation error taxonomy.

use thiserror::Error;

use crate::loaders::LoaderError;

/// Errors surfaced by a navigation.
///
/// `NoMatch` and `LoaderFailure` are rendered through an error element and
/// still commit the location. `MisconfiguredRedirect` aborts the navigation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("no route matches `{path}`")]
    NoMatch { path: String },

    #[error("loader `{loader}` of route {route} failed: {source}")]
    LoaderFailure {
        route: String,
        loader: String,
        #[source]
        source: LoaderError,
    },

    #[error("redirect limit of {limit} exceeded: {}", .trail.join(" -> "))]
    MisconfiguredRedirect { limit: usize, trail: Vec<String> },
}
