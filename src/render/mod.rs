//! Page rendering capability.
//!
//! # Data Flow
//! ```text
//! matched chain (outermost → innermost)
//!     → innermost route renders first (page or error element)
//!     → each ancestor with an element wraps the result as its outlet
//!     → View tree
//! ```
//!
//! Renderers are opaque to the resolver: it only hands them params, loader
//! data and (for error elements) the navigation error.

pub mod components;
pub mod view;

use serde_json::Value;

use crate::navigation::NavigationError;
use crate::routing::params::Params;

pub use components::{ComponentRegistry, StaticComponent};
pub use view::View;

/// Everything a component sees when rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Normalized location being rendered.
    pub location: &'a str,
    pub params: &'a Params,
    /// Data returned by this route's loader, if it declares one.
    pub data: Option<&'a Value>,
    /// Set only when rendering an error element.
    pub error: Option<&'a NavigationError>,
}

/// A page or layout renderer.
pub trait Component: Send + Sync {
    fn name(&self) -> &str;

    /// Render with the already-rendered child view as `outlet`.
    fn render(&self, ctx: &RenderContext<'_>, outlet: Option<View>) -> View;
}
