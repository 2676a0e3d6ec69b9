//! Rendered view tree.

use serde::Serialize;
use serde_json::Value;

use crate::routing::params::Params;

/// The output of rendering a matched route chain.
///
/// Layouts wrap their matched child in `outlet`; the innermost view is the
/// page (or error view) itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub component: String,

    #[serde(skip_serializing_if = "Params::is_empty")]
    pub params: Params,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub outlet: Option<Box<View>>,
}

impl View {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            params: Params::new(),
            data: None,
            error: None,
            outlet: None,
        }
    }

    pub fn with_outlet(mut self, outlet: Option<View>) -> Self {
        self.outlet = outlet.map(Box::new);
        self
    }

    /// Component names from the outermost layout to the innermost view.
    pub fn components(&self) -> Vec<&str> {
        let mut names = vec![self.component.as_str()];
        let mut current = self;
        while let Some(next) = current.outlet.as_deref() {
            names.push(next.component.as_str());
            current = next;
        }
        names
    }

    /// The innermost rendered view (the page).
    pub fn innermost(&self) -> &View {
        let mut current = self;
        while let Some(next) = current.outlet.as_deref() {
            current = next;
        }
        current
    }

    pub fn contains(&self, component: &str) -> bool {
        self.components().contains(&component)
    }
}
