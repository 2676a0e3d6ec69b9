//! Route nodes.

use std::sync::Arc;

use serde::Serialize;

use crate::loaders::Loader;
use crate::render::Component;
use crate::routing::pattern::{PathPattern, PatternError};

/// How a route participates in path matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePath {
    /// Consumes nothing; matches only through its children.
    Pathless,
    /// Matches when no segments remain.
    Index,
    Pattern(PathPattern),
}

impl RoutePath {
    pub fn pattern(raw: &str) -> Result<Self, PatternError> {
        PathPattern::parse(raw).map(Self::Pattern)
    }
}

/// Redirect target of a `Navigate` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub to: String,
    pub replace: bool,
}

/// What a matched route contributes.
#[derive(Clone)]
pub enum Element {
    Component(Arc<dyn Component>),
    Navigate(Redirect),
}

/// A loader bound to a route, with its registry name for logs and metrics.
#[derive(Clone)]
pub struct RouteLoader {
    pub name: String,
    pub loader: Arc<dyn Loader>,
}

/// A node of the route tree.
#[derive(Clone)]
pub struct Route {
    pub(crate) id: String,
    path: RoutePath,
    element: Option<Element>,
    loader: Option<RouteLoader>,
    error_element: Option<Arc<dyn Component>>,
    children: Vec<Route>,
}

impl Route {
    pub fn new(path: RoutePath) -> Self {
        Self {
            id: String::new(),
            path,
            element: None,
            loader: None,
            error_element: None,
            children: Vec::new(),
        }
    }

    pub fn pathless() -> Self {
        Self::new(RoutePath::Pathless)
    }

    pub fn index() -> Self {
        Self::new(RoutePath::Index)
    }

    pub fn with_component(mut self, component: impl Component + 'static) -> Self {
        self.element = Some(Element::Component(Arc::new(component)));
        self
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element = Some(element);
        self
    }

    pub fn with_redirect(mut self, to: impl Into<String>, replace: bool) -> Self {
        self.element = Some(Element::Navigate(Redirect {
            to: to.into(),
            replace,
        }));
        self
    }

    pub fn with_loader(mut self, name: impl Into<String>, loader: Arc<dyn Loader>) -> Self {
        self.loader = Some(RouteLoader {
            name: name.into(),
            loader,
        });
        self
    }

    pub fn with_error_element(mut self, component: Arc<dyn Component>) -> Self {
        self.error_element = Some(component);
        self
    }

    pub fn with_children(mut self, children: Vec<Route>) -> Self {
        self.children = children;
        self
    }

    /// Position in the tree, e.g. `0.1.2` (assigned when the tree is built).
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn path(&self) -> &RoutePath {
        &self.path
    }

    pub fn element(&self) -> Option<&Element> {
        self.element.as_ref()
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        match &self.element {
            Some(Element::Navigate(redirect)) => Some(redirect),
            _ => None,
        }
    }

    pub fn component(&self) -> Option<&Arc<dyn Component>> {
        match &self.element {
            Some(Element::Component(component)) => Some(component),
            _ => None,
        }
    }

    pub fn loader(&self) -> Option<&RouteLoader> {
        self.loader.as_ref()
    }

    pub fn error_element(&self) -> Option<&Arc<dyn Component>> {
        self.error_element.as_ref()
    }

    pub fn children(&self) -> &[Route] {
        &self.children
    }

    pub fn is_pathless(&self) -> bool {
        self.path == RoutePath::Pathless
    }

    pub(crate) fn assign_ids(routes: &mut [Route], prefix: &str) {
        for (i, route) in routes.iter_mut().enumerate() {
            route.id = if prefix.is_empty() {
                i.to_string()
            } else {
                format!("{prefix}.{i}")
            };
            let id = route.id.clone();
            Self::assign_ids(&mut route.children, &id);
        }
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let element = match &self.element {
            Some(Element::Component(c)) => Some(c.name().to_string()),
            Some(Element::Navigate(r)) => Some(format!("-> {}", r.to)),
            None => None,
        };
        f.debug_struct("Route")
            .field("id", &self.id)
            .field("path", &self.path)
            .field("element", &element)
            .field("loader", &self.loader.as_ref().map(|l| &l.name))
            .field("error_element", &self.error_element.as_ref().map(|c| c.name()))
            .field("children", &self.children)
            .finish()
    }
}
