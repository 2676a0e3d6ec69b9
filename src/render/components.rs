//! Built-in components and the name → component registry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::render::{Component, RenderContext, View};

/// Names of the components the application route table refers to.
pub const APP_COMPONENTS: &[&str] = &[
    "providers",
    "error-page",
    "not-found",
    "home-layout",
    "home",
    "dashboard-layout",
    "resumes",
    "settings",
    "builder-layout",
    "builder",
    "public-resume",
];

/// A component that renders its own name plus whatever context it is given.
///
/// Stands in for the real page and layout implementations.
#[derive(Debug, Clone)]
pub struct StaticComponent {
    name: String,
}

impl StaticComponent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Component for StaticComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, ctx: &RenderContext<'_>, outlet: Option<View>) -> View {
        let mut view = View::new(self.name.as_str()).with_outlet(outlet);
        view.params = ctx.params.clone();
        view.data = ctx.data.cloned();
        view.error = ctx.error.map(ToString::to_string);
        view
    }
}

/// Registry resolving component names used in route configuration.
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    components: HashMap<String, Arc<dyn Component>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a [`StaticComponent`] for every application component.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for name in APP_COMPONENTS {
            registry.register(StaticComponent::new(*name));
        }
        registry
    }

    /// Register a component under its own name, replacing any previous one.
    pub fn register(&mut self, component: impl Component + 'static) -> &mut Self {
        self.components
            .insert(component.name().to_string(), Arc::new(component));
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Component>> {
        self.components.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.components.keys().collect();
        names.sort();
        f.debug_struct("ComponentRegistry")
            .field("components", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::params::Params;
    use serde_json::json;

    #[test]
    fn test_static_component_renders_context() {
        let params: Params = [("id", "abc123")].into_iter().collect();
        let data = json!({ "title": "CV" });
        let ctx = RenderContext {
            location: "/builder/abc123",
            params: &params,
            data: Some(&data),
            error: None,
        };

        let view = StaticComponent::new("builder").render(&ctx, None);
        assert_eq!(view.component, "builder");
        assert_eq!(view.params.get("id"), Some("abc123"));
        assert_eq!(view.data, Some(data));
        assert!(view.error.is_none());
    }

    #[test]
    fn test_defaults_cover_app_components() {
        let registry = ComponentRegistry::with_defaults();
        for name in APP_COMPONENTS {
            assert!(registry.contains(name), "missing {name}");
        }
        assert!(registry.get("unknown").is_none());
    }
}
