//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → startup builds the route tree once
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the route tree never changes at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    CtaConfig, LogFormat, NavigationConfig, ObservabilityConfig, RedirectConfig, ResumeConfig,
    RouteConfig, RouterConfig, ServerConfig,
};
pub use validation::{validate_config, ValidationError};
