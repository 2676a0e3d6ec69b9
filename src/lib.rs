//! Client-side router for the Reactive Resume application shell.
//!
//! # Architecture Overview
//!
//! ```text
//!     NavigationRequest                ┌──────────────────────────────────────────┐
//!     ─────────────────────────────────┼─▶ navigation::Resolver                   │
//!                                      │      │                                   │
//!                                      │      ▼                                   │
//!                                      │   routing::RouteTree ── redirects ──┐    │
//!                                      │      │ matched chain                │    │
//!                                      │      ▼                              │    │
//!                                      │   loaders (concurrent, timed) ◀─────┘    │
//!                                      │      │                                   │
//!                                      │      ▼                                   │
//!     NavigationOutcome                │   render::View (page or error element)   │
//!     ◀────────────────────────────────┼── navigation::NavigationState commit     │
//!                                      └──────────────────────────────────────────┘
//!
//!     Cross-cutting: config, observability, lifecycle, http preview, cta
//! ```

// Core subsystems
pub mod config;
pub mod loaders;
pub mod navigation;
pub mod render;
pub mod routing;

// Surfaces
pub mod cta;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::RouterConfig;
pub use http::PreviewServer;
pub use lifecycle::{App, Shutdown};
pub use navigation::{NavigationOutcome, NavigationRequest, NavigationState, Resolver};
pub use routing::RouteTree;
