//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation path
//!     → pattern.rs (normalize, split into segments)
//!     → matcher.rs (depth-first walk of the route tree)
//!     → Return: Matched(chain), Redirect(target) or NotFound
//!
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → Parse patterns, bind component and loader names
//!     → Check redirect targets settle
//!     → Freeze as immutable RouteTree
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex and no wildcards (segment-wise matching only)
//! - Deterministic: same input always matches same chain
//! - First match wins (declaration order)

pub mod matcher;
pub mod params;
pub mod pattern;
pub mod route;
pub mod router;
pub mod table;

pub use matcher::{MatchedChain, Resolution};
pub use params::Params;
pub use route::{Element, Redirect, Route, RoutePath};
pub use router::{BuildError, RedirectIssue, RouteTree};
