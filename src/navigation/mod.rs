//! Navigation subsystem.
//!
//! # Data Flow
//! ```text
//! NavigationRequest (path, push/replace/pop)
//!     → resolver.rs (follow redirects via the route tree)
//!     → loaders of the matched chain (concurrent, bounded)
//!     → render page or nearest error element
//!     → history.rs commit (skipped when superseded)
//!     → NavigationOutcome
//! ```
//!
//! # Design Decisions
//! - Navigation state is an explicit object, never ambient global state
//! - Later navigations supersede earlier in-flight ones
//! - Error views are outcomes; only redirect misconfiguration is an `Err`

pub mod error;
pub mod history;
pub mod outcome;
pub mod request;
pub mod resolver;

pub use error::NavigationError;
pub use history::{History, NavigationState, Snapshot};
pub use outcome::{Committed, NavigationOutcome, NavigationStatus};
pub use request::{NavigationKind, NavigationRequest};
pub use resolver::Resolver;
