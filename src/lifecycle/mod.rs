//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Validate → Resume store → Registries → Route tree → Resolver
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C → Preview server stops accepting → In-flight requests finish
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then data, then the tree
//! - Fail fast: any startup error is fatal

pub mod shutdown;
pub mod startup;

pub use shutdown::{shutdown_signal, Shutdown};
pub use startup::{App, StartupError};
