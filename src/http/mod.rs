//! HTTP preview surface.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (request ID, tracing, timeout layers)
//!     → GET <path>: initial-load navigation on a fresh state
//!     → JSON outcome with a status code derived from it
//! ```

pub mod server;

pub use server::{status_for, PreviewServer};
