//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Resolver, loaders, preview server produce:
//!     → logging.rs (structured log events, one span per navigation)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stderr (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, preview server only)
//! ```
//!
//! # Design Decisions
//! - Structured fields (request_id, path, loader) rather than free text
//! - Metric updates are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
