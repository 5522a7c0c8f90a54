//! ClaimGuard Telemetry
//!
//! Aggregate counters for compliance checks.
//!
//! Provides:
//! - Lock-free counters for verdicts, violations and remediation outcomes
//! - Descriptions for the metrics emitted by the engine

pub mod metrics;

pub use crate::metrics::{describe_metrics, MetricsCollector, MetricsSnapshot};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::metrics::{MetricsCollector, MetricsSnapshot};
}
