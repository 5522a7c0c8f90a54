//! Metrics collection and reporting

use claimguard_core::{Severity, Verdict};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics collector for compliance checks
#[derive(Clone)]
pub struct MetricsCollector {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    total_checks: AtomicU64,
    flagged: AtomicU64,
    remediated: AtomicU64,
    converged: AtomicU64,
    blocked: AtomicU64,
    rule_reloads: AtomicU64,
    total_latency_us: AtomicU64,
    // indexed like Severity::ALL
    violations: [AtomicU64; 4],
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                total_checks: AtomicU64::new(0),
                flagged: AtomicU64::new(0),
                remediated: AtomicU64::new(0),
                converged: AtomicU64::new(0),
                blocked: AtomicU64::new(0),
                rule_reloads: AtomicU64::new(0),
                total_latency_us: AtomicU64::new(0),
                violations: Default::default(),
            }),
        }
    }

    /// Record a completed check and its verdict
    pub fn record_check(&self, verdict: Verdict) {
        self.inner.total_checks.fetch_add(1, Ordering::Relaxed);
        if verdict.is_flagged() {
            self.inner.flagged.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record one violation
    pub fn record_violation(&self, severity: Severity) {
        self.inner.violations[severity_slot(severity)].fetch_add(1, Ordering::Relaxed);
    }

    /// Record an autofix attempt and whether it converged
    pub fn record_remediation(&self, converged: bool) {
        self.inner.remediated.fetch_add(1, Ordering::Relaxed);
        if converged {
            self.inner.converged.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a response that had to be blocked
    pub fn record_blocked(&self) {
        self.inner.blocked.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful rule reload
    pub fn record_rule_reload(&self) {
        self.inner.rule_reloads.fetch_add(1, Ordering::Relaxed);
    }

    /// Record check latency
    pub fn record_latency(&self, latency_us: u64) {
        self.inner
            .total_latency_us
            .fetch_add(latency_us, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        let violations = Severity::ALL.map(|severity| {
            let count = self.inner.violations[severity_slot(severity)].load(Ordering::Relaxed);
            (severity, count)
        });

        MetricsSnapshot {
            total_checks: self.inner.total_checks.load(Ordering::Relaxed),
            flagged: self.inner.flagged.load(Ordering::Relaxed),
            remediated: self.inner.remediated.load(Ordering::Relaxed),
            converged: self.inner.converged.load(Ordering::Relaxed),
            blocked: self.inner.blocked.load(Ordering::Relaxed),
            rule_reloads: self.inner.rule_reloads.load(Ordering::Relaxed),
            total_latency_us: self.inner.total_latency_us.load(Ordering::Relaxed),
            violations: violations.to_vec(),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

fn severity_slot(severity: Severity) -> usize {
    match severity {
        Severity::Low => 0,
        Severity::Medium => 1,
        Severity::High => 2,
        Severity::Critical => 3,
    }
}

/// Snapshot of current metrics
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub total_checks: u64,
    pub flagged: u64,
    pub remediated: u64,
    pub converged: u64,
    pub blocked: u64,
    pub rule_reloads: u64,
    pub total_latency_us: u64,
    /// Violation counts, lowest severity first
    pub violations: Vec<(Severity, u64)>,
}

impl MetricsSnapshot {
    /// Calculate average latency per check
    pub fn avg_latency_us(&self) -> u64 {
        if self.total_checks == 0 {
            0
        } else {
            self.total_latency_us / self.total_checks
        }
    }

    /// Share of checks that were flagged
    pub fn flag_rate(&self) -> f64 {
        if self.total_checks == 0 {
            0.0
        } else {
            self.flagged as f64 / self.total_checks as f64
        }
    }

    /// Share of autofix attempts that converged
    pub fn remediation_success_rate(&self) -> f64 {
        if self.remediated == 0 {
            0.0
        } else {
            self.converged as f64 / self.remediated as f64
        }
    }

    /// Total violations across all severities
    pub fn total_violations(&self) -> u64 {
        self.violations.iter().map(|(_, count)| count).sum()
    }
}

/// Register descriptions for the metrics emitted by the engine
pub fn describe_metrics() {
    ::metrics::describe_counter!(
        "claimguard_scans_total",
        "Total number of compliance checks by verdict"
    );
    ::metrics::describe_counter!(
        "claimguard_violations_total",
        "Total number of violations by category and severity"
    );
    ::metrics::describe_counter!(
        "claimguard_remediations_total",
        "Total number of autofix attempts by outcome"
    );
    ::metrics::describe_counter!(
        "claimguard_rule_reloads_total",
        "Total number of rule set reloads by outcome"
    );
    ::metrics::describe_histogram!(
        "claimguard_scan_latency_us",
        ::metrics::Unit::Microseconds,
        "Compliance check latency in microseconds"
    );

    tracing::debug!("Metrics described");
}
