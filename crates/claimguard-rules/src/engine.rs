//! Compliance engine with atomically swappable rules
//!
//! The engine owns an `Arc<CompiledRuleSet>` behind a short-lived lock.
//! Checks clone the `Arc` and scan without holding the lock; reloads compile
//! the replacement set first and only then swap the pointer, so a set in use
//! is never mutated and a failed reload leaves the old rules serving.

use crate::builtin::builtin_pack;
use crate::compiler::{CompileOptions, CompiledRuleSet, RuleCompiler};
use crate::report::{check, CheckOptions, Report};
use crate::rule::{Rule, RulePack};
use claimguard_core::Result;
use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Shared, hot-swappable compliance engine
pub struct ComplianceEngine {
    rules: RwLock<Arc<CompiledRuleSet>>,
    compiler: RuleCompiler,
}

impl ComplianceEngine {
    /// Create an engine serving an already compiled set
    pub fn new(rules: CompiledRuleSet) -> Self {
        Self {
            rules: RwLock::new(Arc::new(rules)),
            compiler: RuleCompiler::new(),
        }
    }

    /// Create an engine serving the built-in rule table
    pub fn with_builtin_rules() -> Result<Self> {
        Self::from_pack(&builtin_pack(), CompileOptions::default())
    }

    /// Create an engine from a rule pack
    pub fn from_pack(pack: &RulePack, options: CompileOptions) -> Result<Self> {
        let compiler = RuleCompiler::with_options(options);
        let rules = compiler.compile_pack(pack)?;
        Ok(Self {
            rules: RwLock::new(Arc::new(rules)),
            compiler,
        })
    }

    /// Create an engine from a YAML rule pack on disk
    pub fn from_pack_file(path: impl AsRef<Path>, options: CompileOptions) -> Result<Self> {
        let pack = RulePack::from_file(path)?;
        Self::from_pack(&pack, options)
    }

    /// Snapshot of the rule set currently serving
    pub fn rule_set(&self) -> Arc<CompiledRuleSet> {
        Arc::clone(&*self.rules.read())
    }

    /// Check `text` against the current rules
    pub fn check(&self, text: &str, options: CheckOptions) -> Report {
        let start = Instant::now();
        let rules = self.rule_set();
        let report = check(text, &rules, options);

        record_report(&report, start);
        report
    }

    /// Compile `rules` and swap them in; the old set keeps serving on error
    pub fn reload(&self, rules: &[Rule]) -> Result<()> {
        let compiled = self.compiler.compile(rules);
        self.install(compiled)
    }

    /// Compile a rule pack and swap it in
    pub fn reload_pack(&self, pack: &RulePack) -> Result<()> {
        let compiled = self.compiler.compile_pack(pack);
        self.install(compiled)
    }

    /// Load, compile and swap in a YAML rule pack from disk
    pub fn reload_pack_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        match RulePack::from_file(path) {
            Ok(pack) => self.reload_pack(&pack),
            Err(e) => {
                error!(path = %path.display(), error = %e, "Rule pack reload rejected");
                metrics::counter!("claimguard_rule_reloads_total", "outcome" => "rejected").increment(1);
                Err(e)
            }
        }
    }

    fn install(&self, compiled: Result<CompiledRuleSet>) -> Result<()> {
        match compiled {
            Ok(rules) => {
                let (name, version, count) =
                    (rules.name().to_string(), rules.version().to_string(), rules.len());
                *self.rules.write() = Arc::new(rules);

                info!(name = %name, version = %version, rules = count, "Rule set swapped");
                metrics::counter!("claimguard_rule_reloads_total", "outcome" => "applied").increment(1);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Rule set reload rejected, keeping current rules");
                metrics::counter!("claimguard_rule_reloads_total", "outcome" => "rejected").increment(1);
                Err(e)
            }
        }
    }
}

fn record_report(report: &Report, start: Instant) {
    metrics::histogram!("claimguard_scan_latency_us").record(start.elapsed().as_micros() as f64);
    metrics::counter!("claimguard_scans_total", "verdict" => report.verdict.label()).increment(1);

    for violation in &report.matches {
        metrics::counter!(
            "claimguard_violations_total",
            "category" => violation.category.as_str(),
            "severity" => violation.severity.as_str()
        )
        .increment(1);
    }

    if let Some(summary) = &report.remediation {
        let outcome = if summary.converged { "converged" } else { "exhausted" };
        metrics::counter!("claimguard_remediations_total", "outcome" => outcome).increment(1);
    }

    debug!(
        verdict = %report.verdict,
        matches = report.matches.len(),
        disposition = ?report.disposition(),
        "Check complete"
    );
}
