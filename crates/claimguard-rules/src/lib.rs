//! ClaimGuard Rules
//!
//! Rule-based compliance engine for regulated health claims.
//!
//! Rules are declarative data: a conjugation-aware pattern, a category, a
//! severity, a compliant replacement and a rationale. They are compiled once
//! into an immutable [`CompiledRuleSet`] and consumed uniformly by:
//! - the matcher, which finds sorted, non-overlapping hits
//! - the classifier, which derives a [`Verdict`]
//! - the remediator, which rewrites hits until the text scans clean
//!
//! [`check`] ties these together and is the surface the response pipeline
//! calls. [`ComplianceEngine`] adds atomic rule reloads on top.

pub mod builtin;
pub mod compiler;
pub mod engine;
pub mod matcher;
pub mod remediate;
pub mod report;
pub mod rule;
pub mod verdict;

pub use builtin::{builtin_pack, builtin_rules, BUILTIN_VERSION};
pub use claimguard_core::{Category, Error, Result, Severity, Verdict};
pub use compiler::{compile, CompileOptions, CompiledRule, CompiledRuleSet, RuleCompiler};
pub use engine::ComplianceEngine;
pub use matcher::{scan, Match};
pub use remediate::{apply_replacements, remediate, Remediation, DEFAULT_MAX_ITERATIONS};
pub use report::{check, CheckOptions, Disposition, RemediationSummary, Report, Violation};
pub use rule::{Rule, RulePack};
pub use verdict::{classify, severity_counts};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::compiler::{compile, CompiledRuleSet, RuleCompiler};
    pub use crate::engine::ComplianceEngine;
    pub use crate::report::{check, CheckOptions, Disposition, Report};
    pub use crate::rule::{Rule, RulePack};
    pub use claimguard_core::{Category, Severity, Verdict};
}
