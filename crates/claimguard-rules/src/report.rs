//! Report assembly: the single entry point used by the response pipeline

use crate::compiler::CompiledRuleSet;
use crate::matcher::{scan, Match};
use crate::remediate::{remediate, DEFAULT_MAX_ITERATIONS};
use crate::verdict::classify;
use claimguard_core::{Category, Severity, Verdict};
use serde::{Deserialize, Serialize};

/// Options for a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOptions {
    /// Produce corrected text when the verdict is flagged
    #[serde(default)]
    pub autofix: bool,

    /// Bound on remediation passes
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl CheckOptions {
    /// Report only
    pub fn report_only() -> Self {
        Self {
            autofix: false,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Report plus corrected text when flagged
    pub fn autofix() -> Self {
        Self {
            autofix: true,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self::report_only()
    }
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

/// Caller-facing view of one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Name of the rule that matched
    pub rule: String,
    pub category: Category,
    pub severity: Severity,
    pub matched_text: String,

    /// UTF-8 byte offset of the first matched byte
    pub start_offset: usize,

    /// UTF-8 byte offset one past the last matched byte
    pub end_offset: usize,

    /// Reviewer-facing rationale
    pub description: String,
}

impl From<&Match> for Violation {
    fn from(m: &Match) -> Self {
        Self {
            rule: m.rule.name.clone(),
            category: m.rule.category,
            severity: m.rule.severity,
            matched_text: m.matched_text.clone(),
            start_offset: m.start,
            end_offset: m.end,
            description: m.rule.description.clone(),
        }
    }
}

/// Summary of an autofix attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemediationSummary {
    /// Rewrite passes performed
    pub iterations: usize,

    /// Whether the corrected text re-scanned clean
    pub converged: bool,

    /// Violations left in the corrected text
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub residual_matches: Vec<Violation>,
}

/// What the caller may forward to the end user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Original text is compliant
    ServeOriginal,
    /// Corrected text re-verified compliant
    ServeCorrected,
    /// Neither text may be shown
    Block,
}

/// Structured result of one check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub original_text: String,

    /// Violations sorted by start offset, non-overlapping
    pub matches: Vec<Violation>,

    #[serde(flatten)]
    pub verdict: Verdict,

    /// Present only when autofix was requested and the verdict was flagged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<RemediationSummary>,
}

impl Report {
    pub fn is_compliant(&self) -> bool {
        self.verdict.is_compliant()
    }

    pub fn highest_severity(&self) -> Option<Severity> {
        self.verdict.highest_severity()
    }

    /// Apply the consumer contract: flagged text is only servable once a
    /// correction has re-scanned clean
    pub fn disposition(&self) -> Disposition {
        if self.verdict.is_compliant() {
            return Disposition::ServeOriginal;
        }

        match (&self.corrected_text, &self.remediation) {
            (Some(_), Some(summary)) if summary.converged => Disposition::ServeCorrected,
            _ => Disposition::Block,
        }
    }

    /// The text that may be forwarded, or `None` when it must be blocked
    pub fn servable_text(&self) -> Option<&str> {
        match self.disposition() {
            Disposition::ServeOriginal => Some(&self.original_text),
            Disposition::ServeCorrected => self.corrected_text.as_deref(),
            Disposition::Block => None,
        }
    }
}

/// Scan, classify and optionally remediate `text`
pub fn check(text: &str, rules: &CompiledRuleSet, options: CheckOptions) -> Report {
    let matches = scan(text, rules);
    let verdict = classify(&matches);

    let (corrected_text, remediation) = if options.autofix && verdict.is_flagged() {
        let result = remediate(text, rules, options.max_iterations);
        let summary = RemediationSummary {
            iterations: result.iterations,
            converged: result.converged(),
            residual_matches: result.residual_matches.iter().map(Violation::from).collect(),
        };
        (Some(result.corrected_text), Some(summary))
    } else {
        (None, None)
    };

    Report {
        original_text: text.to_string(),
        matches: matches.iter().map(Violation::from).collect(),
        verdict,
        corrected_text,
        remediation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{compile, RuleCompiler};
    use crate::rule::Rule;

    fn rules() -> CompiledRuleSet {
        compile(&[
            Rule::new("disease", Category::DiseaseReference, Severity::High, "糖尿病", "体調")
                .with_description("disease name"),
            Rule::new("cure", Category::DiseaseTreatment, Severity::Critical, "治ります", "整います"),
        ])
        .unwrap()
    }

    #[test]
    fn test_compliant_report() {
        let report = check("毎日の健康に", &rules(), CheckOptions::autofix());
        assert!(report.is_compliant());
        assert!(report.matches.is_empty());
        assert!(report.corrected_text.is_none());
        assert!(report.remediation.is_none());
        assert_eq!(report.disposition(), Disposition::ServeOriginal);
        assert_eq!(report.servable_text(), Some("毎日の健康に"));
    }

    #[test]
    fn test_flagged_without_autofix_blocks() {
        let report = check("糖尿病が治ります", &rules(), CheckOptions::report_only());
        assert_eq!(report.highest_severity(), Some(Severity::Critical));
        assert_eq!(report.matches.len(), 2);
        assert_eq!(report.matches[0].description, "disease name");
        assert!(report.corrected_text.is_none());
        assert_eq!(report.disposition(), Disposition::Block);
        assert_eq!(report.servable_text(), None);
    }

    #[test]
    fn test_flagged_with_autofix_serves_corrected() {
        let report = check("糖尿病が治ります", &rules(), CheckOptions::autofix());
        assert_eq!(report.corrected_text.as_deref(), Some("体調が整います"));
        let summary = report.remediation.as_ref().unwrap();
        assert_eq!(summary.iterations, 1);
        assert!(summary.converged);
        assert_eq!(report.disposition(), Disposition::ServeCorrected);
        assert_eq!(report.servable_text(), Some("体調が整います"));
    }

    #[test]
    fn test_non_converged_autofix_blocks() {
        let set = RuleCompiler::new()
            .verify_replacements(false)
            .compile(&[
                Rule::new("a", Category::MedicalEffect, Severity::High, "奇跡", "万能"),
                Rule::new("b", Category::MedicalEffect, Severity::High, "万能", "奇跡"),
            ])
            .unwrap();

        let report = check("奇跡", &set, CheckOptions::autofix().with_max_iterations(2));
        let summary = report.remediation.as_ref().unwrap();
        assert!(!summary.converged);
        assert_eq!(summary.residual_matches.len(), 1);
        assert!(report.corrected_text.is_some());
        assert_eq!(report.disposition(), Disposition::Block);
    }

    #[test]
    fn test_report_json_shape() {
        let report = check("糖尿病が治ります", &rules(), CheckOptions::autofix());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["verdict"], "flagged");
        assert_eq!(json["highest_severity"], "critical");
        assert_eq!(json["matches"][0]["category"], "disease_reference");
        assert_eq!(json["matches"][0]["start_offset"], 0);
        assert_eq!(json["matches"][1]["severity"], "critical");
        assert_eq!(json["corrected_text"], "体調が整います");
        assert_eq!(json["remediation"]["converged"], true);

        let compliant = serde_json::to_value(check("こんにちは", &rules(), CheckOptions::default())).unwrap();
        assert_eq!(compliant["verdict"], "compliant");
        assert!(compliant.get("highest_severity").is_none());
        assert!(compliant.get("corrected_text").is_none());
    }

    #[test]
    fn test_options_deserialize_defaults() {
        let options: CheckOptions = serde_json::from_str(r#"{"autofix": true}"#).unwrap();
        assert!(options.autofix);
        assert_eq!(options.max_iterations, DEFAULT_MAX_ITERATIONS);
    }
}
