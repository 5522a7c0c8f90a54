//! Remediator: rewrite flagged spans into compliant phrasing
//!
//! Each pass replaces every kept match with its rule's suggested
//! replacement and re-scans the result. Passes repeat until a scan comes
//! back clean or the iteration bound is hit. A non-empty
//! `residual_matches` after the bound means the text is still flagged.

use crate::compiler::CompiledRuleSet;
use crate::matcher::{scan, Match};
use tracing::{debug, warn};

/// Default bound on rewrite passes
pub const DEFAULT_MAX_ITERATIONS: usize = 3;

/// Outcome of remediation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remediation {
    /// Text after the last rewrite pass
    pub corrected_text: String,

    /// Number of rewrite passes performed
    pub iterations: usize,

    /// Matches still present in `corrected_text`
    pub residual_matches: Vec<Match>,
}

impl Remediation {
    /// Whether the corrected text re-scanned clean
    pub fn converged(&self) -> bool {
        self.residual_matches.is_empty()
    }
}

/// Rewrite `text` until it scans clean or `max_iterations` passes have run
pub fn remediate(text: &str, rules: &CompiledRuleSet, max_iterations: usize) -> Remediation {
    let mut corrected_text = text.to_string();
    let mut matches = scan(&corrected_text, rules);
    let mut iterations = 0;

    while !matches.is_empty() && iterations < max_iterations {
        corrected_text = apply_replacements(&corrected_text, &matches);
        iterations += 1;
        matches = scan(&corrected_text, rules);

        debug!(
            iteration = iterations,
            residual = matches.len(),
            "Remediation pass complete"
        );
    }

    if !matches.is_empty() {
        warn!(
            iterations,
            residual = matches.len(),
            first_rule = %matches[0].rule.name,
            "Remediation did not converge"
        );
    }

    Remediation {
        corrected_text,
        iterations,
        residual_matches: matches,
    }
}

/// Splice each match's replacement into `text`, right to left
///
/// `matches` must come from scanning `text`: sorted and non-overlapping.
pub fn apply_replacements(text: &str, matches: &[Match]) -> String {
    let mut result = text.to_string();

    for m in matches.iter().rev() {
        if m.start <= m.end && m.end <= result.len() {
            result.replace_range(m.start..m.end, m.replacement());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{compile, RuleCompiler};
    use crate::rule::Rule;
    use claimguard_core::{Category, Severity};

    fn rule(name: &str, pattern: &str, replacement: &str) -> Rule {
        Rule::new(name, Category::DiseaseTreatment, Severity::Critical, pattern, replacement)
    }

    #[test]
    fn test_clean_text_untouched() {
        let set = compile(&[rule("cure", "治ります", "整います")]).unwrap();
        let result = remediate("健康維持をサポートします", &set, 3);

        assert_eq!(result.corrected_text, "健康維持をサポートします");
        assert_eq!(result.iterations, 0);
        assert!(result.converged());
    }

    #[test]
    fn test_single_pass() {
        let set = compile(&[
            rule("disease", "糖尿病", "体調"),
            rule("cure", "治(?:ります|る)", "整います"),
        ])
        .unwrap();
        let result = remediate("糖尿病が治ります。糖尿病に", &set, 3);

        assert_eq!(result.corrected_text, "体調が整います。体調に");
        assert_eq!(result.iterations, 1);
        assert!(result.converged());
    }

    #[test]
    fn test_non_convergence_is_reported() {
        // Each replacement triggers the other rule
        let set = RuleCompiler::new()
            .verify_replacements(false)
            .compile(&[rule("miracle", "奇跡", "万能"), rule("panacea", "万能", "奇跡")])
            .unwrap();

        let result = remediate("奇跡のサプリ", &set, 4);
        assert_eq!(result.iterations, 4);
        assert!(!result.converged());
        assert_eq!(result.corrected_text, "奇跡のサプリ");
        assert_eq!(result.residual_matches[0].rule.name, "miracle");
    }

    #[test]
    fn test_zero_iterations() {
        let set = compile(&[rule("cure", "治る", "整う")]).unwrap();
        let result = remediate("治る", &set, 0);
        assert_eq!(result.corrected_text, "治る");
        assert_eq!(result.iterations, 0);
        assert_eq!(result.residual_matches.len(), 1);
    }

    #[test]
    fn test_input_not_mutated() {
        let set = compile(&[rule("cure", "治る", "整う")]).unwrap();
        let original = String::from("すぐ治る");
        let result = remediate(&original, &set, 3);
        assert_eq!(original, "すぐ治る");
        assert_eq!(result.corrected_text, "すぐ整う");
    }

    #[test]
    fn test_apply_replacements_right_to_left() {
        let set = compile(&[rule("a", "ab", "XYZ"), rule("b", "cd", "W")]).unwrap();
        let text = "ab-cd-ab";
        let matches = scan(text, &set);
        assert_eq!(apply_replacements(text, &matches), "XYZ-W-XYZ");
    }
}
