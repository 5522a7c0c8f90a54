//! Matcher: locate rule hits and resolve overlaps
//!
//! Every rule contributes its own non-overlapping hits. Conflicts between
//! rules are resolved by priority interval selection: candidates are ranked
//! by severity (highest first), then start offset, then declaration order,
//! and each candidate is kept only if it intersects nothing kept so far.
//! Among equal severities this is plain leftmost-first selection; across
//! severities a milder claim can never shadow a more serious one.
//!
//! Matching is purely syntactic. Negated phrasing such as 治りません still
//! matches.

use crate::compiler::{CompiledRule, CompiledRuleSet};
use crate::rule::Rule;
use claimguard_core::{Category, Severity};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// One located occurrence of a rule's pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// The rule that matched
    pub rule: Arc<Rule>,

    /// Declaration index of the rule in its compiled set
    pub rule_index: usize,

    /// Byte offset where the match starts
    pub start: usize,

    /// Byte offset one past the end of the match
    pub end: usize,

    /// The matched slice of the scanned text
    pub matched_text: String,
}

impl Match {
    pub fn category(&self) -> Category {
        self.rule.category
    }

    pub fn severity(&self) -> Severity {
        self.rule.severity
    }

    pub fn replacement(&self) -> &str {
        &self.rule.suggested_replacement
    }

    pub fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// Whether two matches share at least one byte
    pub fn overlaps(&self, other: &Match) -> bool {
        self.start < other.end && other.start < self.end
    }
}

struct Candidate<'r> {
    rule: &'r CompiledRule,
    start: usize,
    end: usize,
}

/// Scan `text` against every rule in `rules`
///
/// The result is sorted by start offset and pairwise non-overlapping.
pub fn scan(text: &str, rules: &CompiledRuleSet) -> Vec<Match> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut candidates = Vec::new();
    for index in rules.candidate_rules(text) {
        let Some(rule) = rules.get(index) else {
            continue;
        };

        candidates.extend(
            rule.regex()
                .find_iter(text)
                .filter(|m| !m.is_empty())
                .map(|m| Candidate {
                    rule,
                    start: m.start(),
                    end: m.end(),
                }),
        );
    }

    let total = candidates.len();
    let matches = select(candidates, text);

    debug!(
        candidates = total,
        matches = matches.len(),
        bytes = text.len(),
        "Scanned text"
    );

    matches
}

/// Severity-priority greedy interval selection
fn select(mut candidates: Vec<Candidate<'_>>, text: &str) -> Vec<Match> {
    candidates.sort_by_key(|c| (Reverse(c.rule.severity()), c.start, c.rule.index()));

    // start -> candidate, kept disjoint
    let mut kept: BTreeMap<usize, Candidate<'_>> = BTreeMap::new();

    for candidate in candidates {
        if intersects_kept(&kept, candidate.start, candidate.end) {
            continue;
        }
        kept.insert(candidate.start, candidate);
    }

    kept.into_values()
        .map(|c| Match {
            rule: c.rule.rule_arc(),
            rule_index: c.rule.index(),
            start: c.start,
            end: c.end,
            matched_text: text[c.start..c.end].to_string(),
        })
        .collect()
}

fn intersects_kept(kept: &BTreeMap<usize, Candidate<'_>>, start: usize, end: usize) -> bool {
    if let Some((_, prev)) = kept.range(..=start).next_back() {
        if prev.end > start {
            return true;
        }
    }

    if let Some((&next_start, _)) = kept.range(start + 1..).next() {
        if next_start < end {
            return true;
        }
    }

    false
}
