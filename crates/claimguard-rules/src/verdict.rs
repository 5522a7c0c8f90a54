//! Verdict aggregation

use crate::matcher::Match;
use claimguard_core::{Severity, Verdict};

/// Derive the document-level verdict from a match list
pub fn classify(matches: &[Match]) -> Verdict {
    match matches.iter().map(Match::severity).max() {
        None => Verdict::Compliant,
        Some(highest_severity) => Verdict::Flagged { highest_severity },
    }
}

/// Count matches per severity, lowest severity first
pub fn severity_counts(matches: &[Match]) -> [(Severity, usize); 4] {
    Severity::ALL.map(|severity| {
        let count = matches.iter().filter(|m| m.severity() == severity).count();
        (severity, count)
    })
}
