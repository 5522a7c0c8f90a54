//! Core types for ClaimGuard

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a regulated claim is
///
/// Ordering is `Low < Medium < High < Critical`; it drives both overlap
/// resolution in the matcher and verdict aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational wording a reviewer may want to soften
    Low,
    Medium,
    High,
    /// Claims reserved for approved pharmaceuticals
    Critical,
}

impl Severity {
    /// All severities, lowest first
    pub const ALL: [Severity; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Type of regulated claim a rule detects
///
/// New categories may be added; matching never depends on the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Category {
    /// Claims that a product cures or treats a disease
    DiseaseTreatment,
    /// Naming a specific disease in product copy
    DiseaseReference,
    /// Claims that a product prevents a disease
    DiseasePrevention,
    /// Claims of a pharmacological effect on the body
    MedicalEffect,
    /// Claims of changing body shape or structure
    BodyAlteration,
    /// Guarantees of efficacy
    EfficacyGuarantee,
    /// Absolute safety claims
    SafetyClaim,
    /// Comparisons with pharmaceuticals
    DrugEquivalence,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DiseaseTreatment => "disease_treatment",
            Self::DiseaseReference => "disease_reference",
            Self::DiseasePrevention => "disease_prevention",
            Self::MedicalEffect => "medical_effect",
            Self::BodyAlteration => "body_alteration",
            Self::EfficacyGuarantee => "efficacy_guarantee",
            Self::SafetyClaim => "safety_claim",
            Self::DrugEquivalence => "drug_equivalence",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Document-level compliance outcome
///
/// Derived purely from a match list and recomputed on every scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// No regulated language found
    Compliant,

    /// At least one rule matched
    Flagged {
        /// Highest severity among the matches
        highest_severity: Severity,
    },
}

impl Verdict {
    pub fn is_compliant(&self) -> bool {
        matches!(self, Self::Compliant)
    }

    pub fn is_flagged(&self) -> bool {
        !self.is_compliant()
    }

    /// Highest severity present, `None` when compliant
    pub fn highest_severity(&self) -> Option<Severity> {
        match self {
            Self::Compliant => None,
            Self::Flagged { highest_severity } => Some(*highest_severity),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::Flagged { .. } => "flagged",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compliant => f.write_str("compliant"),
            Self::Flagged { highest_severity } => write!(f, "flagged ({})", highest_severity),
        }
    }
}
