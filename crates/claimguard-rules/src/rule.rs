//! Rule and rule pack definitions

use claimguard_core::{Category, Severity};
use serde::{Deserialize, Serialize};

/// One regulatory pattern: what to look for and how to rewrite it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Unique rule identifier
    pub name: String,

    /// Claim type this rule detects
    pub category: Category,

    /// How serious a match is
    pub severity: Severity,

    /// Conjugation-aware pattern: a word root followed by an alternation of
    /// its permissible inflectional endings. Matched case-insensitively.
    pub pattern: String,

    /// Compliant phrase substituted for every match
    pub suggested_replacement: String,

    /// Rationale shown to a human reviewer; not used in matching
    #[serde(default)]
    pub description: String,

    /// Inflected surface forms the pattern is documented to cover
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub surface_forms: Vec<String>,

    /// Whether this rule is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Rule {
    /// Create an enabled rule with no documented surface forms
    pub fn new(
        name: impl Into<String>,
        category: Category,
        severity: Severity,
        pattern: impl Into<String>,
        suggested_replacement: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            severity,
            pattern: pattern.into(),
            suggested_replacement: suggested_replacement.into(),
            description: String::new(),
            surface_forms: Vec::new(),
            enabled: true,
        }
    }

    /// Set the reviewer-facing rationale
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Document the surface forms this rule must match in full
    pub fn with_surface_forms<I, S>(mut self, forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.surface_forms = forms.into_iter().map(Into::into).collect();
        self
    }

    /// Disable this rule; disabled rules are skipped by the compiler
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// A versioned collection of rules, usually loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulePack {
    /// Pack name
    pub name: String,

    /// Description of what this pack enforces
    #[serde(default)]
    pub description: String,

    /// Version of the rule table
    #[serde(default)]
    pub version: String,

    /// Regulatory framework this pack supports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regulation: Option<String>,

    /// Append these rules after the built-in table instead of replacing it
    #[serde(default)]
    pub extend_builtin: bool,

    /// Rules in declaration order
    pub rules: Vec<Rule>,
}

impl RulePack {
    /// Load a rule pack from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load a rule pack from a file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> claimguard_core::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content).map_err(|e| {
            claimguard_core::Error::rule_pack(format!("{}: {}", path.display(), e))
        })
    }

    /// Rules to compile for this pack, in evaluation order
    pub fn resolved_rules(&self) -> Vec<Rule> {
        if self.extend_builtin {
            let mut rules = crate::builtin::builtin_rules();
            rules.extend(self.rules.iter().cloned());
            rules
        } else {
            self.rules.clone()
        }
    }
}

fn default_true() -> bool {
    true
}
