//! Error types for ClaimGuard

use crate::types::Category;

/// Result type alias using ClaimGuard's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for ClaimGuard operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A rule could not be compiled; the whole rule set is rejected
    #[error(transparent)]
    RuleCompilation(#[from] RuleCompilationError),

    /// Rule pack loading errors
    #[error("rule pack error: {0}")]
    RulePack(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new rule pack error
    pub fn rule_pack(msg: impl Into<String>) -> Self {
        Self::RulePack(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// The compilation failure, if this error came from the rule compiler
    pub fn as_compilation(&self) -> Option<&RuleCompilationError> {
        match self {
            Self::RuleCompilation(e) => Some(e),
            _ => None,
        }
    }
}

/// Load-time failure naming the offending rule by name, category and pattern
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("rule '{rule}' ({category}, pattern `{pattern}`): {failure}")]
pub struct RuleCompilationError {
    /// Name of the offending rule
    pub rule: String,

    /// Category of the offending rule
    pub category: Category,

    /// Pattern text of the offending rule
    pub pattern: String,

    /// Why the rule was rejected
    pub failure: CompilationFailure,
}

impl RuleCompilationError {
    pub fn new(
        rule: impl Into<String>,
        category: Category,
        pattern: impl Into<String>,
        failure: CompilationFailure,
    ) -> Self {
        Self {
            rule: rule.into(),
            category,
            pattern: pattern.into(),
            failure,
        }
    }
}

/// Reason a rule was rejected at load time
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompilationFailure {
    #[error("pattern is empty")]
    EmptyPattern,

    #[error("suggested replacement is empty")]
    EmptyReplacement,

    #[error("invalid pattern: {reason}")]
    InvalidPattern { reason: String },

    #[error("pattern matches the empty string")]
    MatchesEmpty,

    #[error("suggested replacement re-triggers rule '{triggered_rule}'")]
    ReplacementRetriggers { triggered_rule: String },

    #[error("documented surface form '{form}' is not matched in full")]
    SurfaceFormNotCovered { form: String },

    #[error("rule name is declared more than once")]
    DuplicateName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compilation_error_names_rule() {
        let err = RuleCompilationError::new(
            "cure-verb",
            Category::DiseaseTreatment,
            "治(?:る",
            CompilationFailure::InvalidPattern {
                reason: "unclosed group".to_string(),
            },
        );

        let message = err.to_string();
        assert!(message.contains("cure-verb"));
        assert!(message.contains("disease_treatment"));
        assert!(message.contains("治(?:る"));
        assert!(message.contains("unclosed group"));
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = RuleCompilationError::new(
            "empty",
            Category::MedicalEffect,
            "",
            CompilationFailure::EmptyPattern,
        )
        .into();

        let compilation = err.as_compilation().unwrap();
        assert_eq!(compilation.failure, CompilationFailure::EmptyPattern);
        assert!(Error::config("bad").as_compilation().is_none());
    }
}
