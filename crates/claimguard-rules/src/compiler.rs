//! Rule compiler
//!
//! Turns declarative rules into executable matchers once, at startup or on
//! reload. Compilation is all-or-nothing: the first invalid rule rejects the
//! whole set.

use crate::rule::{Rule, RulePack};
use claimguard_core::{Category, CompilationFailure, Result, RuleCompilationError, Severity};
use regex::{Regex, RegexBuilder, RegexSet, RegexSetBuilder};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Load-time verification switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Reject rules whose suggested replacement matches any rule in the set
    pub verify_replacements: bool,

    /// Reject rules whose documented surface forms are not matched in full
    pub verify_surface_forms: bool,
}

impl CompileOptions {
    /// Every load-time check enabled
    pub fn strict() -> Self {
        Self {
            verify_replacements: true,
            verify_surface_forms: true,
        }
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            verify_replacements: cfg!(debug_assertions),
            verify_surface_forms: cfg!(debug_assertions),
        }
    }
}

/// A rule paired with its executable matcher
#[derive(Debug, Clone)]
pub struct CompiledRule {
    rule: Arc<Rule>,
    regex: Regex,
    index: usize,
}

impl CompiledRule {
    /// The source rule
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Shared handle to the source rule
    pub fn rule_arc(&self) -> Arc<Rule> {
        Arc::clone(&self.rule)
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Position in declaration order; lower wins ties
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.rule.name
    }

    pub fn category(&self) -> Category {
        self.rule.category
    }

    pub fn severity(&self) -> Severity {
        self.rule.severity
    }

    pub fn suggested_replacement(&self) -> &str {
        &self.rule.suggested_replacement
    }
}

/// Immutable, order-preserving set of compiled rules
///
/// Safe to share across any number of concurrent scans.
#[derive(Debug, Clone)]
pub struct CompiledRuleSet {
    name: String,
    version: String,
    rules: Vec<CompiledRule>,
    prefilter: RegexSet,
}

impl CompiledRuleSet {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Compiled rules in declaration order
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    pub fn get(&self, index: usize) -> Option<&CompiledRule> {
        self.rules.get(index)
    }

    /// Look up a rule by name
    pub fn find(&self, name: &str) -> Option<&CompiledRule> {
        self.rules.iter().find(|r| r.name() == name)
    }

    /// Fast path: true when no rule matches anywhere in `text`
    pub fn is_compliant(&self, text: &str) -> bool {
        !self.prefilter.is_match(text)
    }

    /// Indices of rules with at least one hit in `text`
    pub(crate) fn candidate_rules(&self, text: &str) -> Vec<usize> {
        self.prefilter.matches(text).into_iter().collect()
    }
}

/// Compiles rules into a [`CompiledRuleSet`]
#[derive(Debug, Clone)]
pub struct RuleCompiler {
    options: CompileOptions,
    name: String,
    version: String,
}

impl Default for RuleCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleCompiler {
    /// Create a compiler with default options
    pub fn new() -> Self {
        Self {
            options: CompileOptions::default(),
            name: crate::builtin::BUILTIN_NAME.to_string(),
            version: crate::builtin::BUILTIN_VERSION.to_string(),
        }
    }

    /// Create a compiler with explicit options
    pub fn with_options(options: CompileOptions) -> Self {
        Self {
            options,
            ..Self::new()
        }
    }

    /// Toggle the replacement re-trigger check
    pub fn verify_replacements(mut self, enabled: bool) -> Self {
        self.options.verify_replacements = enabled;
        self
    }

    /// Toggle the surface form coverage check
    pub fn verify_surface_forms(mut self, enabled: bool) -> Self {
        self.options.verify_surface_forms = enabled;
        self
    }

    /// Set the name and version reported by the compiled set
    pub fn named(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.name = name.into();
        self.version = version.into();
        self
    }

    pub fn options(&self) -> CompileOptions {
        self.options
    }

    /// Compile a rule pack, honouring `extend_builtin`
    pub fn compile_pack(&self, pack: &RulePack) -> Result<CompiledRuleSet> {
        self.clone()
            .named(pack.name.clone(), pack.version.clone())
            .compile(&pack.resolved_rules())
    }

    /// Compile rules in declaration order; disabled rules are skipped
    pub fn compile(&self, rules: &[Rule]) -> Result<CompiledRuleSet> {
        let mut compiled: Vec<CompiledRule> = Vec::with_capacity(rules.len());
        let mut names = HashSet::new();

        for rule in rules.iter().filter(|r| r.enabled) {
            if !names.insert(rule.name.as_str()) {
                return Err(rejection(rule, CompilationFailure::DuplicateName).into());
            }

            let regex = compile_rule(rule)?;

            if self.options.verify_surface_forms {
                verify_surface_forms(rule, &regex)?;
            }

            debug!(rule = %rule.name, category = %rule.category, "Compiled rule");

            compiled.push(CompiledRule {
                rule: Arc::new(rule.clone()),
                regex,
                index: compiled.len(),
            });
        }

        if self.options.verify_replacements {
            verify_replacements(&compiled)?;
        }

        let prefilter = RegexSetBuilder::new(compiled.iter().map(|r| r.rule.pattern.as_str()))
            .case_insensitive(true)
            .build()
            .map_err(|e| claimguard_core::Error::config(format!("Failed to build rule prefilter: {}", e)))?;

        info!(
            name = %self.name,
            version = %self.version,
            rules = compiled.len(),
            skipped = rules.len() - compiled.len(),
            "Compiled rule set"
        );

        Ok(CompiledRuleSet {
            name: self.name.clone(),
            version: self.version.clone(),
            rules: compiled,
            prefilter,
        })
    }
}

/// Compile rules with default options
pub fn compile(rules: &[Rule]) -> Result<CompiledRuleSet> {
    RuleCompiler::new().compile(rules)
}

fn rejection(rule: &Rule, failure: CompilationFailure) -> RuleCompilationError {
    RuleCompilationError::new(&rule.name, rule.category, &rule.pattern, failure)
}

fn compile_rule(rule: &Rule) -> std::result::Result<Regex, RuleCompilationError> {
    if rule.pattern.trim().is_empty() {
        return Err(rejection(rule, CompilationFailure::EmptyPattern));
    }

    if rule.suggested_replacement.trim().is_empty() {
        return Err(rejection(rule, CompilationFailure::EmptyReplacement));
    }

    let regex = RegexBuilder::new(&rule.pattern)
        .case_insensitive(true)
        .unicode(true)
        .build()
        .map_err(|e| {
            rejection(
                rule,
                CompilationFailure::InvalidPattern {
                    reason: e.to_string(),
                },
            )
        })?;

    if minimum_match_len(rule)? == Some(0) {
        return Err(rejection(rule, CompilationFailure::MatchesEmpty));
    }

    Ok(regex)
}

/// Shortest match the pattern can produce; `None` when it can never match
fn minimum_match_len(rule: &Rule) -> std::result::Result<Option<usize>, RuleCompilationError> {
    let hir = regex_syntax::ParserBuilder::new()
        .case_insensitive(true)
        .build()
        .parse(&rule.pattern)
        .map_err(|e| {
            rejection(
                rule,
                CompilationFailure::InvalidPattern {
                    reason: e.to_string(),
                },
            )
        })?;

    Ok(hir.properties().minimum_len())
}

fn verify_surface_forms(rule: &Rule, regex: &Regex) -> std::result::Result<(), RuleCompilationError> {
    for form in &rule.surface_forms {
        let covered = regex
            .find(form)
            .map_or(false, |m| m.start() == 0 && m.end() == form.len());

        if !covered {
            return Err(rejection(
                rule,
                CompilationFailure::SurfaceFormNotCovered { form: form.clone() },
            ));
        }
    }
    Ok(())
}

fn verify_replacements(compiled: &[CompiledRule]) -> std::result::Result<(), RuleCompilationError> {
    for source in compiled {
        let replacement = source.suggested_replacement();
        if let Some(triggered) = compiled.iter().find(|r| r.regex.is_match(replacement)) {
            return Err(rejection(
                &source.rule,
                CompilationFailure::ReplacementRetriggers {
                    triggered_rule: triggered.name().to_string(),
                },
            ));
        }
    }
    Ok(())
}
