//! CLI configuration

use claimguard_rules::{CheckOptions, CompileOptions, DEFAULT_MAX_ITERATIONS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output format for reports and rule listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Configuration file contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// YAML rule pack; the built-in table is used when absent
    #[serde(default)]
    pub rules_path: Option<PathBuf>,

    /// Rewrite flagged text by default
    #[serde(default)]
    pub autofix: bool,

    /// Bound on remediation passes
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Default output format for `check` and `rules`
    #[serde(default)]
    pub output: OutputFormat,

    /// Reject rule sets whose replacements re-trigger a rule.
    /// Unset means the build default.
    #[serde(default)]
    pub verify_replacements: Option<bool>,
}

impl CliConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &Path, cli: &crate::Cli) -> anyhow::Result<Self> {
        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        if let Some(rules) = &cli.rules {
            config.rules_path = Some(rules.clone());
        }

        if let Some(max_iterations) = cli.max_iterations {
            config.max_iterations = max_iterations;
        }

        if config.max_iterations == 0 {
            anyhow::bail!("max_iterations must be at least 1");
        }

        Ok(config)
    }

    /// Options for a check, with an optional per-request autofix override
    pub fn check_options(&self, autofix: Option<bool>) -> CheckOptions {
        CheckOptions {
            autofix: autofix.unwrap_or(self.autofix),
            max_iterations: self.max_iterations,
        }
    }

    pub fn compile_options(&self) -> CompileOptions {
        let mut options = CompileOptions::default();
        if let Some(verify) = self.verify_replacements {
            options.verify_replacements = verify;
        }
        options
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            rules_path: None,
            autofix: false,
            max_iterations: default_max_iterations(),
            output: OutputFormat::default(),
            verify_replacements: None,
        }
    }
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}
