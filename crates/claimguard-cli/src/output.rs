//! Human-readable and JSON rendering

use crate::config::OutputFormat;
use claimguard_rules::{CompiledRuleSet, Disposition, Report};
use serde::Serialize;
use std::fmt::{self, Write};

/// One row of the `rules` listing
#[derive(Debug, Serialize)]
pub struct RuleListing<'a> {
    pub name: &'a str,
    pub category: claimguard_core::Category,
    pub severity: claimguard_core::Severity,
    pub pattern: &'a str,
    pub suggested_replacement: &'a str,
    pub description: &'a str,
}

pub fn render_report(report: &Report, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => Ok(report_text(report)?),
    }
}

pub fn render_rules(rules: &CompiledRuleSet, format: OutputFormat) -> anyhow::Result<String> {
    let listing: Vec<RuleListing<'_>> = rules
        .rules()
        .iter()
        .map(|compiled| {
            let rule = compiled.rule();
            RuleListing {
                name: &rule.name,
                category: rule.category,
                severity: rule.severity,
                pattern: &rule.pattern,
                suggested_replacement: &rule.suggested_replacement,
                description: &rule.description,
            }
        })
        .collect();

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&listing)?),
        OutputFormat::Text => {
            let mut out = String::new();
            writeln!(
                out,
                "{} v{} ({} rules)",
                rules.name(),
                rules.version(),
                rules.len()
            )?;
            for row in &listing {
                writeln!(
                    out,
                    "  {:<20} {:<18} {:<8} {} -> {}",
                    row.name, row.category, row.severity, row.pattern, row.suggested_replacement
                )?;
            }
            Ok(out)
        }
    }
}

fn report_text(report: &Report) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "verdict: {}", report.verdict)?;

    for violation in &report.matches {
        writeln!(
            out,
            "  [{}] {} {} \"{}\" at {}..{}",
            violation.severity,
            violation.category,
            violation.rule,
            violation.matched_text,
            violation.start_offset,
            violation.end_offset
        )?;
        if !violation.description.is_empty() {
            writeln!(out, "      {}", violation.description)?;
        }
    }

    if let (Some(corrected), Some(summary)) = (&report.corrected_text, &report.remediation) {
        writeln!(
            out,
            "corrected ({} pass{}, {}): {}",
            summary.iterations,
            if summary.iterations == 1 { "" } else { "es" },
            if summary.converged { "converged" } else { "not converged" },
            corrected
        )?;
        for residual in &summary.residual_matches {
            writeln!(out, "  residual: {} \"{}\"", residual.rule, residual.matched_text)?;
        }
    }

    let disposition = match report.disposition() {
        Disposition::ServeOriginal => "serve original",
        Disposition::ServeCorrected => "serve corrected",
        Disposition::Block => "block",
    };
    writeln!(out, "disposition: {}", disposition)?;
    Ok(out)
}
