//! ClaimGuard CLI
//!
//! Checks marketing copy for regulated health claims.
//!
//! `check` scans one document, `stream` filters line-delimited JSON requests
//! (the shape used when sitting behind a response generator), and `rules`
//! lists the active rule set. Logs go to stderr so stdout stays
//! machine-readable.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use claimguard_rules::{builtin_pack, ComplianceEngine, Report};
use claimguard_telemetry::{describe_metrics, MetricsCollector};
use metrics_exporter_prometheus::PrometheusHandle;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

mod config;
mod output;
mod stream;

use config::{CliConfig, OutputFormat};

/// Exit status for a report that may not be served
const EXIT_BLOCKED: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "claimguard")]
#[command(about = "Flag and rewrite regulated health claims in marketing copy", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        env = "CLAIMGUARD_CONFIG",
        default_value = "claimguard.yaml"
    )]
    config: PathBuf,

    /// YAML rule pack (defaults to the built-in table)
    #[arg(short, long, global = true, env = "CLAIMGUARD_RULES")]
    rules: Option<PathBuf>,

    /// Bound on remediation passes
    #[arg(long, global = true, env = "CLAIMGUARD_MAX_ITERATIONS")]
    max_iterations: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print Prometheus metrics to stderr on exit
    #[arg(long, global = true)]
    print_metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a file, or stdin when no file is given
    Check {
        file: Option<PathBuf>,

        /// Produce corrected text for flagged input
        #[arg(long)]
        autofix: bool,

        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Filter JSON lines from stdin, writing one report per line
    Stream {
        /// Autofix requests that do not say otherwise
        #[arg(long)]
        autofix: bool,
    },

    /// List the active rules
    Rules {
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = CliConfig::load(&cli.config, &cli)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    let metrics_handle = if cli.print_metrics {
        Some(init_metrics()?)
    } else {
        None
    };

    let engine = build_engine(&config)?;

    let code = match cli.command {
        Command::Check {
            file,
            autofix,
            format,
        } => {
            let text = read_input(file.as_ref())?;
            let autofix = autofix || config.autofix;
            let report = engine.check(&text, config.check_options(Some(autofix)));

            let format = format.unwrap_or(config.output);
            println!("{}", output::render_report(&report, format)?.trim_end());
            exit_code(&report)
        }
        Command::Stream { autofix } => {
            let config = CliConfig {
                autofix: autofix || config.autofix,
                ..config
            };
            let collector = MetricsCollector::new();
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            stream::run(&engine, &config, stdin, tokio::io::stdout(), &collector).await?;
            ExitCode::SUCCESS
        }
        Command::Rules { format } => {
            let format = format.unwrap_or(config.output);
            let rules = engine.rule_set();
            println!("{}", output::render_rules(&rules, format)?.trim_end());
            ExitCode::SUCCESS
        }
    };

    if let Some(handle) = metrics_handle {
        eprintln!("{}", handle.render());
    }

    Ok(code)
}

fn build_engine(config: &CliConfig) -> Result<ComplianceEngine> {
    let options = config.compile_options();
    let engine = match &config.rules_path {
        Some(path) => ComplianceEngine::from_pack_file(path, options)
            .with_context(|| format!("Failed to load rule pack {}", path.display()))?,
        None => ComplianceEngine::from_pack(&builtin_pack(), options)
            .context("Failed to compile built-in rules")?,
    };

    let rules = engine.rule_set();
    info!(
        name = %rules.name(),
        version = %rules.version(),
        rules = rules.len(),
        "Rule set ready"
    );
    Ok(engine)
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            text
        }
    };

    Ok(text.trim_end_matches(['\r', '\n']).to_string())
}

fn exit_code(report: &Report) -> ExitCode {
    if report.servable_text().is_some() {
        ExitCode::SUCCESS
    } else {
        warn!(verdict = %report.verdict, "Text must be blocked");
        ExitCode::from(EXIT_BLOCKED)
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("claimguard=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("claimguard=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Install the Prometheus recorder and return a handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    describe_metrics();

    info!("Metrics recorder installed");
    Ok(handle)
}
