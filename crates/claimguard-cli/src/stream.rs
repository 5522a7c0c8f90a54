//! Line-delimited JSON filter mode
//!
//! Each input line is a request `{"id"?, "text", "autofix"?}`; each output
//! line is the report for that request, or an error object when the line
//! could not be parsed. SIGHUP recompiles the rule pack and swaps it in
//! without interrupting the stream.

use crate::config::CliConfig;
use claimguard_rules::{builtin_pack, ComplianceEngine, Disposition, Report};
use claimguard_telemetry::{MetricsCollector, MetricsSnapshot};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, warn};

/// One request line
#[derive(Debug, Deserialize)]
pub struct StreamRequest {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub text: String,
    #[serde(default)]
    pub autofix: Option<bool>,
}

#[derive(Debug, Serialize)]
struct StreamReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<serde_json::Value>,
    #[serde(flatten)]
    report: &'a Report,
    disposition: Disposition,
}

#[derive(Debug, Serialize)]
struct StreamError {
    id: Option<serde_json::Value>,
    error: String,
}

/// Process requests from `reader` until EOF or Ctrl+C
pub async fn run<R, W>(
    engine: &ComplianceEngine,
    config: &CliConfig,
    reader: R,
    mut writer: W,
    collector: &MetricsCollector,
) -> anyhow::Result<MetricsSnapshot>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.split(b'\n');
    let mut reloads = ReloadSignal::new()?;
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!(rules = engine.rule_set().len(), "Stream mode started");

    loop {
        tokio::select! {
            segment = lines.next_segment() => {
                let Some(mut segment) = segment? else { break };
                if segment.last() == Some(&b'\r') {
                    segment.pop();
                }

                let output = match String::from_utf8(segment) {
                    Ok(line) if line.trim().is_empty() => continue,
                    Ok(line) => handle_line(engine, config, &line, collector)?,
                    Err(e) => {
                        warn!(error = %e, "Request line is not valid UTF-8");
                        serde_json::to_string(&StreamError {
                            id: None,
                            error: format!("request is not valid UTF-8: {}", e),
                        })?
                    }
                };
                writer.write_all(output.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
            _ = reloads.recv() => {
                reload(engine, config, collector);
            }
            _ = &mut shutdown => {
                warn!("Interrupt received, stopping stream");
                break;
            }
        }
    }

    let snapshot = collector.snapshot();
    info!(
        checks = snapshot.total_checks,
        flagged = snapshot.flagged,
        blocked = snapshot.blocked,
        violations = snapshot.total_violations(),
        flag_rate = snapshot.flag_rate(),
        remediation_success_rate = snapshot.remediation_success_rate(),
        avg_latency_us = snapshot.avg_latency_us(),
        rule_reloads = snapshot.rule_reloads,
        "Stream finished"
    );
    Ok(snapshot)
}

/// Check a single request line and render the output line
pub fn handle_line(
    engine: &ComplianceEngine,
    config: &CliConfig,
    line: &str,
    collector: &MetricsCollector,
) -> anyhow::Result<String> {
    let request: StreamRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Malformed request line");
            let id = serde_json::from_str::<serde_json::Value>(line)
                .ok()
                .and_then(|value| value.get("id").cloned());
            return Ok(serde_json::to_string(&StreamError {
                id,
                error: e.to_string(),
            })?);
        }
    };

    let start = Instant::now();
    let report = engine.check(&request.text, config.check_options(request.autofix));
    record(collector, &report, start);

    let disposition = report.disposition();
    debug!(id = ?request.id, disposition = ?disposition, "Request checked");

    Ok(serde_json::to_string(&StreamReport {
        id: request.id,
        report: &report,
        disposition,
    })?)
}

fn record(collector: &MetricsCollector, report: &Report, start: Instant) {
    collector.record_latency(start.elapsed().as_micros() as u64);
    collector.record_check(report.verdict);

    for violation in &report.matches {
        collector.record_violation(violation.severity);
    }
    if let Some(summary) = &report.remediation {
        collector.record_remediation(summary.converged);
    }
    if report.disposition() == Disposition::Block {
        collector.record_blocked();
    }
}

fn reload(engine: &ComplianceEngine, config: &CliConfig, collector: &MetricsCollector) {
    let result = match &config.rules_path {
        Some(path) => {
            info!(path = %path.display(), "Reloading rule pack");
            engine.reload_pack_file(path)
        }
        None => {
            info!("Reloading built-in rules");
            engine.reload_pack(&builtin_pack())
        }
    };

    match result {
        Ok(()) => collector.record_rule_reload(),
        Err(e) => error!(error = %e, "Reload failed, previous rules still active"),
    }
}

/// Hangup notifications used to trigger rule reloads
#[cfg(unix)]
struct ReloadSignal(tokio::signal::unix::Signal);

#[cfg(unix)]
impl ReloadSignal {
    fn new() -> std::io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};
        Ok(Self(signal(SignalKind::hangup())?))
    }

    async fn recv(&mut self) -> Option<()> {
        self.0.recv().await
    }
}

#[cfg(not(unix))]
struct ReloadSignal;

#[cfg(not(unix))]
impl ReloadSignal {
    fn new() -> std::io::Result<Self> {
        Ok(Self)
    }

    async fn recv(&mut self) -> Option<()> {
        std::future::pending().await
    }
}
