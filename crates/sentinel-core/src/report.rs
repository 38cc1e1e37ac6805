use crate::checks::CheckResult;
use crate::error::{Result, SentinelError};
use crate::io::{atomic_write, ensure_dir};
use crate::paths::{REPORT_JSON, REPORT_MD};
use crate::score::ScoreCard;
use crate::triage::{open_issues, sort_by_triage};
use crate::types::Status;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const TOP_FIXES: usize = 5;

// ---------------------------------------------------------------------------
// AuditReport
// ---------------------------------------------------------------------------

/// The persisted result of one audit. Checks keep evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub project_path: String,
    pub generated_at: DateTime<Utc>,
    pub scorecard: ScoreCard,
    pub checks: Vec<CheckResult>,
}

impl AuditReport {
    pub fn count(&self, status: Status) -> usize {
        self.checks.iter().filter(|c| c.status == status).count()
    }
}

/// Stamp a report with the current UTC time. The project path is
/// canonicalized when possible.
pub fn build_audit_report(
    project: &Path,
    checks: Vec<CheckResult>,
    scorecard: ScoreCard,
) -> AuditReport {
    let resolved = project
        .canonicalize()
        .unwrap_or_else(|_| project.to_path_buf());
    AuditReport {
        project_path: resolved.display().to_string(),
        generated_at: Utc::now(),
        scorecard,
        checks,
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn table_cell(text: &str) -> String {
    text.replace('|', "/")
}

pub fn markdown_report(report: &AuditReport) -> String {
    let card = &report.scorecard;
    let mut out = String::new();
    out.push_str("# Vibe Sentinel Audit Report\n\n");
    out.push_str(&format!("- Project: `{}`\n", report.project_path));
    out.push_str(&format!(
        "- Generated (UTC): `{}`\n\n",
        report.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    out.push_str("## Scorecard\n\n");
    out.push_str(&format!("- Usefulness: **{:.1}/100**\n", card.usefulness));
    out.push_str(&format!("- Impact: **{:.1}/100**\n", card.impact));
    out.push_str(&format!("- Execution: **{:.1}/100**\n", card.execution));
    out.push_str(&format!("- Innovation: **{:.1}/100**\n", card.innovation));
    out.push_str(&format!(
        "- Projected Vibeathon Score: **{:.1}/100**\n\n",
        card.overall
    ));
    out.push_str("## Checks\n\n");
    out.push_str("| Status | Category | Check | Detail | Recommendation |\n");
    out.push_str("|---|---|---|---|---|\n");

    let mut rows: Vec<&CheckResult> = report.checks.iter().collect();
    sort_by_triage(&mut rows);
    for check in rows {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            check.status.label(),
            check.category,
            check.title,
            table_cell(&check.detail),
            table_cell(&check.recommendation),
        ));
    }
    out
}

/// Short plain-text summary for the terminal.
pub fn console_summary(report: &AuditReport) -> String {
    let card = &report.scorecard;
    let mut lines = vec![
        format!("Projected Vibeathon score: {:.1}/100", card.overall),
        format!(
            "Category scores: usefulness {:.1}, impact {:.1}, execution {:.1}, innovation {:.1}",
            card.usefulness, card.impact, card.execution, card.innovation
        ),
        format!(
            "Findings: {} fail, {} warn",
            report.count(Status::Fail),
            report.count(Status::Warn)
        ),
    ];

    let top = open_issues(report);
    if !top.is_empty() {
        lines.push("Top fixes:".to_string());
        for item in top.into_iter().take(TOP_FIXES) {
            lines.push(format!(
                "- [{}] {}: {}",
                item.severity, item.title, item.recommendation
            ));
        }
    }
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

/// Write `report.json` and `report.md` into `output_dir`.
pub fn write_report_files(report: &AuditReport, output_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    ensure_dir(output_dir)?;
    let json_path = output_dir.join(REPORT_JSON);
    let md_path = output_dir.join(REPORT_MD);

    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    atomic_write(&json_path, json.as_bytes())?;
    atomic_write(&md_path, markdown_report(report).as_bytes())?;

    tracing::info!(path = %json_path.display(), "wrote audit report");
    Ok((json_path, md_path))
}

/// Load a previously written report. Missing or malformed files are errors.
pub fn load_report(path: &Path) -> Result<AuditReport> {
    let data = match std::fs::read_to_string(path) {
        Ok(d) => d,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SentinelError::ReportNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    serde_json::from_str(&data).map_err(|source| SentinelError::MalformedReport {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
