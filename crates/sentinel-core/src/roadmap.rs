use crate::checks::CheckResult;
use crate::error::Result;
use crate::io::atomic_write;
use crate::report::AuditReport;
use crate::triage::open_issues;
use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effort {
    S,
    M,
}

impl Effort {
    /// High-severity issues and the multi-file setup tasks are medium effort.
    pub fn estimate(check: &CheckResult) -> Self {
        if check.severity == Severity::High
            || matches!(check.check_id.as_str(), "ci_present" | "demo_script")
        {
            Effort::M
        } else {
            Effort::S
        }
    }
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Effort::S => "S",
            Effort::M => "M",
        })
    }
}

pub fn roadmap_markdown(report: &AuditReport) -> String {
    let mut out = String::from("# Vibe Sentinel Roadmap\n\n");
    out.push_str(&format!(
        "Current projected score: **{:.1}/100**\n\n",
        report.scorecard.overall
    ));
    out.push_str("## Priority Plan\n\n");

    let issues = open_issues(report);
    if issues.is_empty() {
        out.push_str(
            "No blocking or warning findings detected. \
             Keep running `vibe-sentinel audit` after major changes.\n",
        );
        return out;
    }

    for (idx, check) in issues.iter().enumerate() {
        out.push_str(&format!(
            "{}. [{} | {}] {}: {}\n",
            idx + 1,
            check.severity.label(),
            Effort::estimate(check),
            check.title,
            check.recommendation
        ));
    }

    out.push_str("\n## Definition of Done\n\n");
    out.push_str("- Re-run `vibe-sentinel audit` and target 85+ projected score.\n");
    out.push_str("- Ensure no high-severity findings remain.\n");
    out.push_str("- Validate quickstart from a clean environment.\n");
    out
}

pub fn write_roadmap(report: &AuditReport, output: &Path) -> Result<String> {
    let markdown = roadmap_markdown(report);
    atomic_write(output, markdown.as_bytes())?;
    tracing::info!(path = %output.display(), "wrote roadmap");
    Ok(markdown)
}
