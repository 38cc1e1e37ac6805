//! End-to-end flows over one project: audit, then write a document into the
//! artifact layout. These are the operations the CLI and the HTTP API expose.

use crate::agent_pack::{write_agent_pack, AgentPackPaths, AgentTask};
use crate::checks::{round2, run_checks, CheckResult};
use crate::coach::write_coach;
use crate::context::build_context;
use crate::error::{Result, SentinelError};
use crate::paths::{expand_home, ArtifactLayout};
use crate::report::{build_audit_report, write_report_files, AuditReport};
use crate::roadmap::write_roadmap;
use crate::score::compute_scorecard;
use crate::triage::open_issues;
use crate::types::{Severity, Status};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Largest artifact `read_artifact` will return.
pub const MAX_ARTIFACT_BYTES: u64 = 2_000_000;

const TOP_ACTIONS: usize = 3;

// ---------------------------------------------------------------------------
// Project resolution and audit
// ---------------------------------------------------------------------------

/// Canonicalize `path` and require an existing directory.
pub fn resolve_project(path: &Path) -> Result<PathBuf> {
    match path.canonicalize() {
        Ok(p) if p.is_dir() => Ok(p),
        Ok(p) => Err(SentinelError::ProjectNotFound(p)),
        Err(_) => Err(SentinelError::ProjectNotFound(path.to_path_buf())),
    }
}

/// Snapshot, evaluate and score a project. Never fails.
pub fn audit_project(project: &Path) -> AuditReport {
    let checks = run_checks(&build_context(project));
    let scorecard = compute_scorecard(&checks);
    tracing::debug!(
        project = %project.display(),
        overall = scorecard.overall,
        "audit complete"
    );
    build_audit_report(project, checks, scorecard)
}

// ---------------------------------------------------------------------------
// Insights
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreBand {
    Excellent,
    Strong,
    NeedsWork,
    Critical,
}

impl ScoreBand {
    pub fn for_score(overall: f64) -> Self {
        if overall >= 90.0 {
            ScoreBand::Excellent
        } else if overall >= 75.0 {
            ScoreBand::Strong
        } else if overall >= 55.0 {
            ScoreBand::NeedsWork
        } else {
            ScoreBand::Critical
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pass: usize,
    pub warn: usize,
    pub fail: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub status_counts: StatusCounts,
    pub severity_counts: SeverityCounts,
    pub open_findings: usize,
    pub pass_rate: f64,
    pub score_band: ScoreBand,
    pub top_actions: Vec<String>,
}

pub fn derive_insights(report: &AuditReport) -> Insights {
    let mut status_counts = StatusCounts::default();
    let mut severity_counts = SeverityCounts::default();
    for check in &report.checks {
        match check.status {
            Status::Pass => status_counts.pass += 1,
            Status::Warn => status_counts.warn += 1,
            Status::Fail => status_counts.fail += 1,
        }
        match check.severity {
            Severity::High => severity_counts.high += 1,
            Severity::Medium => severity_counts.medium += 1,
            Severity::Low => severity_counts.low += 1,
        }
    }

    let total = report.checks.len();
    let pass_rate = if total == 0 {
        0.0
    } else {
        ((status_counts.pass as f64 / total as f64) * 1000.0).round() / 10.0
    };

    let findings = open_issues(report);
    let mut top_actions: Vec<String> = Vec::new();
    for finding in &findings {
        let rec = finding.recommendation.trim();
        if !rec.is_empty() && !top_actions.iter().any(|a| a == rec) {
            top_actions.push(rec.to_string());
        }
        if top_actions.len() == TOP_ACTIONS {
            break;
        }
    }

    Insights {
        status_counts,
        severity_counts,
        open_findings: findings.len(),
        pass_rate,
        score_band: ScoreBand::for_score(report.scorecard.overall),
        top_actions,
    }
}

// ---------------------------------------------------------------------------
// Flows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct AuditArtifacts {
    pub report_json: PathBuf,
    pub report_markdown: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditFlow {
    pub report: AuditReport,
    pub insights: Insights,
    pub artifacts: AuditArtifacts,
}

/// Audit `project` and write the report into `output_dir`.
pub fn audit_into(project: &Path, output_dir: &Path) -> Result<AuditFlow> {
    let report = audit_project(project);
    let (report_json, report_markdown) = write_report_files(&report, output_dir)?;
    Ok(AuditFlow {
        insights: derive_insights(&report),
        report,
        artifacts: AuditArtifacts {
            report_json,
            report_markdown,
        },
    })
}

pub fn audit_flow(project: &Path) -> Result<AuditFlow> {
    let project = resolve_project(project)?;
    audit_into(&project, &ArtifactLayout::for_project(&project).dir)
}

#[derive(Debug, Clone, Serialize)]
pub struct RoadmapArtifacts {
    pub roadmap_markdown: PathBuf,
    pub report_json: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoadmapFlow {
    pub report: AuditReport,
    pub insights: Insights,
    pub roadmap_markdown: String,
    pub artifacts: RoadmapArtifacts,
}

pub fn roadmap_flow(project: &Path) -> Result<RoadmapFlow> {
    let audit = audit_flow(project)?;
    let layout = ArtifactLayout::for_project(Path::new(&audit.report.project_path));
    let path = layout.roadmap_md();
    let markdown = write_roadmap(&audit.report, &path)?;
    Ok(RoadmapFlow {
        report: audit.report,
        insights: audit.insights,
        roadmap_markdown: markdown,
        artifacts: RoadmapArtifacts {
            roadmap_markdown: path,
            report_json: audit.artifacts.report_json,
        },
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct CoachArtifacts {
    pub coach_markdown: PathBuf,
    pub report_json: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoachFlow {
    pub report: AuditReport,
    pub insights: Insights,
    pub coach_markdown: String,
    pub applied_files: Vec<PathBuf>,
    pub artifacts: CoachArtifacts,
}

pub fn coach_flow(project: &Path, apply_safe: bool) -> Result<CoachFlow> {
    let audit = audit_flow(project)?;
    let project = PathBuf::from(&audit.report.project_path);
    let path = ArtifactLayout::for_project(&project).coach_md();
    let outcome = write_coach(&audit.report, &path, &project, apply_safe)?;
    Ok(CoachFlow {
        report: audit.report,
        insights: audit.insights,
        coach_markdown: outcome.markdown,
        applied_files: outcome.applied,
        artifacts: CoachArtifacts {
            coach_markdown: outcome.path,
            report_json: audit.artifacts.report_json,
        },
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentPackArtifacts {
    pub agent_pack_markdown: PathBuf,
    pub agent_tasks_json: PathBuf,
    pub agent_runbook_markdown: PathBuf,
    pub agent_prompts_dir: PathBuf,
    pub report_json: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentPackFlow {
    pub report: AuditReport,
    pub insights: Insights,
    pub agent_pack_markdown: String,
    pub agent_tasks: Vec<AgentTask>,
    pub task_count: usize,
    pub artifacts: AgentPackArtifacts,
}

/// Default pack locations inside the artifact layout.
pub fn default_pack_paths(layout: &ArtifactLayout) -> AgentPackPaths {
    AgentPackPaths {
        markdown: layout.agent_pack_md(),
        json: layout.agent_tasks_json(),
        runbook: layout.agent_runbook_md(),
        prompts_dir: layout.prompts_dir(),
    }
}

pub fn agent_pack_flow(project: &Path) -> Result<AgentPackFlow> {
    let audit = audit_flow(project)?;
    let project = PathBuf::from(&audit.report.project_path);
    let paths = default_pack_paths(&ArtifactLayout::for_project(&project));
    let outcome = write_agent_pack(&audit.report, &project, &paths)?;
    Ok(AgentPackFlow {
        report: audit.report,
        insights: audit.insights,
        agent_pack_markdown: outcome.markdown,
        task_count: outcome.tasks.len(),
        agent_tasks: outcome.tasks,
        artifacts: AgentPackArtifacts {
            agent_pack_markdown: paths.markdown,
            agent_tasks_json: paths.json,
            agent_runbook_markdown: paths.runbook,
            agent_prompts_dir: paths.prompts_dir,
            report_json: audit.artifacts.report_json,
        },
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct ShipArtifacts {
    pub report_json: PathBuf,
    pub report_markdown: PathBuf,
    pub coach_markdown: PathBuf,
    pub agent_pack_markdown: PathBuf,
    pub agent_tasks_json: PathBuf,
    pub agent_runbook_markdown: PathBuf,
    pub agent_prompts_dir: PathBuf,
    pub roadmap_markdown: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShipFlow {
    pub before: AuditReport,
    pub before_insights: Insights,
    pub after: AuditReport,
    pub after_insights: Insights,
    pub improvement: f64,
    pub applied_files: Vec<PathBuf>,
    pub task_count: usize,
    pub agent_tasks: Vec<AgentTask>,
    pub remaining_findings: Vec<CheckResult>,
    pub agent_pack_markdown: String,
    pub coach_markdown: String,
    pub roadmap_markdown: String,
    pub artifacts: ShipArtifacts,
}

/// Change between two overall scores as persisted (two decimals each).
pub fn score_improvement(before: f64, after: f64) -> f64 {
    round2(round2(after) - round2(before))
}

/// Audit, pack, coach, roadmap, then re-audit to measure the change.
pub fn ship_flow(project: &Path, apply_safe: bool) -> Result<ShipFlow> {
    let before = audit_flow(project)?;
    let project = PathBuf::from(&before.report.project_path);
    let pack = agent_pack_flow(&project)?;
    let coach = coach_flow(&project, apply_safe)?;
    let roadmap = roadmap_flow(&project)?;
    let after = audit_flow(&project)?;

    let improvement = score_improvement(
        before.report.scorecard.overall,
        after.report.scorecard.overall,
    );
    tracing::info!(
        project = %project.display(),
        before = before.report.scorecard.overall,
        after = after.report.scorecard.overall,
        "ship sequence complete"
    );

    let remaining_findings = open_issues(&after.report).into_iter().cloned().collect();
    Ok(ShipFlow {
        artifacts: ShipArtifacts {
            report_json: after.artifacts.report_json,
            report_markdown: after.artifacts.report_markdown,
            coach_markdown: coach.artifacts.coach_markdown,
            agent_pack_markdown: pack.artifacts.agent_pack_markdown,
            agent_tasks_json: pack.artifacts.agent_tasks_json,
            agent_runbook_markdown: pack.artifacts.agent_runbook_markdown,
            agent_prompts_dir: pack.artifacts.agent_prompts_dir,
            roadmap_markdown: roadmap.artifacts.roadmap_markdown,
        },
        before: before.report,
        before_insights: before.insights,
        after: after.report,
        after_insights: after.insights,
        improvement,
        applied_files: coach.applied_files,
        task_count: pack.task_count,
        agent_tasks: pack.agent_tasks,
        remaining_findings,
        agent_pack_markdown: pack.agent_pack_markdown,
        coach_markdown: coach.coach_markdown,
        roadmap_markdown: roadmap.roadmap_markdown,
    })
}

// ---------------------------------------------------------------------------
// Artifact preview
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ArtifactPreview {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub line_count: usize,
    pub content: String,
}

/// Read a file inside `project` for preview. Relative paths resolve against
/// the project; symlinks are resolved before the containment check.
pub fn read_artifact(project: &Path, artifact_path: &str) -> Result<ArtifactPreview> {
    let root = resolve_project(project)?;
    let requested = expand_home(artifact_path);
    let joined = if requested.is_absolute() {
        requested
    } else {
        root.join(requested)
    };

    let resolved = match joined.canonicalize() {
        Ok(p) => p,
        Err(_) => {
            if !lexically_inside(&root, &joined) {
                return Err(SentinelError::ArtifactOutsideProject(artifact_path.to_string()));
            }
            return Err(SentinelError::ArtifactNotFound(joined));
        }
    };
    if !resolved.starts_with(&root) {
        return Err(SentinelError::ArtifactOutsideProject(artifact_path.to_string()));
    }
    if !resolved.is_file() {
        return Err(SentinelError::ArtifactNotFound(resolved));
    }

    let size = std::fs::metadata(&resolved)?.len();
    if size > MAX_ARTIFACT_BYTES {
        return Err(SentinelError::ArtifactTooLarge {
            path: resolved,
            size,
        });
    }
    let bytes = std::fs::read(&resolved)?;
    let content = String::from_utf8_lossy(&bytes).into_owned();
    Ok(ArtifactPreview {
        path: resolved,
        size_bytes: size,
        line_count: content.lines().count(),
        content,
    })
}

/// Containment check for a path that does not exist yet: `..` components
/// are folded without touching the filesystem.
fn lexically_inside(root: &Path, path: &Path) -> bool {
    use std::path::Component;
    let mut parts: Vec<Component<'_>> = Vec::new();
    for comp in path.components() {
        match comp {
            Component::ParentDir => {
                if parts.pop().is_none() {
                    return false;
                }
            }
            Component::CurDir => {}
            other => parts.push(other),
        }
    }
    parts.iter().collect::<PathBuf>().starts_with(root)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
