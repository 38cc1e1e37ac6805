//! Agent sprint pack: one self-contained task per open issue, with prompt
//! files, a runbook and a JSON task list for external coding agents.

use crate::checks::CheckResult;
use crate::error::Result;
use crate::io::{atomic_write, ensure_dir};
use crate::paths::CI_WORKFLOW;
use crate::report::AuditReport;
use crate::triage::open_issues;
use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const UNITTEST_COMMAND: &str = "python -m unittest discover -s tests -p 'test_*.py'";
const AUDIT_COMMAND: &str = "vibe-sentinel audit . --output-dir .vibe-sentinel";
const ROADMAP_COMMAND: &str =
    "vibe-sentinel roadmap --report .vibe-sentinel/report.json --output .vibe-sentinel/roadmap.md";
const COMMIT_COMMAND: &str = "git add -A && git commit -m 'Apply agent task fixes'  # optional";
const NO_TASKS_PROMPT: &str =
    "Audit has no open findings. Validate tests and docs still pass, then prepare demo artifacts.";

// ---------------------------------------------------------------------------
// Task playbook
// ---------------------------------------------------------------------------

struct TaskPlaybook {
    files: &'static [&'static str],
    outcome: &'static str,
    checks: &'static [&'static str],
}

fn playbook_for(check_id: &str) -> Option<TaskPlaybook> {
    let (files, outcome, checks): (&'static [&'static str], &'static str, &'static [&'static str]) =
        match check_id {
            "problem_statement" => (
                &["README.md"],
                "README has a clear Problem and Target User section.",
                &["Re-run vibe-sentinel audit and ensure Problem Statement is PASS."],
            ),
            "quickstart" => (
                &["README.md"],
                "README has copy-paste install and quickstart commands.",
                &["A clean shell can run quickstart in under 2 minutes."],
            ),
            "usage_examples" => (
                &["README.md"],
                "README has a realistic usage example with expected output.",
                &["Usage Examples check returns PASS."],
            ),
            "tests_present" => (
                &["tests/", "src/"],
                "At least one smoke test and one behavior test exist.",
                &["python -m unittest discover -s tests -p 'test_*.py' exits 0."],
            ),
            "ci_present" => (
                &[".github/workflows/ci.yml"],
                "CI runs install + tests on push and PR.",
                &["Push branch and confirm CI succeeds."],
            ),
            "dependency_lock" => (
                &["requirements.txt", "pyproject.toml", "lockfile"],
                "Dependencies are reproducible via lockfile or pinned versions.",
                &["Fresh clone install reproduces same behavior."],
            ),
            "demo_script" => (
                &["DEMO_SCRIPT.md"],
                "Demo script covers hook, workflow, reliability, and close in 3-5 minutes.",
                &["Script length roughly 300-900 words."],
            ),
            "secret_scan" => (
                &["source files", ".env.example", "config files"],
                "Hard-coded secrets removed and moved to environment variables.",
                &["Secret Leak Scan returns PASS."],
            ),
            "license_present" => (
                &["LICENSE", "README.md"],
                "Open-source license exists and is referenced in README.",
                &["LICENSE exists at repo root."],
            ),
            "submission_template" => (
                &["SUBMISSION.md"],
                "Submission metadata file includes all required links and handles.",
                &["SUBMISSION.md contains Discord, GitHub profile, repo, and demo URL."],
            ),
            "innovation_statement" => (
                &["README.md"],
                "README clearly explains why this project is different.",
                &["Innovation Positioning returns PASS."],
            ),
            "novelty_artifact" => (
                &["UNIQUE_EDGE.md"],
                "Dedicated differentiation artifact exists and is linked.",
                &["Differentiation Artifact returns PASS."],
            ),
            _ => return None,
        };
    Some(TaskPlaybook {
        files,
        outcome,
        checks,
    })
}

// ---------------------------------------------------------------------------
// AgentTask
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentTask {
    pub task_id: String,
    pub check_id: String,
    pub title: String,
    pub severity: Severity,
    pub estimated_minutes: u32,
    pub objective: String,
    pub files_to_touch: Vec<String>,
    pub recommendation: String,
    pub verification_checks: Vec<String>,
    pub agent_prompt: String,
    pub verification_commands: Vec<String>,
    /// Empty until the prompt file has been written.
    pub prompt_file: String,
}

fn verification_commands(project: &Path) -> Vec<String> {
    let mut commands = vec![UNITTEST_COMMAND.to_string(), AUDIT_COMMAND.to_string()];
    if project.join(CI_WORKFLOW).exists() {
        commands.push(COMMIT_COMMAND.to_string());
    }
    commands
}

fn agent_prompt(issue: &CheckResult, objective: &str, files: &[String]) -> String {
    format!(
        "You are fixing a repository quality finding.\n\
         Task: {}\n\
         Severity: {}\n\
         Context: {}\n\
         Goal: {objective}\n\
         Files to touch (preferred): {}\n\
         Constraints: make minimal, safe edits; do not break existing behavior; keep style consistent.\n\
         After editing, run verification commands and summarize exactly what changed.",
        issue.title,
        issue.severity.label(),
        issue.detail.trim(),
        files.join(", "),
    )
}

fn task_card(issue: &CheckResult, number: usize, commands: &[String]) -> AgentTask {
    let to_owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    let (files, objective, checks) = match playbook_for(&issue.check_id) {
        Some(p) => (to_owned(p.files), p.outcome.to_string(), to_owned(p.checks)),
        None => (
            vec!["project files".to_string()],
            issue.recommendation.clone(),
            vec!["Re-run vibe-sentinel audit and confirm this check passes.".to_string()],
        ),
    };

    AgentTask {
        task_id: format!("agent-task-{number:02}"),
        check_id: issue.check_id.clone(),
        title: issue.title.clone(),
        severity: issue.severity,
        estimated_minutes: issue.severity.estimated_minutes(),
        agent_prompt: agent_prompt(issue, &objective, &files),
        objective,
        files_to_touch: files,
        recommendation: issue.recommendation.clone(),
        verification_checks: checks,
        verification_commands: commands.to_vec(),
        prompt_file: String::new(),
    }
}

/// One task per open issue, numbered from 1 in triage order.
pub fn build_agent_tasks(report: &AuditReport, project: &Path) -> Vec<AgentTask> {
    let commands = verification_commands(project);
    open_issues(report)
        .into_iter()
        .enumerate()
        .map(|(i, issue)| task_card(issue, i + 1, &commands))
        .collect()
}

// ---------------------------------------------------------------------------
// Prompt files
// ---------------------------------------------------------------------------

/// Lower-case slug with every non-alphanumeric run collapsed to `-`.
pub fn safe_slug(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let trimmed = slug.trim_matches('-');
    if trimmed.is_empty() {
        "task".to_string()
    } else {
        trimmed.to_string()
    }
}

fn prompt_file_body(task: &AgentTask, project: &Path) -> String {
    let mut body = format!(
        "Repository: {}\nTask ID: {}\n\n{}\n\nVerification commands:\n",
        project.display(),
        task.task_id,
        task.agent_prompt
    );
    for command in &task.verification_commands {
        body.push_str(&format!("- {command}\n"));
    }
    body
}

/// Write `<task_id>-<slug>.txt` for each task and record its path.
pub fn write_prompt_files(
    tasks: &mut [AgentTask],
    prompts_dir: &Path,
    project: &Path,
) -> Result<()> {
    ensure_dir(prompts_dir)?;
    for task in tasks.iter_mut() {
        let path = prompts_dir.join(format!("{}-{}.txt", task.task_id, safe_slug(&task.title)));
        atomic_write(&path, prompt_file_body(task, project).as_bytes())?;
        task.prompt_file = path.display().to_string();
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

pub fn master_prompt(tasks: &[AgentTask], project: &Path) -> String {
    if tasks.is_empty() {
        return NO_TASKS_PROMPT.to_string();
    }
    let mut lines = vec![
        "You are an autonomous coding agent improving this repository.".to_string(),
        format!("Repository path: {}", project.display()),
        "Execute tasks in order, commit-safe and minimal changes only.".to_string(),
        "For each task: edit files, run verification commands, then report changed files and outcomes."
            .to_string(),
        "Do not skip verification.".to_string(),
        String::new(),
        "Task queue:".to_string(),
    ];
    for task in tasks {
        lines.push(format!(
            "- {} [{}] {}: {}",
            task.task_id,
            task.severity.label(),
            task.title,
            task.objective
        ));
    }
    lines.push(String::new());
    lines.push(format!("At the end, run: {AUDIT_COMMAND}"));
    lines.join("\n")
}

pub fn runbook_markdown(tasks: &[AgentTask], project: &Path) -> String {
    let mut out = String::from("# Agent Runbook\n\n");
    out.push_str(&format!("Project path: `{}`\n\n", project.display()));
    out.push_str(
        "Use this runbook to execute Agent Sprint Pack tasks in strict priority order.\n\n",
    );
    out.push_str("## Execution Protocol\n\n");
    out.push_str("1. Start with all HIGH severity tasks.\n");
    out.push_str("2. For each task, paste its prompt file into your coding agent.\n");
    out.push_str("3. After each task, run verification commands and save output.\n");
    out.push_str("4. Re-run `vibe-sentinel audit` after each 2 tasks.\n\n");
    out.push_str("## Task Queue\n\n");

    if tasks.is_empty() {
        out.push_str("No open tasks. Keep this runbook for maintenance cycles.\n");
    }
    for task in tasks {
        out.push_str(&format!(
            "- [ ] {} [{}] {} ({} min)\n",
            task.task_id,
            task.severity.label(),
            task.title,
            task.estimated_minutes
        ));
        out.push_str(&format!("  Prompt file: `{}`\n", task.prompt_file));
    }

    out.push_str("\n## Final Verification\n\n```bash\n");
    out.push_str(&format!("{UNITTEST_COMMAND}\n{AUDIT_COMMAND}\n{ROADMAP_COMMAND}\n"));
    out.push_str("```\n");
    out
}

pub fn pack_markdown(
    report: &AuditReport,
    tasks: &[AgentTask],
    project: &Path,
    runbook_path: &Path,
) -> String {
    let mut out = String::from("# Agent Sprint Pack\n\n");
    out.push_str(
        "This pack converts audit findings into a task queue that coding agents can execute immediately.\n\n",
    );
    out.push_str(&format!("- Project: `{}`\n", project.display()));
    out.push_str(&format!(
        "- Current projected score: **{:.1}/100**\n",
        report.scorecard.overall
    ));
    out.push_str(&format!("- Open agent tasks: **{}**\n", tasks.len()));
    out.push_str(&format!("- Runbook: `{}`\n\n", runbook_path.display()));
    out.push_str("## Master Prompt (Copy/Paste)\n\n```text\n");
    out.push_str(&master_prompt(tasks, project));
    out.push_str("\n```\n\n");

    if tasks.is_empty() {
        out.push_str(
            "No open findings. Use this pack as a maintenance checklist after major changes.\n",
        );
        return out;
    }

    out.push_str("## Task Cards\n\n");
    for task in tasks {
        out.push_str(&format!(
            "### {} - {} ({})\n\n",
            task.task_id,
            task.title,
            task.severity.label()
        ));
        out.push_str(&format!("- Objective: {}\n", task.objective));
        out.push_str(&format!("- Estimated effort: {} min\n", task.estimated_minutes));
        out.push_str(&format!("- Files to touch: {}\n", task.files_to_touch.join(", ")));
        out.push_str(&format!("- Prompt file: `{}`\n\n", task.prompt_file));
        out.push_str("Verification checks:\n");
        for check in &task.verification_checks {
            out.push_str(&format!("- {check}\n"));
        }
        out.push_str("\nAgent prompt:\n```text\n");
        out.push_str(&task.agent_prompt);
        out.push_str("\n```\n\n");
    }

    out.push_str("## Finish Line\n\n```bash\n");
    out.push_str(&format!("{AUDIT_COMMAND}\n{ROADMAP_COMMAND}\n"));
    out.push_str("```\n");
    out
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Output locations for one pack.
#[derive(Debug, Clone, Serialize)]
pub struct AgentPackPaths {
    pub markdown: PathBuf,
    pub json: PathBuf,
    pub runbook: PathBuf,
    pub prompts_dir: PathBuf,
}

#[derive(Debug, Serialize)]
struct TaskList<'a> {
    project: String,
    tasks: &'a [AgentTask],
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentPackOutcome {
    pub paths: AgentPackPaths,
    pub tasks: Vec<AgentTask>,
    pub markdown: String,
    pub runbook: String,
}

pub fn write_agent_pack(
    report: &AuditReport,
    project: &Path,
    paths: &AgentPackPaths,
) -> Result<AgentPackOutcome> {
    let mut tasks = build_agent_tasks(report, project);
    write_prompt_files(&mut tasks, &paths.prompts_dir, project)?;

    let runbook = runbook_markdown(&tasks, project);
    let markdown = pack_markdown(report, &tasks, project, &paths.runbook);
    let list = TaskList {
        project: project.display().to_string(),
        tasks: &tasks,
    };
    let mut json = serde_json::to_string_pretty(&list)?;
    json.push('\n');

    atomic_write(&paths.markdown, markdown.as_bytes())?;
    atomic_write(&paths.json, json.as_bytes())?;
    atomic_write(&paths.runbook, runbook.as_bytes())?;
    tracing::info!(
        path = %paths.markdown.display(),
        tasks = tasks.len(),
        "wrote agent pack"
    );

    Ok(AgentPackOutcome {
        paths: paths.clone(),
        tasks,
        markdown,
        runbook,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{default_checks, CheckSpec};
    use crate::report::tests::report_with;
    use tempfile::TempDir;

    fn spec(id: &str) -> CheckSpec {
        default_checks()
            .into_iter()
            .find(|c| c.spec.id == id)
            .unwrap()
            .spec
    }

    fn pack_paths(root: &Path) -> AgentPackPaths {
        let out = root.join(".vibe-sentinel");
        AgentPackPaths {
            markdown: out.join("agent_pack.md"),
            json: out.join("agent_tasks.json"),
            runbook: out.join("agent_runbook.md"),
            prompts_dir: out.join("prompts"),
        }
    }

    #[test]
    fn slugs() {
        assert_eq!(safe_slug("3-5 Minute Demo Script"), "3-5-minute-demo-script");
        assert_eq!(safe_slug("  Secret / Leak!! "), "secret-leak");
        assert_eq!(safe_slug("***"), "task");
        assert_eq!(safe_slug(""), "task");
    }

    #[test]
    fn one_high_issue_pack() {
        let dir = TempDir::new().unwrap();
        let report = report_with(vec![
            spec("tests_present").fail(
                Severity::High,
                "No automated tests were detected.",
                "Add tests.",
            ),
            spec("license_present").pass("ok"),
        ]);

        let outcome = write_agent_pack(&report, dir.path(), &pack_paths(dir.path())).unwrap();
        assert_eq!(outcome.tasks.len(), 1);
        let task = &outcome.tasks[0];
        assert_eq!(task.task_id, "agent-task-01");
        assert_eq!(task.estimated_minutes, 30);
        assert_eq!(task.files_to_touch, vec!["tests/", "src/"]);
        assert!(task.prompt_file.ends_with("agent-task-01-automated-tests.txt"));
        assert!(Path::new(&task.prompt_file).is_file());
        assert!(task.agent_prompt.contains("Severity: HIGH"));
        assert!(task.agent_prompt.contains("Context: No automated tests were detected."));
        assert_eq!(task.verification_commands.len(), 2);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&outcome.paths.json).unwrap()).unwrap();
        assert_eq!(json["tasks"][0]["severity"], "high");
        assert_eq!(json["tasks"][0]["check_id"], "tests_present");
        assert!(outcome.runbook.contains("- [ ] agent-task-01 [HIGH] Automated Tests (30 min)"));
        assert!(outcome.markdown.contains("### agent-task-01 - Automated Tests (HIGH)"));
    }

    #[test]
    fn ci_workflow_adds_commit_command() {
        let dir = TempDir::new().unwrap();
        let ci = dir.path().join(CI_WORKFLOW);
        std::fs::create_dir_all(ci.parent().unwrap()).unwrap();
        std::fs::write(&ci, "name: ci\n").unwrap();

        let report = report_with(vec![spec("license_present").fail(Severity::Medium, "d", "r")]);
        let tasks = build_agent_tasks(&report, dir.path());
        assert_eq!(tasks[0].verification_commands.last().unwrap(), COMMIT_COMMAND);
    }

    #[test]
    fn tasks_follow_triage_order() {
        let dir = TempDir::new().unwrap();
        let report = report_with(vec![
            spec("novelty_artifact").warn(Severity::Low, "d", "r"),
            spec("quickstart").warn(Severity::Medium, "d", "r"),
            spec("secret_scan").fail(Severity::High, "d", "r"),
        ]);
        let ids: Vec<_> = build_agent_tasks(&report, dir.path())
            .into_iter()
            .map(|t| (t.task_id, t.check_id))
            .collect();
        assert_eq!(
            ids,
            vec![
                ("agent-task-01".to_string(), "secret_scan".to_string()),
                ("agent-task-02".to_string(), "quickstart".to_string()),
                ("agent-task-03".to_string(), "novelty_artifact".to_string()),
            ]
        );
    }

    #[test]
    fn unknown_check_uses_fallback_playbook() {
        let dir = TempDir::new().unwrap();
        let mut issue = spec("quickstart").warn(Severity::Low, "d", "Fix it.");
        issue.check_id = "custom".to_string();
        let tasks = build_agent_tasks(&report_with(vec![issue]), dir.path());
        assert_eq!(tasks[0].objective, "Fix it.");
        assert_eq!(tasks[0].files_to_touch, vec!["project files"]);
    }

    #[test]
    fn empty_pack_uses_maintenance_prompt() {
        let dir = TempDir::new().unwrap();
        let report = report_with(vec![spec("quickstart").pass("ok")]);
        let outcome = write_agent_pack(&report, dir.path(), &pack_paths(dir.path())).unwrap();
        assert!(outcome.tasks.is_empty());
        assert!(outcome.markdown.contains(NO_TASKS_PROMPT));
        assert!(outcome.runbook.contains("No open tasks."));
    }
}
