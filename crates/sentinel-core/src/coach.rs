//! Beginner fix coach: plain-language action cards for each open issue and
//! optional creation of missing starter files.

use crate::checks::CheckResult;
use crate::error::Result;
use crate::io::{atomic_write, write_if_missing};
use crate::paths::{CI_WORKFLOW, README_MD, SMOKE_TEST};
use crate::report::AuditReport;
use crate::scaffold::scaffold;
use crate::triage::open_issues;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Playbook
// ---------------------------------------------------------------------------

pub struct Recipe {
    pub plain: &'static str,
    pub why: &'static str,
    pub steps: &'static [&'static str],
    pub verify: &'static str,
}

pub fn recipe_for(check_id: &str) -> Option<Recipe> {
    let recipe = match check_id {
        "problem_statement" => Recipe {
            plain: "Your README does not clearly explain the problem and target user.",
            why: "Judges and users decide quickly. If the pain is unclear, they bounce.",
            steps: &[
                "Add a `## Problem` section in README with one concrete pain point.",
                "Add a `## Target User` section and name one primary audience.",
                "Keep it under 8 lines so it is skimmable.",
            ],
            verify: "Re-run `vibe-sentinel audit .` and confirm Problem Statement is PASS.",
        },
        "quickstart" => Recipe {
            plain: "A new user cannot install and run your project quickly.",
            why: "Fast onboarding increases usefulness and reduces demo friction.",
            steps: &[
                "Add `## Installation` and `## Quickstart` sections.",
                "Include copy-paste commands from a clean environment.",
                "Limit quickstart to 3 commands max.",
            ],
            verify: "Follow the quickstart in a clean shell and verify it works end-to-end.",
        },
        "usage_examples" => Recipe {
            plain: "The README does not show practical input/output examples.",
            why: "Examples convert readers into users by making value obvious.",
            steps: &[
                "Add one real usage example with command and expected output.",
                "Use fenced code blocks for readability.",
                "Prefer a realistic scenario over synthetic text.",
            ],
            verify: "Confirm `Usage Examples` becomes PASS after re-audit.",
        },
        "tests_present" => Recipe {
            plain: "No automated tests were detected.",
            why: "Without tests, regressions show up during demos or judging.",
            steps: &[
                "Create `tests/test_smoke.py` with at least one passing smoke test.",
                "Add one behavior test for your core value path.",
                "Run tests locally before every commit.",
            ],
            verify: "Run your test command and ensure it exits with code 0.",
        },
        "ci_present" => Recipe {
            plain: "No CI workflow was found.",
            why: "CI proves your project runs outside your machine.",
            steps: &[
                "Add `.github/workflows/ci.yml`.",
                "Run install + tests in the workflow.",
                "Enable branch checks if using pull requests.",
            ],
            verify: "Push a branch and confirm the CI job succeeds.",
        },
        "dependency_lock" => Recipe {
            plain: "Dependencies are not fully reproducible.",
            why: "Unpinned dependencies can break demos unexpectedly.",
            steps: &[
                "Add a lockfile for your package manager when possible.",
                "If using requirements.txt, pin versions exactly.",
                "Document Python/Node runtime versions in README.",
            ],
            verify: "Fresh clone + install should produce identical behavior.",
        },
        "demo_script" => Recipe {
            plain: "Demo script is missing or not in a clear 3-5 minute structure.",
            why: "Strong demos raise execution scores and improve story clarity.",
            steps: &[
                "Use `DEMO_SCRIPT.md` with hook, workflow, and close.",
                "Keep script around 300-900 words.",
                "Include measurable outcome in the last 30 seconds.",
            ],
            verify: "Time your dry run and keep it between 3 and 5 minutes.",
        },
        "secret_scan" => Recipe {
            plain: "Potential secret leakage was detected.",
            why: "Leaked keys can cause account compromise and instant trust loss.",
            steps: &[
                "Remove hard-coded secrets from source files.",
                "Move secrets to environment variables and `.env.example`.",
                "Rotate any exposed credentials immediately.",
            ],
            verify: "Re-run audit and confirm Secret Leak Scan is PASS.",
        },
        "license_present" => Recipe {
            plain: "No open-source license was detected.",
            why: "Without a license, others cannot safely reuse your project.",
            steps: &[
                "Add `LICENSE` (MIT is common for hackathon projects).",
                "Mention the license in README.",
            ],
            verify: "Confirm `LICENSE` exists at repo root.",
        },
        "submission_template" => Recipe {
            plain: "Submission metadata is missing or incomplete.",
            why: "Missing form details can delay or invalidate submission.",
            steps: &[
                "Fill Discord username, profile URL, repo URL, and demo URL.",
                "Keep this in `SUBMISSION.md` for final copy/paste.",
            ],
            verify: "Open `SUBMISSION.md` and confirm all required fields are filled.",
        },
        "innovation_statement" => Recipe {
            plain: "Your differentiation story is not explicit enough.",
            why: "Innovation score depends on clear, specific uniqueness.",
            steps: &[
                "Add `## Why this is different` in README.",
                "Name two alternatives and your concrete edge.",
                "Tie edge to measurable user outcome.",
            ],
            verify: "Ask a new reader to explain your edge in one sentence.",
        },
        "novelty_artifact" => Recipe {
            plain: "No dedicated differentiation artifact was found.",
            why: "A dedicated artifact gives judges proof of thought depth.",
            steps: &[
                "Create `UNIQUE_EDGE.md` with alternatives, differences, and value.",
                "Reference it from README.",
            ],
            verify: "Ensure `UNIQUE_EDGE.md` is committed and linked.",
        },
        _ => return None,
    };
    Some(recipe)
}

// ---------------------------------------------------------------------------
// Starter files
// ---------------------------------------------------------------------------

const STARTER_README: &str = "# Your Project Name

## Problem
Describe one painful workflow your user has today.

## Target User
Name who this is for.

## Installation
```bash
# add install commands
```

## Quickstart
```bash
# add minimal run commands
```

## Usage Example
```bash
# add one realistic example
```

## Why this is different
Explain your non-obvious edge.
";

const STARTER_TEST: &str = "def test_smoke() -> None:
    assert True
";

const STARTER_CI: &str = "name: CI

on:
  push:
  pull_request:

jobs:
  test:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - uses: actions/setup-python@v5
        with:
          python-version: '3.11'
      - run: |
          python -m pip install --upgrade pip
          pip install -e .
          python -m unittest discover -s tests -p 'test_*.py'
";

const SCAFFOLD_TRIGGERS: &[&str] = &["submission_template", "demo_script", "novelty_artifact"];
const README_TRIGGERS: &[&str] = &["problem_statement", "quickstart", "usage_examples"];

/// Create missing starter files for the open issues. Never overwrites; only
/// files actually created are returned.
pub fn apply_safe_starters(project: &Path, issues: &[&CheckResult]) -> Result<Vec<PathBuf>> {
    let open: BTreeSet<&str> = issues.iter().map(|c| c.check_id.as_str()).collect();
    let any_open = |ids: &[&str]| ids.iter().any(|id| open.contains(id));
    let mut written = Vec::new();

    if any_open(SCAFFOLD_TRIGGERS) {
        written.extend(scaffold(project, false)?);
    }

    let mut starters: Vec<(&str, &str)> = Vec::new();
    if open.contains("tests_present") {
        starters.push((SMOKE_TEST, STARTER_TEST));
    }
    if open.contains("ci_present") {
        starters.push((CI_WORKFLOW, STARTER_CI));
    }
    if any_open(README_TRIGGERS) {
        starters.push((README_MD, STARTER_README));
    }

    for (relative, body) in starters {
        let path = project.join(relative);
        if write_if_missing(&path, body.as_bytes())? {
            tracing::info!(path = %path.display(), "created starter file");
            written.push(path);
        }
    }
    Ok(written)
}

// ---------------------------------------------------------------------------
// Markdown
// ---------------------------------------------------------------------------

const FALLBACK_WHY: &str = "This issue blocks confidence and submission quality.";
const FALLBACK_VERIFY: &str = "Re-run `vibe-sentinel audit .` and confirm this check passes.";
const RECHECK_COMMAND: &str = "vibe-sentinel audit . --output-dir .vibe-sentinel && vibe-sentinel roadmap --report .vibe-sentinel/report.json --output .vibe-sentinel/roadmap.md";

fn action_card(out: &mut String, idx: usize, issue: &CheckResult) {
    let fallback_steps = [issue.recommendation.as_str()];
    let (plain, why, steps, verify): (&str, &str, &[&str], &str) = match recipe_for(&issue.check_id)
    {
        Some(r) => (r.plain, r.why, r.steps, r.verify),
        None => (
            issue.recommendation.as_str(),
            FALLBACK_WHY,
            &fallback_steps[..],
            FALLBACK_VERIFY,
        ),
    };

    out.push_str(&format!(
        "## {idx}. {} ({})\n\n",
        issue.title,
        issue.severity.label()
    ));
    out.push_str(&format!("**Plain English:** {plain}\n\n"));
    out.push_str(&format!("**Why it matters:** {why}\n\n"));
    out.push_str("**Do this now:**\n");
    for (n, step) in steps.iter().enumerate() {
        out.push_str(&format!("{}. {step}\n", n + 1));
    }
    out.push_str(&format!("\n**Verify:** {verify}\n\n"));
}

pub fn coach_markdown(
    report: &AuditReport,
    issues: &[&CheckResult],
    applied: &[PathBuf],
) -> String {
    let mut out = String::from("# Vibe Sentinel Beginner Fix Coach\n\n");
    out.push_str(
        "This guide translates audit findings into plain-English actions you can execute immediately.\n\n",
    );
    out.push_str(&format!(
        "Current projected score: **{:.1}/100**\n\n",
        report.scorecard.overall
    ));
    out.push_str("## Fast Path\n\n");
    out.push_str("1. Fix all HIGH findings first.\n");
    out.push_str("2. Re-run `vibe-sentinel audit . --output-dir .vibe-sentinel`.\n");
    out.push_str("3. Repeat until no FAIL checks remain.\n\n");

    if issues.is_empty() {
        out.push_str("No warnings or failures found. Keep running audits after major changes.\n");
    } else {
        out.push_str("## Action Cards\n\n");
        for (idx, issue) in issues.iter().enumerate() {
            action_card(&mut out, idx + 1, issue);
        }
    }

    if !applied.is_empty() {
        out.push_str("## Safe Starter Files Applied\n\n");
        out.push_str("The following files were created because they were missing:\n\n");
        for path in applied {
            out.push_str(&format!("- `{}`\n", path.display()));
        }
        out.push('\n');
    }

    out.push_str("## One-Command Recheck\n\n```bash\n");
    out.push_str(RECHECK_COMMAND);
    out.push_str("\n```\n");
    out
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct CoachOutcome {
    pub path: PathBuf,
    pub markdown: String,
    pub applied: Vec<PathBuf>,
}

pub fn write_coach(
    report: &AuditReport,
    output: &Path,
    project: &Path,
    apply_safe: bool,
) -> Result<CoachOutcome> {
    let issues = open_issues(report);
    let applied = if apply_safe {
        apply_safe_starters(project, &issues)?
    } else {
        Vec::new()
    };

    let markdown = coach_markdown(report, &issues, &applied);
    atomic_write(output, markdown.as_bytes())?;
    tracing::info!(path = %output.display(), applied = applied.len(), "wrote coach");
    Ok(CoachOutcome {
        path: output.to_path_buf(),
        markdown,
        applied,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{default_checks, run_checks};
    use crate::context::build_context;
    use crate::report::build_audit_report;
    use crate::report::tests::report_with;
    use crate::score::compute_scorecard;
    use crate::types::Severity;
    use tempfile::TempDir;

    fn audit_report(project: &Path) -> AuditReport {
        let checks = run_checks(&build_context(project));
        let card = compute_scorecard(&checks);
        build_audit_report(project, checks, card)
    }

    #[test]
    fn every_check_has_a_recipe() {
        for check in default_checks() {
            assert!(recipe_for(check.spec.id).is_some(), "{}", check.spec.id);
        }
        assert!(recipe_for("unknown").is_none());
    }

    #[test]
    fn unknown_check_falls_back_to_recommendation() {
        let mut result = default_checks()[0].spec.fail(Severity::Low, "d", "Do the thing.");
        result.check_id = "custom_rule".to_string();
        let report = report_with(vec![result]);
        let issues = open_issues(&report);
        let md = coach_markdown(&report, &issues, &[]);
        assert!(md.contains("**Plain English:** Do the thing."));
        assert!(md.contains("1. Do the thing.\n"));
        assert!(md.contains(FALLBACK_WHY));
    }

    #[test]
    fn apply_safe_on_empty_project_creates_starters() {
        let dir = TempDir::new().unwrap();
        let report = audit_report(dir.path());
        let out = dir.path().join(".vibe-sentinel/coach.md");

        let outcome = write_coach(&report, &out, dir.path(), true).unwrap();
        let names: Vec<_> = outcome
            .applied
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(
            names,
            vec![
                "SPEC.md",
                "DEMO_SCRIPT.md",
                "SUBMISSION.md",
                "UNIQUE_EDGE.md",
                "tests/test_smoke.py",
                ".github/workflows/ci.yml",
                "README.md",
            ]
        );
        assert!(outcome.markdown.contains("## Safe Starter Files Applied"));
        assert!(out.is_file());
    }

    #[test]
    fn apply_safe_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join(".vibe-sentinel/coach.md");

        let first = write_coach(&audit_report(dir.path()), &out, dir.path(), true).unwrap();
        assert!(!first.applied.is_empty());

        let second = write_coach(&audit_report(dir.path()), &out, dir.path(), true).unwrap();
        assert!(second.applied.is_empty());
        assert!(!second.markdown.contains("## Safe Starter Files Applied"));
    }

    #[test]
    fn existing_readme_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("README.md"), "# Mine\n").unwrap();
        let report = audit_report(dir.path());
        let out = dir.path().join("coach.md");

        let outcome = write_coach(&report, &out, dir.path(), true).unwrap();
        assert!(!outcome.applied.iter().any(|p| p.ends_with("README.md")));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("README.md")).unwrap(),
            "# Mine\n"
        );
    }

    #[test]
    fn without_apply_safe_nothing_is_created() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("coach.md");
        let outcome = write_coach(&audit_report(dir.path()), &out, dir.path(), false).unwrap();
        assert!(outcome.applied.is_empty());
        assert!(!dir.path().join("README.md").exists());
        assert!(outcome.markdown.contains("## Action Cards"));
    }

    #[test]
    fn cards_follow_triage_order() {
        let specs: Vec<_> = default_checks().iter().map(|c| c.spec).collect();
        let report = report_with(vec![
            specs[8].fail(Severity::Medium, "d", "r"),
            specs[3].fail(Severity::High, "d", "r"),
        ]);
        let md = coach_markdown(&report, &open_issues(&report), &[]);
        assert!(md.contains("## 1. Automated Tests (HIGH)"));
        assert!(md.contains("## 2. Open-Source License (MEDIUM)"));
    }
}
