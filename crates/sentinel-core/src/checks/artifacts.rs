//! File-presence rules: tests, CI, license, demo script, submission
//! metadata, and differentiation artifacts.

use super::{CheckResult, CheckSpec};
use crate::context::AuditContext;
use crate::types::Severity;

const TEST_SUFFIXES: &[&str] = &["_test.py", ".test.ts", ".test.js", ".spec.ts", ".spec.js"];
const LICENSE_FILES: &[&str] = &["LICENSE", "LICENSE.md", "LICENSE.txt"];
const DEMO_SCRIPT_FILES: &[&str] = &[
    "DEMO_SCRIPT.md",
    "docs/DEMO_SCRIPT.md",
    ".vibe-sentinel/DEMO_SCRIPT.md",
];
const SUBMISSION_FILES: &[&str] = &["SUBMISSION.md", ".vibe-sentinel/SUBMISSION.md"];
const SUBMISSION_FIELDS: &[&str] = &["discord", "github profile", "github repo", "demo video"];
const NOVELTY_FILES: &[&str] = &[
    "UNIQUE_EDGE.md",
    "docs/ARCHITECTURE.md",
    "docs/DIFFERENTIATION.md",
];

/// Inclusive word-count window for a 3-5 minute script.
pub const DEMO_WORDS_MIN: usize = 300;
pub const DEMO_WORDS_MAX: usize = 900;

fn first_present<'a>(ctx: &AuditContext, candidates: &[&'a str]) -> Option<&'a str> {
    candidates.iter().copied().find(|c| ctx.exists(c))
}

pub(super) fn tests_present(ctx: &AuditContext, spec: &CheckSpec) -> CheckResult {
    let count = ctx
        .files
        .iter()
        .filter(|p| p.starts_with("tests/") || TEST_SUFFIXES.iter().any(|s| p.ends_with(s)))
        .count();
    if count > 0 {
        return spec.pass(format!("Detected {count} test file(s)."));
    }
    spec.fail(
        Severity::High,
        "No automated tests were detected.",
        "Add at least one smoke test and one behavior test before submission.",
    )
}

pub(super) fn ci_present(ctx: &AuditContext, spec: &CheckSpec) -> CheckResult {
    let has_workflow = ctx.files.iter().any(|p| {
        p.starts_with(".github/workflows/") && (p.ends_with(".yml") || p.ends_with(".yaml"))
    });
    if has_workflow {
        return spec.pass("Found CI workflow(s) in .github/workflows.");
    }
    spec.warn(
        Severity::Medium,
        "No CI workflow detected.",
        "Add a CI workflow that runs tests and basic linting on every push.",
    )
}

pub(super) fn license_present(ctx: &AuditContext, spec: &CheckSpec) -> CheckResult {
    if ctx.any_exists(LICENSE_FILES) {
        return spec.pass("Open-source license file detected.");
    }
    spec.fail(
        Severity::Medium,
        "No open-source license file detected.",
        "Add LICENSE (MIT/Apache-2.0/etc.) to clarify reuse permissions.",
    )
}

pub(super) fn demo_script(ctx: &AuditContext, spec: &CheckSpec) -> CheckResult {
    let Some(relative) = first_present(ctx, DEMO_SCRIPT_FILES) else {
        return spec.fail(
            Severity::Medium,
            "No demo script file detected.",
            "Add DEMO_SCRIPT.md that walks through the product in 3-5 minutes.",
        );
    };
    let words = ctx.read(relative).split_whitespace().count();
    if (DEMO_WORDS_MIN..=DEMO_WORDS_MAX).contains(&words) {
        return spec.pass(format!("Demo script found at {relative} ({words} words)."));
    }
    spec.warn(
        Severity::Low,
        format!("Demo script found at {relative} but length is {words} words."),
        "Aim for a 3-5 minute script (~300-900 words) with clear beats.",
    )
}

pub(super) fn submission_template(ctx: &AuditContext, spec: &CheckSpec) -> CheckResult {
    let Some(relative) = first_present(ctx, SUBMISSION_FILES) else {
        return spec.warn(
            Severity::Medium,
            "No submission metadata file detected.",
            "Create SUBMISSION.md with Discord handle, profile URL, repo URL, and demo URL.",
        );
    };
    let content = ctx.read(relative).to_lowercase();
    let missing: Vec<&str> = SUBMISSION_FIELDS
        .iter()
        .copied()
        .filter(|field| !content.contains(field))
        .collect();
    if missing.is_empty() {
        return spec.pass(format!("Submission metadata template detected at {relative}."));
    }
    spec.warn(
        Severity::Low,
        format!("{relative} is missing fields: {}.", missing.join(", ")),
        "Add all required fields used by the Vibeathon submission form.",
    )
}

pub(super) fn novelty_artifact(ctx: &AuditContext, spec: &CheckSpec) -> CheckResult {
    if ctx.any_exists(NOVELTY_FILES) {
        return spec.pass("Differentiation artifact file detected.");
    }
    if ctx.readme_lower().contains("## why this is different") {
        return spec.pass("README includes a dedicated differentiation section.");
    }
    spec.warn(
        Severity::Low,
        "No dedicated differentiation artifact found.",
        "Add UNIQUE_EDGE.md or a deep-dive architecture/differentiation document.",
    )
}
