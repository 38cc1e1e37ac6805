//! README keyword rules. Once a README exists these never fail; a missing
//! keyword is only a warning.

use super::{CheckResult, CheckSpec};
use crate::context::AuditContext;
use crate::types::Severity;

const PROBLEM_KEYWORDS: &[&str] = &[
    "problem",
    "pain",
    "challenge",
    "target user",
    "who this is for",
];
const INSTALL_KEYWORDS: &[&str] = &["install", "setup"];
const RUN_KEYWORDS: &[&str] = &["usage", "quickstart", "getting started"];
const EXAMPLE_KEYWORDS: &[&str] = &["example", "usage"];
const INNOVATION_KEYWORDS: &[&str] = &["unique", "different", "innovation", "novel", "not another"];

fn mentions_any(lowered: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| lowered.contains(k))
}

pub(super) fn problem_statement(ctx: &AuditContext, spec: &CheckSpec) -> CheckResult {
    if !ctx.has_readme() {
        return spec.fail(
            Severity::High,
            "README.md is missing.",
            "Create README.md with a clear problem statement and target user.",
        );
    }
    if mentions_any(&ctx.readme_lower(), PROBLEM_KEYWORDS) {
        return spec.pass("Problem framing detected in README.md.");
    }
    spec.warn(
        Severity::Medium,
        "README.md exists but does not clearly state the problem or target user.",
        "Add a concise 'Problem' section explaining pain points and intended users.",
    )
}

pub(super) fn quickstart(ctx: &AuditContext, spec: &CheckSpec) -> CheckResult {
    if !ctx.has_readme() {
        return spec.fail(
            Severity::High,
            "Cannot find quickstart content because README.md is missing.",
            "Add README.md with installation and first-run steps.",
        );
    }
    let lowered = ctx.readme_lower();
    if mentions_any(&lowered, INSTALL_KEYWORDS) && mentions_any(&lowered, RUN_KEYWORDS) {
        return spec.pass("Installation and run instructions were detected in README.md.");
    }
    spec.warn(
        Severity::Medium,
        "README.md lacks full quickstart guidance (install + run).",
        "Add a copy-paste quickstart block that installs and runs the project in under 2 minutes.",
    )
}

pub(super) fn usage_examples(ctx: &AuditContext, spec: &CheckSpec) -> CheckResult {
    if !ctx.has_readme() {
        return spec.fail(
            Severity::High,
            "README.md is missing, so usage examples cannot be verified.",
            "Add at least one command example and expected output in README.md.",
        );
    }
    let has_label = mentions_any(&ctx.readme_lower(), EXAMPLE_KEYWORDS);
    let has_code_block = ctx.readme_text.contains("```");
    if has_label && has_code_block {
        return spec.pass("README.md includes usage examples with code blocks.");
    }
    spec.warn(
        Severity::Medium,
        "Usage examples are weak or missing in README.md.",
        "Add a minimal input/output example that new users can immediately test.",
    )
}

pub(super) fn innovation_statement(ctx: &AuditContext, spec: &CheckSpec) -> CheckResult {
    if !ctx.has_readme() {
        return spec.fail(
            Severity::Medium,
            "README.md missing, so innovation positioning cannot be evaluated.",
            "Add README section explaining what makes this project different.",
        );
    }
    if mentions_any(&ctx.readme_lower(), INNOVATION_KEYWORDS) {
        return spec.pass("Differentiation language detected in README.md.");
    }
    spec.warn(
        Severity::Medium,
        "README.md does not clearly explain how this differs from alternatives.",
        "Add a short section: 'Why this is different from other vibe tools'.",
    )
}

#[cfg(test)]
mod tests {
    use crate::checks::tests::{audit, result_for, touch};
    use crate::types::{Severity, Status};
    use tempfile::TempDir;

    #[test]
    fn missing_readme_fails_every_text_rule() {
        let dir = TempDir::new().unwrap();
        let results = audit(&dir);
        for id in ["problem_statement", "quickstart", "usage_examples"] {
            let r = result_for(&results, id);
            assert_eq!((r.status, r.severity), (Status::Fail, Severity::High), "{id}");
        }
        let innovation = result_for(&results, "innovation_statement");
        assert_eq!(
            (innovation.status, innovation.severity),
            (Status::Fail, Severity::Medium)
        );
    }

    #[test]
    fn readme_without_keywords_only_warns() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "README.md", "# Title\n\nSome words.\n");
        let results = audit(&dir);
        for id in [
            "problem_statement",
            "quickstart",
            "usage_examples",
            "innovation_statement",
        ] {
            let r = result_for(&results, id);
            assert_eq!((r.status, r.severity), (Status::Warn, Severity::Medium), "{id}");
        }
    }

    #[test]
    fn keywords_match_case_insensitively() {
        let dir = TempDir::new().unwrap();
        touch(
            dir.path(),
            "README.md",
            "WHO THIS IS FOR\nSETUP then GETTING STARTED\nA NOVEL approach\n",
        );
        let results = audit(&dir);
        assert_eq!(result_for(&results, "problem_statement").status, Status::Pass);
        assert_eq!(result_for(&results, "quickstart").status, Status::Pass);
        assert_eq!(result_for(&results, "innovation_statement").status, Status::Pass);
    }

    #[test]
    fn quickstart_needs_install_and_run() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "README.md", "## Installation\npip install x\n");
        let results = audit(&dir);
        assert_eq!(result_for(&results, "quickstart").status, Status::Warn);
    }

    #[test]
    fn usage_examples_need_a_code_fence() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "README.md", "## Example\nrun the tool\n");
        let results = audit(&dir);
        assert_eq!(result_for(&results, "usage_examples").status, Status::Warn);

        touch(dir.path(), "README.md", "## Example\n```\nrun the tool\n```\n");
        let results = audit(&dir);
        assert_eq!(result_for(&results, "usage_examples").status, Status::Pass);
    }
}
