use super::{CheckResult, CheckSpec};
use crate::context::AuditContext;
use crate::types::Severity;

const LOCKFILES: &[&str] = &[
    "poetry.lock",
    "Pipfile.lock",
    "requirements.lock",
    "uv.lock",
    "package-lock.json",
    "pnpm-lock.yaml",
    "yarn.lock",
    "bun.lockb",
];

pub(super) fn dependency_lock(ctx: &AuditContext, spec: &CheckSpec) -> CheckResult {
    if ctx.any_exists(LOCKFILES) {
        return spec.pass("Dependency lockfile detected.");
    }
    if ctx.exists("requirements.txt") && requirements_pinned(&ctx.read("requirements.txt")) {
        return spec.pass("requirements.txt appears version-pinned.");
    }
    if ctx.exists("pyproject.toml") {
        let pyproject = ctx.read("pyproject.toml").to_lowercase();
        if pyproject.contains("[project]") && !pyproject.contains("dependencies") {
            return spec.pass("No runtime dependencies declared in pyproject.toml.");
        }
    }
    spec.warn(
        Severity::Medium,
        "No lockfile or fully pinned dependency list found.",
        "Add a lockfile (preferred) or pin dependency versions in requirements.txt.",
    )
}

/// Every dependency line carries `==` or a direct `@` reference. Editable
/// installs are ignored; a file with no dependency lines is not pinned.
pub fn requirements_pinned(content: &str) -> bool {
    let lines: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .filter(|line| !line.trim().starts_with("-e "))
        .collect();
    !lines.is_empty() && lines.iter().all(|line| line.contains("==") || line.contains('@'))
}
