//! Heuristic scan for hard-coded credentials in text files.

use super::{CheckResult, CheckSpec};
use crate::context::AuditContext;
use crate::types::Severity;
use regex::Regex;
use std::sync::OnceLock;

/// Files containing this marker are skipped by the scan.
pub const ALLOW_SECRET_MARKER: &str = "vibe-sentinel: allow-secret";

const SCANNED_EXTENSIONS: &[&str] = &[
    "md", "txt", "rst", "py", "js", "ts", "tsx", "json", "toml", "yaml", "yml", "ini", "cfg",
    "env", "sh",
];
const SCANNED_NAMES: &[&str] = &[".env", ".env.local"];
const SKIPPED_PREFIXES: &[&str] = &["tests/", "docs/"];
const LISTED_PATHS: usize = 3;

static SECRET_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

fn secret_patterns() -> &'static [Regex] {
    SECRET_PATTERNS.get_or_init(|| {
        [
            r"sk-[A-Za-z0-9]{20,}",
            r"AKIA[0-9A-Z]{16}",
            r#"(?i)(api[_-]?key|secret|token)\s*[:=]\s*['"]?[A-Za-z0-9_\-]{16,}"#,
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
    })
}

fn is_scanned(relative: &str) -> bool {
    if SKIPPED_PREFIXES.iter().any(|p| relative.starts_with(p)) {
        return false;
    }
    let name = relative.rsplit('/').next().unwrap_or(relative);
    if SCANNED_NAMES.contains(&name) {
        return true;
    }
    match name.rsplit_once('.') {
        // A leading dot alone (".bashrc") is a hidden name, not an extension.
        Some((stem, ext)) if !stem.is_empty() => {
            SCANNED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
        }
        _ => false,
    }
}

/// True when `content` matches any credential pattern and is not opted out.
pub fn contains_secret(content: &str) -> bool {
    if content.is_empty() || content.contains(ALLOW_SECRET_MARKER) {
        return false;
    }
    secret_patterns().iter().any(|re| re.is_match(content))
}

/// Relative paths (sorted) of scanned files that look like they hold secrets.
pub fn scan_for_secrets(ctx: &AuditContext) -> Vec<String> {
    ctx.files
        .iter()
        .filter(|rel| is_scanned(rel))
        .filter(|rel| contains_secret(&ctx.read(rel)))
        .cloned()
        .collect()
}

pub(super) fn secret_scan(ctx: &AuditContext, spec: &CheckSpec) -> CheckResult {
    let hits = scan_for_secrets(ctx);
    if hits.is_empty() {
        return spec.pass("No obvious secret patterns were detected in text files.");
    }
    tracing::warn!(files = hits.len(), "potential secrets detected");

    let shown = hits.iter().take(LISTED_PATHS).cloned().collect::<Vec<_>>().join(", ");
    let more = match hits.len().saturating_sub(LISTED_PATHS) {
        0 => String::new(),
        n => format!(" (+{n} more)"),
    };
    spec.fail(
        Severity::High,
        format!("Potential secrets detected in: {shown}{more}."),
        "Remove hard-coded secrets and rotate any compromised credentials immediately.",
    )
}
