//! Project snapshot consumed by every check.
//!
//! The snapshot is taken once per audit: a sorted set of relative file paths
//! (forward-slash separated, excluded directories pruned) plus the README text.

use crate::io::read_text_or_empty;
use crate::paths::{is_excluded, README_MD};
use ignore::WalkBuilder;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// AuditContext
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AuditContext {
    pub root: PathBuf,
    pub files: BTreeSet<String>,
    pub readme_text: String,
}

impl AuditContext {
    pub fn exists(&self, relative: &str) -> bool {
        self.files.contains(relative)
    }

    /// True when any of `candidates` is present in the snapshot.
    pub fn any_exists(&self, candidates: &[&str]) -> bool {
        candidates.iter().any(|c| self.exists(c))
    }

    /// Read a snapshot file's text (empty when unreadable or oversized).
    pub fn read(&self, relative: &str) -> String {
        read_text_or_empty(&self.root.join(relative))
    }

    pub fn has_readme(&self) -> bool {
        !self.readme_text.is_empty()
    }

    pub fn readme_lower(&self) -> String {
        self.readme_text.to_lowercase()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Scan `root` and build the snapshot. Never fails: a missing directory or a
/// walk error simply contributes no files.
pub fn build_context(root: &Path) -> AuditContext {
    let files = collect_files(root);
    let readme_text = read_text_or_empty(&root.join(README_MD));
    tracing::debug!(
        root = %root.display(),
        files = files.len(),
        readme = !readme_text.is_empty(),
        "built audit context"
    );
    AuditContext {
        root: root.to_path_buf(),
        files,
        readme_text,
    }
}

fn collect_files(root: &Path) -> BTreeSet<String> {
    let mut files = BTreeSet::new();
    if !root.is_dir() {
        return files;
    }

    let prune_root = root.to_path_buf();
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .filter_entry(move |entry| match entry.path().strip_prefix(&prune_root) {
            Ok(rel) => !is_excluded(rel),
            Err(_) => true,
        })
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !is_file_entry(&entry) {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        if let Some(key) = to_relative_key(rel) {
            files.insert(key);
        }
    }
    files
}

/// Regular files, plus symlinks that resolve to a file. Directory links are
/// never descended into.
fn is_file_entry(entry: &ignore::DirEntry) -> bool {
    match entry.file_type() {
        Some(t) if t.is_file() => true,
        Some(t) if t.is_symlink() => entry.path().is_file(),
        _ => false,
    }
}

/// Forward-slash relative key for a path, `None` for non-UTF-8 names.
fn to_relative_key(rel: &Path) -> Option<String> {
    let parts: Option<Vec<&str>> = rel.components().map(|c| c.as_os_str().to_str()).collect();
    let parts = parts?;
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn collects_relative_forward_slash_paths() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/app.py", "print('hi')");
        touch(dir.path(), ".github/workflows/ci.yml", "name: ci");
        touch(dir.path(), ".env", "X=1");

        let ctx = build_context(dir.path());
        assert!(ctx.exists("src/app.py"));
        assert!(ctx.exists(".github/workflows/ci.yml"));
        assert!(ctx.exists(".env"));
        assert_eq!(ctx.files.len(), 3);
    }

    #[test]
    fn prunes_excluded_directories() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "node_modules/lodash/index.js", "x");
        touch(dir.path(), ".git/config", "x");
        touch(dir.path(), "pkg/__pycache__/m.pyc", "x");
        touch(dir.path(), "main.py", "x");

        let ctx = build_context(dir.path());
        assert_eq!(ctx.files.iter().collect::<Vec<_>>(), vec!["main.py"]);
    }

    #[test]
    fn ignores_gitignore_rules() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), ".gitignore", "secret.env\n");
        touch(dir.path(), "secret.env", "TOKEN=x");

        let ctx = build_context(dir.path());
        assert!(ctx.exists("secret.env"));
    }

    #[cfg(unix)]
    #[test]
    fn keeps_symlink_to_file() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "real_license.txt", "MIT");
        std::os::unix::fs::symlink(
            dir.path().join("real_license.txt"),
            dir.path().join("LICENSE"),
        )
        .unwrap();

        let ctx = build_context(dir.path());
        assert!(ctx.exists("LICENSE"));
        assert!(ctx.exists("real_license.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn skips_dangling_and_directory_symlinks() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/app.py", "x");
        std::os::unix::fs::symlink(dir.path().join("missing.txt"), dir.path().join("LICENSE"))
            .unwrap();
        std::os::unix::fs::symlink(dir.path().join("src"), dir.path().join("src_link")).unwrap();

        let ctx = build_context(dir.path());
        assert!(!ctx.exists("LICENSE"));
        assert!(!ctx.files.iter().any(|f| f.starts_with("src_link")));
        assert_eq!(ctx.files.iter().collect::<Vec<_>>(), vec!["src/app.py"]);
    }

    #[test]
    fn reads_readme_text() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "README.md", "# Hello\n");
        let ctx = build_context(dir.path());
        assert!(ctx.has_readme());
        assert_eq!(ctx.readme_text, "# Hello\n");
    }

    #[test]
    fn missing_directory_is_an_empty_snapshot() {
        let dir = TempDir::new().unwrap();
        let ctx = build_context(&dir.path().join("does-not-exist"));
        assert!(ctx.files.is_empty());
        assert!(!ctx.has_readme());
    }
}
