use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const ARTIFACT_DIR: &str = ".vibe-sentinel";

pub const REPORT_JSON: &str = "report.json";
pub const REPORT_MD: &str = "report.md";
pub const ROADMAP_MD: &str = "roadmap.md";
pub const COACH_MD: &str = "coach.md";
pub const AGENT_PACK_MD: &str = "agent_pack.md";
pub const AGENT_TASKS_JSON: &str = "agent_tasks.json";
pub const AGENT_RUNBOOK_MD: &str = "agent_runbook.md";
pub const PROMPTS_DIR: &str = "prompts";

pub const README_MD: &str = "README.md";
pub const CI_WORKFLOW: &str = ".github/workflows/ci.yml";
pub const SMOKE_TEST: &str = "tests/test_smoke.py";

/// Path segments never descended into while scanning a project.
pub const EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "dist",
    "build",
    "__pycache__",
    ".venv",
    "venv",
    ".mypy_cache",
    ".pytest_cache",
];

// ---------------------------------------------------------------------------
// ArtifactLayout
// ---------------------------------------------------------------------------

/// Where every generated artifact lives for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    pub dir: PathBuf,
}

impl ArtifactLayout {
    /// The default layout: `<project>/.vibe-sentinel/`.
    pub fn for_project(project: &Path) -> Self {
        Self {
            dir: project.join(ARTIFACT_DIR),
        }
    }

    pub fn report_json(&self) -> PathBuf {
        self.dir.join(REPORT_JSON)
    }

    pub fn report_md(&self) -> PathBuf {
        self.dir.join(REPORT_MD)
    }

    pub fn roadmap_md(&self) -> PathBuf {
        self.dir.join(ROADMAP_MD)
    }

    pub fn coach_md(&self) -> PathBuf {
        self.dir.join(COACH_MD)
    }

    pub fn agent_pack_md(&self) -> PathBuf {
        self.dir.join(AGENT_PACK_MD)
    }

    pub fn agent_tasks_json(&self) -> PathBuf {
        self.dir.join(AGENT_TASKS_JSON)
    }

    pub fn agent_runbook_md(&self) -> PathBuf {
        self.dir.join(AGENT_RUNBOOK_MD)
    }

    pub fn prompts_dir(&self) -> PathBuf {
        self.dir.join(PROMPTS_DIR)
    }
}

/// True when any component of the relative path is an excluded directory.
pub fn is_excluded(relative: &Path) -> bool {
    relative.components().any(|c| {
        c.as_os_str()
            .to_str()
            .is_some_and(|s| EXCLUDED_DIRS.contains(&s))
    })
}

/// Expand a leading `~` to the user's home directory. Anything else, and
/// `~user` forms, are returned unchanged.
pub fn expand_home(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(raw),
    };
    match home::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(raw),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_paths() {
        let layout = ArtifactLayout::for_project(Path::new("/tmp/proj"));
        assert_eq!(
            layout.report_json(),
            PathBuf::from("/tmp/proj/.vibe-sentinel/report.json")
        );
        assert_eq!(
            layout.prompts_dir(),
            PathBuf::from("/tmp/proj/.vibe-sentinel/prompts")
        );
        assert_eq!(
            layout.agent_runbook_md(),
            PathBuf::from("/tmp/proj/.vibe-sentinel/agent_runbook.md")
        );
    }

    #[test]
    fn excluded_components() {
        assert!(is_excluded(Path::new("node_modules/lodash/index.js")));
        assert!(is_excluded(Path::new("src/__pycache__/mod.pyc")));
        assert!(is_excluded(Path::new(".git")));
        assert!(!is_excluded(Path::new("src/build.rs")));
        assert!(!is_excluded(Path::new("docs/distribution.md")));
    }

    #[test]
    fn expand_home_only_touches_leading_tilde() {
        assert_eq!(expand_home("/srv/app"), PathBuf::from("/srv/app"));
        assert_eq!(expand_home(" demo "), PathBuf::from(" demo "));
        assert_eq!(expand_home("~other/x"), PathBuf::from("~other/x"));
        if let Some(home) = home::home_dir() {
            assert_eq!(expand_home("~"), home);
            assert_eq!(expand_home("~/proj"), home.join("proj"));
        }
    }
}
