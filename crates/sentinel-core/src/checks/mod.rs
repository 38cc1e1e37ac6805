//! The audit rubric: twelve fixed checks, each a static spec plus a plain
//! evaluator function over the project snapshot.

mod artifacts;
mod deps;
mod readme;
mod secrets;

use crate::context::AuditContext;
use crate::types::{Category, Severity, Status};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

pub const NO_ACTION: &str = "No action required.";

// ---------------------------------------------------------------------------
// CheckSpec
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub category: Category,
    pub weight: u32,
}

impl CheckSpec {
    pub fn verdict(
        &self,
        status: Status,
        severity: Severity,
        detail: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> CheckResult {
        CheckResult {
            check_id: self.id.to_string(),
            title: self.title.to_string(),
            category: self.category,
            weight: self.weight,
            status,
            severity,
            detail: detail.into(),
            recommendation: recommendation.into(),
        }
    }

    /// A pass is always low severity with no follow-up.
    pub fn pass(&self, detail: impl Into<String>) -> CheckResult {
        self.verdict(Status::Pass, Severity::Low, detail, NO_ACTION)
    }

    pub fn warn(
        &self,
        severity: Severity,
        detail: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> CheckResult {
        self.verdict(Status::Warn, severity, detail, recommendation)
    }

    pub fn fail(
        &self,
        severity: Severity,
        detail: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> CheckResult {
        self.verdict(Status::Fail, severity, detail, recommendation)
    }
}

// ---------------------------------------------------------------------------
// CheckResult
// ---------------------------------------------------------------------------

/// One verdict of one check. `points` is derived and only appears in the
/// serialized form; it is ignored when a report is read back.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckResult {
    pub check_id: String,
    pub title: String,
    pub category: Category,
    pub weight: u32,
    pub status: Status,
    pub severity: Severity,
    pub detail: String,
    pub recommendation: String,
}

impl CheckResult {
    pub fn points(&self) -> f64 {
        f64::from(self.weight) * self.status.multiplier()
    }

    pub fn is_open(&self) -> bool {
        self.status != Status::Pass
    }
}

impl Serialize for CheckResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("CheckResult", 9)?;
        s.serialize_field("check_id", &self.check_id)?;
        s.serialize_field("title", &self.title)?;
        s.serialize_field("category", &self.category)?;
        s.serialize_field("weight", &self.weight)?;
        s.serialize_field("status", &self.status)?;
        s.serialize_field("severity", &self.severity)?;
        s.serialize_field("detail", &self.detail)?;
        s.serialize_field("recommendation", &self.recommendation)?;
        s.serialize_field("points", &round2(self.points()))?;
        s.end()
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Check table
// ---------------------------------------------------------------------------

/// A fn-pointer check: static metadata plus a pure evaluator.
pub struct Check {
    pub spec: CheckSpec,
    pub evaluate: fn(&AuditContext, &CheckSpec) -> CheckResult,
}

impl Check {
    pub fn run(&self, ctx: &AuditContext) -> CheckResult {
        (self.evaluate)(ctx, &self.spec)
    }
}

macro_rules! check {
    ($id:literal, $title:literal, $category:ident, $weight:literal, $eval:path) => {
        Check {
            spec: CheckSpec {
                id: $id,
                title: $title,
                category: Category::$category,
                weight: $weight,
            },
            evaluate: $eval,
        }
    };
}

/// The rubric in evaluation order.
pub fn default_checks() -> Vec<Check> {
    vec![
        check!(
            "problem_statement",
            "Problem Statement",
            Usefulness,
            12,
            readme::problem_statement
        ),
        check!(
            "quickstart",
            "Quickstart Instructions",
            Usefulness,
            14,
            readme::quickstart
        ),
        check!(
            "usage_examples",
            "Usage Examples",
            Usefulness,
            14,
            readme::usage_examples
        ),
        check!(
            "tests_present",
            "Automated Tests",
            Execution,
            12,
            artifacts::tests_present
        ),
        check!(
            "ci_present",
            "Continuous Integration",
            Execution,
            10,
            artifacts::ci_present
        ),
        check!(
            "dependency_lock",
            "Dependency Reproducibility",
            Execution,
            8,
            deps::dependency_lock
        ),
        check!(
            "demo_script",
            "3-5 Minute Demo Script",
            Execution,
            10,
            artifacts::demo_script
        ),
        check!(
            "secret_scan",
            "Secret Leak Scan",
            Impact,
            12,
            secrets::secret_scan
        ),
        check!(
            "license_present",
            "Open-Source License",
            Impact,
            8,
            artifacts::license_present
        ),
        check!(
            "submission_template",
            "Submission Metadata",
            Impact,
            5,
            artifacts::submission_template
        ),
        check!(
            "innovation_statement",
            "Innovation Positioning",
            Innovation,
            10,
            readme::innovation_statement
        ),
        check!(
            "novelty_artifact",
            "Differentiation Artifact",
            Innovation,
            5,
            artifacts::novelty_artifact
        ),
    ]
}

/// Evaluate every check against one snapshot, in table order.
pub fn run_checks(ctx: &AuditContext) -> Vec<CheckResult> {
    default_checks().iter().map(|check| check.run(ctx)).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::context::build_context;
    use std::collections::HashSet;
    use std::path::Path;
    use tempfile::TempDir;

    pub(crate) fn touch(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    pub(crate) fn result_for<'a>(results: &'a [CheckResult], id: &str) -> &'a CheckResult {
        results
            .iter()
            .find(|r| r.check_id == id)
            .unwrap_or_else(|| panic!("missing check {id}"))
    }

    pub(crate) fn audit(dir: &TempDir) -> Vec<CheckResult> {
        run_checks(&build_context(dir.path()))
    }

    #[test]
    fn table_ids_are_unique_and_weights_positive() {
        let checks = default_checks();
        assert_eq!(checks.len(), 12);
        let ids: HashSet<_> = checks.iter().map(|c| c.spec.id).collect();
        assert_eq!(ids.len(), 12);
        assert!(checks.iter().all(|c| c.spec.weight > 0));
    }

    #[test]
    fn results_keep_table_order() {
        let dir = TempDir::new().unwrap();
        let results = audit(&dir);
        let ids: Vec<_> = results.iter().map(|r| r.check_id.as_str()).collect();
        let expected: Vec<_> = default_checks().iter().map(|c| c.spec.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn points_are_zero_half_or_full_weight() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "README.md", "just a title\n");
        for result in audit(&dir) {
            let w = f64::from(result.weight);
            let p = result.points();
            assert!((0.0..=w).contains(&p));
            assert!(p == 0.0 || p == w / 2.0 || p == w, "{}: {p}", result.check_id);
        }
    }

    #[test]
    fn empty_project_scenario() {
        let dir = TempDir::new().unwrap();
        let results = audit(&dir);

        let tests = result_for(&results, "tests_present");
        assert_eq!((tests.status, tests.severity), (Status::Fail, Severity::High));

        let license = result_for(&results, "license_present");
        assert_eq!(
            (license.status, license.severity),
            (Status::Fail, Severity::Medium)
        );

        assert_eq!(result_for(&results, "secret_scan").status, Status::Pass);
        assert_eq!(result_for(&results, "dependency_lock").status, Status::Warn);
    }

    #[test]
    fn documented_project_scenario() {
        let dir = TempDir::new().unwrap();
        touch(
            dir.path(),
            "README.md",
            "# Demo\n\n## Problem\nSlow reviews.\n\n## Installation\npip install demo\n\n## Usage\n```bash\ndemo run\n```\n",
        );
        touch(dir.path(), "LICENSE", "MIT");
        touch(dir.path(), "requirements.txt", "requests==2.32.0\n");

        let results = audit(&dir);
        for id in [
            "problem_statement",
            "quickstart",
            "usage_examples",
            "license_present",
            "dependency_lock",
        ] {
            assert_eq!(result_for(&results, id).status, Status::Pass, "{id}");
        }
    }

    #[test]
    fn happy_path_passes_everything() {
        let dir = TempDir::new().unwrap();
        touch(
            dir.path(),
            "README.md",
            "# Demo\n\n## Problem\nWe fix a real challenge.\n\n## Installation\npip install demo\n\n## Usage\n```bash\ndemo audit .\n```\n\n## Why this is different\nThis is unique.\n",
        );
        touch(dir.path(), "LICENSE", "MIT");
        touch(dir.path(), "requirements.txt", "requests==2.32.0\n");
        touch(dir.path(), "DEMO_SCRIPT.md", &"word ".repeat(350));
        touch(
            dir.path(),
            "SUBMISSION.md",
            "Discord\nGitHub profile\nGitHub repo\nDemo video\n",
        );
        touch(dir.path(), "UNIQUE_EDGE.md", "Different");
        touch(dir.path(), "tests/test_smoke.py", "def test_ok():\n    assert True\n");
        touch(dir.path(), ".github/workflows/ci.yml", "name: ci\n");

        let results = audit(&dir);
        for r in &results {
            assert_eq!(r.status, Status::Pass, "{} -> {}", r.check_id, r.detail);
        }
    }

    #[test]
    fn serialized_result_carries_points() {
        let spec = default_checks()[0].spec;
        let result = spec.warn(Severity::Medium, "d", "r");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["points"], 6.0);
        assert_eq!(value["status"], "warn");
        assert_eq!(value["category"], "usefulness");

        let back: CheckResult = serde_json::from_value(value).unwrap();
        assert_eq!(back, result);
    }
}
