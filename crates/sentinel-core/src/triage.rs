//! Issue ordering shared by every document generator.

use crate::checks::CheckResult;
use crate::report::AuditReport;

/// Sort key: severity (high first), then category name, then check id.
pub fn triage_key(check: &CheckResult) -> (u8, &'static str, &str) {
    (
        check.severity.rank(),
        check.category.as_str(),
        check.check_id.as_str(),
    )
}

/// Sort any slice of results in triage order.
pub fn sort_by_triage(checks: &mut [&CheckResult]) {
    checks.sort_by(|a, b| triage_key(a).cmp(&triage_key(b)));
}

/// Every non-passing check of a report, in triage order.
pub fn open_issues(report: &AuditReport) -> Vec<&CheckResult> {
    let mut issues: Vec<&CheckResult> = report.checks.iter().filter(|c| c.is_open()).collect();
    sort_by_triage(&mut issues);
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::default_checks;
    use crate::report::tests::report_with;
    use crate::types::{Severity, Status};

    #[test]
    fn orders_by_severity_then_category_then_id() {
        let specs: Vec<_> = default_checks().iter().map(|c| c.spec).collect();
        let find = |id: &str| *specs.iter().find(|s| s.id == id).unwrap();
        let report = report_with(vec![
            find("license_present").fail(Severity::Medium, "d", "r"),
            find("ci_present").warn(Severity::Medium, "d", "r"),
            find("quickstart").warn(Severity::Medium, "d", "r"),
            find("demo_script").warn(Severity::Low, "d", "r"),
            find("tests_present").fail(Severity::High, "d", "r"),
            find("problem_statement").pass("ok"),
            find("dependency_lock").warn(Severity::Medium, "d", "r"),
        ]);

        let ids: Vec<_> = open_issues(&report).iter().map(|c| c.check_id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "tests_present",
                "ci_present",
                "dependency_lock",
                "license_present",
                "quickstart",
                "demo_script",
            ]
        );
    }

    #[test]
    fn passing_checks_are_excluded() {
        let report = report_with(default_checks().iter().map(|c| c.spec.pass("ok")).collect());
        assert!(open_issues(&report).is_empty());
        assert!(report.checks.iter().all(|c| c.status == Status::Pass));
    }
}
