use crate::output::{absolute, print_json, print_path_list};
use anyhow::Context;
use sentinel_core::coach::write_coach;
use sentinel_core::flow::resolve_project;
use sentinel_core::report::load_report;
use std::path::Path;

pub fn run(
    report: &Path,
    output: &Path,
    project: &Path,
    apply_safe: bool,
    json: bool,
) -> anyhow::Result<()> {
    let report_path = absolute(report);
    let report = load_report(&report_path)
        .with_context(|| format!("failed to load report {}", report_path.display()))?;
    let project = resolve_project(project)?;

    let output = absolute(output);
    let outcome = write_coach(&report, &output, &project, apply_safe)
        .with_context(|| format!("failed to write coach {}", output.display()))?;

    if json {
        return print_json(&outcome);
    }
    println!("Wrote beginner fix coach to {}", outcome.path.display());
    print_path_list("Applied safe starter files:", &outcome.applied);
    Ok(())
}
