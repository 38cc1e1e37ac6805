use crate::output::{absolute, print_json};
use anyhow::Context;
use sentinel_core::flow;
use sentinel_core::report::console_summary;
use std::path::Path;

pub fn run(path: &Path, output_dir: &Path, json: bool) -> anyhow::Result<()> {
    let project = flow::resolve_project(path)?;
    let output_dir = absolute(output_dir);
    let audit = flow::audit_into(&project, &output_dir)
        .with_context(|| format!("failed to write report to {}", output_dir.display()))?;

    if json {
        return print_json(&audit);
    }

    println!("{}", console_summary(&audit.report));
    println!();
    println!(
        "Wrote JSON report to {}",
        audit.artifacts.report_json.display()
    );
    println!(
        "Wrote Markdown report to {}",
        audit.artifacts.report_markdown.display()
    );
    Ok(())
}
