use crate::output::{absolute, print_json};
use anyhow::Context;
use sentinel_core::report::load_report;
use sentinel_core::roadmap::write_roadmap;
use std::path::Path;

pub fn run(report: &Path, output: &Path, json: bool) -> anyhow::Result<()> {
    let report_path = absolute(report);
    let report = load_report(&report_path)
        .with_context(|| format!("failed to load report {}", report_path.display()))?;

    let output = absolute(output);
    let markdown = write_roadmap(&report, &output)
        .with_context(|| format!("failed to write roadmap {}", output.display()))?;

    if json {
        return print_json(&serde_json::json!({
            "path": output,
            "markdown": markdown,
        }));
    }
    println!("Wrote roadmap to {}", output.display());
    Ok(())
}
