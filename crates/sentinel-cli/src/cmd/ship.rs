use crate::output::{print_json, print_path_list};
use sentinel_core::flow::{resolve_project, ship_flow};
use std::path::Path;

pub fn run(path: &Path, apply_safe: bool, json: bool) -> anyhow::Result<()> {
    let project = resolve_project(path)?;
    let result = ship_flow(&project, apply_safe)?;

    if json {
        return print_json(&result);
    }

    println!("Ship sequence completed for {}", project.display());
    println!(
        "Score: {:.1} -> {:.1} ({:+.1})",
        result.before.scorecard.overall, result.after.scorecard.overall, result.improvement
    );
    println!("Agent tasks generated: {}", result.task_count);
    print_path_list("Applied safe files:", &result.applied_files);

    println!("Artifacts:");
    if let serde_json::Value::Object(artifacts) = serde_json::to_value(&result.artifacts)? {
        for (key, value) in artifacts {
            let shown = value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string());
            println!("- {key}: {shown}");
        }
    }
    Ok(())
}
