use crate::output::{absolute, print_json};
use anyhow::Context;
use sentinel_core::scaffold::scaffold;
use std::path::Path;

pub fn run(output: &Path, force: bool, json: bool) -> anyhow::Result<()> {
    let output_dir = absolute(output);
    let written = scaffold(&output_dir, force)
        .with_context(|| format!("failed to scaffold templates in {}", output_dir.display()))?;

    if json {
        return print_json(&serde_json::json!({
            "output_dir": output_dir,
            "written": written,
        }));
    }

    if written.is_empty() {
        println!(
            "No files written. Use --force to overwrite existing templates in {}.",
            output_dir.display()
        );
        return Ok(());
    }
    println!(
        "Scaffolded {} file(s) in {}",
        written.len(),
        output_dir.display()
    );
    for path in &written {
        println!("- {}", path.display());
    }
    Ok(())
}
