use crate::output::{absolute, print_json};
use anyhow::Context;
use sentinel_core::agent_pack::{write_agent_pack, AgentPackPaths};
use sentinel_core::flow::resolve_project;
use sentinel_core::report::load_report;
use std::path::{Path, PathBuf};

pub struct PackArgs {
    pub report: PathBuf,
    pub project: PathBuf,
    pub output: PathBuf,
    pub json_output: PathBuf,
    pub runbook_output: PathBuf,
    pub prompts_dir: PathBuf,
}

pub fn run(args: &PackArgs, json: bool) -> anyhow::Result<()> {
    let report_path = absolute(&args.report);
    let report = load_report(&report_path)
        .with_context(|| format!("failed to load report {}", report_path.display()))?;
    let project = resolve_project(&args.project)?;

    let paths = AgentPackPaths {
        markdown: absolute(&args.output),
        json: absolute(&args.json_output),
        runbook: absolute(&args.runbook_output),
        prompts_dir: absolute(&args.prompts_dir),
    };
    let outcome = write_agent_pack(&report, &project, &paths)
        .context("failed to write agent pack")?;

    if json {
        return print_json(&outcome);
    }
    print_summary(&outcome.paths, outcome.tasks.len());
    Ok(())
}

fn print_summary(paths: &AgentPackPaths, task_count: usize) {
    let show = |p: &Path| p.display().to_string();
    println!("Wrote agent sprint pack to {}", show(&paths.markdown));
    println!("Wrote agent task JSON to {}", show(&paths.json));
    println!("Wrote agent runbook to {}", show(&paths.runbook));
    println!("Prompt files directory: {}", show(&paths.prompts_dir));
    println!("Open tasks in pack: {task_count}");
}
