mod cmd;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "vibe-sentinel",
    about = "Audit vibe-coded projects for submission readiness, then generate a prioritized quality roadmap",
    version,
    propagate_version = true
)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold submission templates
    Init {
        /// Directory for generated templates
        #[arg(long, default_value = ".vibe-sentinel")]
        output: PathBuf,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Run the quality audit and write report.json / report.md
    Audit {
        /// Project directory to audit
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Directory for generated report artifacts
        #[arg(long, default_value = ".vibe-sentinel")]
        output_dir: PathBuf,
    },

    /// Generate a prioritized roadmap from a report
    Roadmap {
        /// Path to report.json generated by `vibe-sentinel audit`
        #[arg(long, default_value = ".vibe-sentinel/report.json")]
        report: PathBuf,

        /// Output markdown path
        #[arg(long, default_value = ".vibe-sentinel/roadmap.md")]
        output: PathBuf,
    },

    /// Generate beginner-friendly fix guidance from a report
    Coach {
        /// Path to report.json generated by `vibe-sentinel audit`
        #[arg(long, default_value = ".vibe-sentinel/report.json")]
        report: PathBuf,

        /// Output markdown path
        #[arg(long, default_value = ".vibe-sentinel/coach.md")]
        output: PathBuf,

        /// Project directory where safe starter files can be applied
        #[arg(long, default_value = ".")]
        project: PathBuf,

        /// Create missing baseline files without overwriting existing ones
        #[arg(long)]
        apply_safe: bool,
    },

    /// Generate an agent-ready task pack from a report
    AgentPack {
        /// Path to report.json generated by `vibe-sentinel audit`
        #[arg(long, default_value = ".vibe-sentinel/report.json")]
        report: PathBuf,

        /// Project directory referenced in generated prompts
        #[arg(long, default_value = ".")]
        project: PathBuf,

        /// Output markdown path for the sprint pack
        #[arg(long, default_value = ".vibe-sentinel/agent_pack.md")]
        output: PathBuf,

        /// Output JSON path for structured tasks
        #[arg(long, default_value = ".vibe-sentinel/agent_tasks.json")]
        json_output: PathBuf,

        /// Output markdown path for the execution runbook
        #[arg(long, default_value = ".vibe-sentinel/agent_runbook.md")]
        runbook_output: PathBuf,

        /// Directory for per-task prompt files
        #[arg(long, default_value = ".vibe-sentinel/prompts")]
        prompts_dir: PathBuf,
    },

    /// Audit, pack, coach, roadmap, then re-audit in one sequence
    Ship {
        /// Project directory to process
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Allow the coach step to create missing baseline files
        #[arg(long)]
        apply_safe: bool,
    },

    /// Launch the local HTTP API
    Studio {
        /// Host address to bind
        #[arg(long, default_value = "127.0.0.1", env = "VIBE_SENTINEL_HOST")]
        host: String,

        /// Port to listen on (0 = OS-assigned)
        #[arg(long, default_value = "8765", env = "VIBE_SENTINEL_PORT")]
        port: u16,

        /// Enable the OpenClaw bridge endpoints (/api/openclaw/*)
        #[arg(long)]
        enable_openclaw: bool,

        /// Key required in `X-OpenClaw-Key`; implies --enable-openclaw
        #[arg(long, env = "VIBE_SENTINEL_OPENCLAW_KEY", hide_env_values = true)]
        openclaw_key: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Studio { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Init { output, force } => cmd::init::run(&output, force, cli.json),
        Commands::Audit { path, output_dir } => cmd::audit::run(&path, &output_dir, cli.json),
        Commands::Roadmap { report, output } => cmd::roadmap::run(&report, &output, cli.json),
        Commands::Coach {
            report,
            output,
            project,
            apply_safe,
        } => cmd::coach::run(&report, &output, &project, apply_safe, cli.json),
        Commands::AgentPack {
            report,
            project,
            output,
            json_output,
            runbook_output,
            prompts_dir,
        } => {
            let args = cmd::agent_pack::PackArgs {
                report,
                project,
                output,
                json_output,
                runbook_output,
                prompts_dir,
            };
            cmd::agent_pack::run(&args, cli.json)
        }
        Commands::Ship { path, apply_safe } => cmd::ship::run(&path, apply_safe, cli.json),
        Commands::Studio {
            host,
            port,
            enable_openclaw,
            openclaw_key,
        } => cmd::studio::run(&host, port, enable_openclaw, openclaw_key),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
