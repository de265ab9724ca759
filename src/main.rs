//! `funcgraph`: build a function index from analyzed-function descriptors and
//! call-graph edges, and write it as `<output>.json`.
//!
//! ```bash
//! funcgraph -p ./myproject -f funcs.jsonl -e callgraph.dot -o out/funcs
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use funcgraph_prep::{RunOptions, prepare_function_index};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "funcgraph", version, about = "Merge function facts and call edges into a JSON index")]
struct Cli {
    /// Project root; source paths are recorded relative to it.
    #[arg(short = 'p', long = "project-dir")]
    project_dir: PathBuf,

    /// Output base name; `.json` is appended.
    #[arg(short = 'o', long = "output")]
    output: PathBuf,

    /// Analyzed-function descriptors (JSON Lines).
    #[arg(short = 'f', long = "functions")]
    functions: PathBuf,

    /// Call-graph edges (JSON Lines, or Graphviz DOT for `.dot`/`.gv`).
    #[arg(short = 'e', long = "edges")]
    edges: PathBuf,

    /// YAML config (default: `<project-dir>/.funcgraph.yml` when present).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Optional: a missing .env is fine.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,funcgraph_prep=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let opts = RunOptions {
        project_dir: cli.project_dir,
        functions: cli.functions,
        edges: cli.edges,
        output_base: cli.output,
        config: cli.config,
    };

    match prepare_function_index(&opts) {
        Ok(outcome) => {
            println!("JSON data written to {}", outcome.output_path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "run failed");
            println!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
