//! The `healthwatch` binary.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use healthwatch_cli::config;
use healthwatch_cli::visualiser::{Console, Json, Show, Symbols, Visualiser};
use healthwatch_sdk::{Report, Scanner, Status};

/// Evaluate an infrastructure health tree and render the verdict.
#[derive(Debug, Parser)]
#[command(name = "healthwatch", version, about)]
struct Args {
    /// Service definition file (TOML or JSON).
    #[arg(short, long, default_value = "healthwatch.toml")]
    config: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "console")]
    format: Format,

    /// Which subtrees to render.
    #[arg(short, long, value_enum, default_value = "all")]
    show: Show,

    /// Render only the nodes at this slash-separated path of names
    /// (`*` matches any name). The exit code reflects those nodes.
    #[arg(short, long)]
    path: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Indented tree with status symbols.
    Console,
    /// Pretty-printed JSON, one object per node.
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let cfg = config::load(&args.config)?;
    let tree = config::build_tree(&cfg)?;

    let report = evaluate(&tree).await;
    let targets = select(&report, args.path.as_deref())?;

    let visualiser: Box<dyn Visualiser> = match args.format {
        Format::Console => Box::new(Console::new(Symbols::default(), args.show)),
        Format::Json => Box::new(Json),
    };
    for target in &targets {
        println!("{}", visualiser.visualise(target)?);
    }

    let verdict = targets
        .iter()
        .map(|target| target.status)
        .reduce(|a, b| a & b)
        .unwrap_or(report.status);
    std::process::exit(if verdict.is_up() { 0 } else { 1 });
}

/// Run one evaluation pass. A failure of the evaluation machinery itself
/// exits with code 2: no verdict could be determined, which is not the
/// same as a `down` verdict.
async fn evaluate(tree: &Arc<Scanner>) -> Report {
    match tree.report().await {
        Ok(report) => report,
        Err(err) => {
            eprintln!("error: could not determine status: {err}");
            std::process::exit(2);
        }
    }
}

/// Resolve `--path` against the report, or keep the whole tree.
fn select<'a>(report: &'a Report, path: Option<&str>) -> anyhow::Result<Vec<&'a Report>> {
    match path {
        Some(path) => {
            let segments: Vec<&str> = path.split('/').collect();
            Ok(report.find_path(&segments)?)
        }
        None => Ok(vec![report]),
    }
}
