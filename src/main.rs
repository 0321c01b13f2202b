mod report;

use std::error::Error;
use std::path::PathBuf;

use barframe::Model;
use clap::Parser;
use report::{collect_rows, render_report};
use tracing_subscriber::EnvFilter;

/// Print the local coordinate system of every bar in a model file.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the JSON model file.
    model: PathBuf,
    /// Override the parallel tolerance from the model settings.
    #[arg(long, value_name = "EPS")]
    parallel_epsilon: Option<f64>,
    /// Emit a JSON array instead of a text report.
    #[arg(long)]
    json: bool,
    /// Log which auxiliary vector each bar used.
    #[arg(short, long)]
    verbose: bool,
}

/// Send log events to stderr, filtered by `RUST_LOG` unless `--verbose` is set.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("barframe=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let source = std::fs::read_to_string(&cli.model)
        .map_err(|err| format!("could not read {}: {err}", cli.model.display()))?;
    let mut model = Model::from_json(&source)?;
    if let Some(eps) = cli.parallel_epsilon {
        model.settings.parallel_epsilon = eps;
    }

    // Settings are validated here, before any frame is computed.
    let built = model.build()?;
    tracing::info!(
        nodes = built.structure.node_count(),
        bars = built.structure.bar_count(),
        "model loaded"
    );

    let rows = collect_rows(&built);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", render_report(&rows));
    }

    Ok(())
}
