//! Physarum CLI - slime mold route optimization from the command line.

mod args;
mod commands;
mod config;
mod progress;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::args::{GraphArgs, RunArgs};

#[derive(Parser)]
#[command(name = "physarum")]
#[command(author, version, about = "Physarum - Slime mold route optimization", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new Physarum project
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Run the optimizer and save the final pheromone map
    Run {
        #[command(flatten)]
        graph: GraphArgs,

        #[command(flatten)]
        run: RunArgs,

        /// Snapshot file (default: from physarum.toml)
        #[arg(short, long)]
        output: Option<String>,

        /// Number of strongest edges to list
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Run the optimizer and report pheromone statistics
    Metrics {
        #[command(flatten)]
        graph: GraphArgs,

        #[command(flatten)]
        run: RunArgs,

        /// Strong edge threshold (default: from physarum.toml)
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Compare the slime route between two nodes with the shortest path
    Compare {
        /// Start node
        from: u64,

        /// Goal node
        to: u64,

        #[command(flatten)]
        graph: GraphArgs,

        #[command(flatten)]
        run: RunArgs,

        /// Strong edge threshold (default: from physarum.toml)
        #[arg(long)]
        threshold: Option<f64>,

        /// Release agents between random node pairs instead of between FROM and TO
        #[arg(long, conflicts_with_all = ["start", "goal"])]
        random_endpoints: bool,
    },

    /// Record every intermediate pheromone state of a run
    Animate {
        /// Output file for the frames
        output: String,

        #[command(flatten)]
        graph: GraphArgs,

        #[command(flatten)]
        run: RunArgs,

        /// Level drawn at full intensity (default: from physarum.toml)
        #[arg(long)]
        scale: Option<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Run { graph, run, output, top } => {
            commands::run::run(&graph, &run, output.as_deref(), top, cli.verbose)
        }
        Commands::Metrics { graph, run, threshold } => {
            commands::metrics::run(&graph, &run, threshold)
        }
        Commands::Compare { from, to, graph, run, threshold, random_endpoints } => {
            commands::compare::run(from, to, &graph, &run, threshold, random_endpoints, cli.verbose)
        }
        Commands::Animate { output, graph, run, scale } => {
            commands::animate::run(&output, &graph, &run, scale, cli.verbose)
        }
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
