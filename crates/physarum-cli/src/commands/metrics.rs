//! Run the optimizer and report pheromone statistics.

use anyhow::Result;
use colored::Colorize;
use physarum::prelude::*;

use super::Setup;
use crate::args::{seeded_rng, GraphArgs, RunArgs};

pub fn run(graph: &GraphArgs, args: &RunArgs, threshold: Option<f64>) -> Result<()> {
    let setup = Setup::prepare(graph, args)?;
    setup.announce();

    let threshold = threshold.unwrap_or(setup.config.output.strong_threshold);
    let (pheromone, metrics) = measure(
        &setup.network,
        &setup.optimizer,
        &mut seeded_rng(setup.seed),
        threshold,
    )?;

    let edge_count = pheromone.len();
    let strong_share = if edge_count > 0 {
        metrics.strong_edges_count as f64 / edge_count as f64 * 100.0
    } else {
        0.0
    };

    println!();
    println!("{}", "Slime Mold Metrics".white().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!();

    println!("{}", "Run".blue().bold());
    println!("  Simulation time:   {:.3} s", metrics.simulation_time.as_secs_f64());
    println!("  Seed:              {}", setup.seed.to_string().cyan());
    println!();

    println!("{}", "Pheromone".blue().bold());
    println!(
        "  Strong edges:      {} ({:.1}%, level > {})",
        metrics.strong_edges_count.to_string().green(),
        strong_share,
        threshold
    );
    println!("  Average level:     {:.4}", metrics.average_pheromone);
    println!("  Std deviation:     {:.4}", metrics.pheromone_std_dev);
    if let Some(max) = pheromone.max_level() {
        println!("  Max level:         {:.4}", max);
    }

    println!();
    println!("{}", "═".repeat(40).dimmed());

    Ok(())
}
