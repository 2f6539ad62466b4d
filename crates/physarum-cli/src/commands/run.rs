//! Run the optimizer and save the final pheromone map.

use anyhow::{Context, Result};
use colored::Colorize;
use physarum::prelude::*;
use std::path::Path;
use tracing::info;

use super::Setup;
use crate::args::{seeded_rng, GraphArgs, RunArgs};
use crate::progress::ProgressObserver;

pub fn run(graph: &GraphArgs, args: &RunArgs, output: Option<&str>, top: usize, verbose: bool) -> Result<()> {
    let setup = Setup::prepare(graph, args)?;
    setup.announce();

    let mut progress = ProgressObserver::new(setup.optimizer.config().iterations, verbose);
    let pheromone = setup
        .optimizer
        .run_observed(&setup.network, &mut seeded_rng(setup.seed), &mut progress)?;
    progress.finish();

    // Save snapshot
    let output = output.unwrap_or(&setup.config.output.snapshot);
    let snapshot = PheromoneSnapshot::capture(&pheromone, setup.optimizer.config(), Some(setup.seed));
    save_snapshot(&snapshot, Path::new(output))
        .with_context(|| format!("Failed to write snapshot: {output}"))?;
    info!("Wrote snapshot {} ({} edges) to {}", snapshot.metadata.run_id, snapshot.edges.len(), output);

    let threshold = setup.config.output.strong_threshold;
    let strong = strong_edges(&pheromone, threshold);

    println!();
    println!("{} Optimization complete!", "✓".green().bold());
    println!("  Run:            {}", snapshot.metadata.run_id.dimmed());
    println!("  Total pheromone: {:.3}", pheromone.total());
    println!(
        "  Strong edges:   {} of {} (level > {})",
        strong.len().to_string().green(),
        pheromone.len(),
        threshold
    );
    println!("  Snapshot:       {}", output.cyan());

    if top > 0 && !pheromone.is_empty() {
        let mut ranked = pheromone.sorted_entries();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        println!();
        println!("{}", "Strongest edges".blue().bold());
        for (edge, level) in ranked.into_iter().take(top) {
            let marker = if strong.contains(&edge) { "●".green() } else { "○".dimmed() };
            println!("  {} {:<16} {:.3}", marker, edge.to_string(), level);
        }
    }

    Ok(())
}
