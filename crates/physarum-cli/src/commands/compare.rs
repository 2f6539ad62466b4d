//! Compare the slime route between two nodes with the shortest path.

use anyhow::{bail, Result};
use colored::Colorize;
use physarum::prelude::*;
use tracing::info;

use super::Setup;
use crate::args::{seeded_rng, GraphArgs, RunArgs};
use crate::progress::ProgressObserver;

/// Agents are released between `from` and `to` unless `--start`/`--goal`
/// or `--random-endpoints` say otherwise.
pub fn run(
    from: u64,
    to: u64,
    graph: &GraphArgs,
    args: &RunArgs,
    threshold: Option<f64>,
    random_endpoints: bool,
    verbose: bool,
) -> Result<()> {
    let mut setup = Setup::prepare(graph, args)?;
    let (start, goal) = (NodeId(from), NodeId(to));
    for node in [start, goal] {
        if !setup.network.contains_node(node) {
            bail!("Node {} is not in the road network", node.to_string().cyan());
        }
    }
    if let Some(endpoints) = training_endpoints(start, goal, args, random_endpoints) {
        setup.optimizer = setup.optimizer.with_endpoints(endpoints);
    }
    info!("Comparing {} -> {} with endpoints {:?}", start, goal, setup.optimizer.endpoints());
    setup.announce();

    let mut progress = ProgressObserver::new(setup.optimizer.config().iterations, verbose);
    let pheromone = setup
        .optimizer
        .run_observed(&setup.network, &mut seeded_rng(setup.seed), &mut progress)?;
    progress.finish();

    let threshold = threshold.unwrap_or(setup.config.output.strong_threshold);
    let policy = setup.optimizer.config().parallel_edges;
    let comparison = compare_routes(&setup.network, &pheromone, start, goal, threshold, policy);

    println!();
    println!("{} {} → {}", "Route comparison".white().bold(), start, goal);
    println!("{}", "═".repeat(40).dimmed());
    println!();

    println!("{}", "Slime route".blue().bold());
    println!("  Path:      {}", format_path(&comparison.slime_path));
    println!("  Length:    {:.2}", comparison.slime_length);
    if comparison.slime_reached_goal {
        println!("  Reached:   {}", "yes".green());
    } else {
        println!("  Reached:   {} (no strong edges onward)", "no".red());
    }
    println!();

    println!("{}", "Shortest path".blue().bold());
    match (&comparison.shortest_path, comparison.shortest_length) {
        (Some(path), Some(length)) => {
            println!("  Path:      {}", format_path(path));
            println!("  Length:    {:.2}", length);
        }
        _ => println!("  {}", "goal unreachable".red()),
    }
    println!();

    if let Some(stretch) = comparison.stretch() {
        println!("  Stretch:   {:.3}", stretch);
    }
    println!("  Overlap:   {:.1}%", comparison.overlap() * 100.0);

    println!();
    println!("{}", "═".repeat(40).dimmed());

    Ok(())
}

/// Endpoints to train on. `None` keeps whatever `Setup::prepare` chose.
fn training_endpoints(start: NodeId, goal: NodeId, args: &RunArgs, random: bool) -> Option<Endpoints> {
    if args.endpoints().is_some() {
        return None;
    }
    if random {
        Some(Endpoints::Random)
    } else {
        Some(Endpoints::Fixed(vec![(start, goal)]))
    }
}

fn format_path(path: &[NodeId]) -> String {
    path.iter()
        .map(|node| node.to_string())
        .collect::<Vec<_>>()
        .join(" → ")
}
