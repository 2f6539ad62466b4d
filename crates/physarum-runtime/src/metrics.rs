//! Descriptive metrics for a pheromone map.
//!
//! Summarizes how concentrated a run's pheromone ended up:
//! - Strong edge count: edges above the threshold
//! - Average level: mean over all edges
//! - Standard deviation: sample spread of levels
//! - Simulation time: wall-clock time of the run, when measured

use crate::extract::strong_edges;
use crate::optimizer::SlimeMold;
use crate::pheromone::PheromoneMap;
use physarum_core::error::Result;
use physarum_core::graph::RoadGraph;
use rand::Rng;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Summary statistics of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlimeMetrics {
    /// Wall-clock duration of the run. Zero when only the map was summarized.
    pub simulation_time: Duration,
    pub strong_edges_count: usize,
    /// Mean level; 0 for an empty map.
    pub average_pheromone: f64,
    /// Sample standard deviation; 0 with fewer than two edges.
    pub pheromone_std_dev: f64,
}

/// Summarize an existing pheromone map.
pub fn summarize(pheromone: &PheromoneMap, strong_threshold: f64) -> SlimeMetrics {
    let count = pheromone.len();
    let average = if count > 0 {
        pheromone.total() / count as f64
    } else {
        0.0
    };

    let std_dev = if count > 1 {
        let squares: f64 = pheromone
            .iter()
            .map(|(_, level)| (level - average).powi(2))
            .sum();
        (squares / (count - 1) as f64).sqrt()
    } else {
        0.0
    };

    SlimeMetrics {
        simulation_time: Duration::ZERO,
        strong_edges_count: strong_edges(pheromone, strong_threshold).len(),
        average_pheromone: average,
        pheromone_std_dev: std_dev,
    }
}

/// Run `optimizer` over `graph`, timing it, and summarize the result.
pub fn measure<G, R>(
    graph: &G,
    optimizer: &SlimeMold,
    rng: &mut R,
    strong_threshold: f64,
) -> Result<(PheromoneMap, SlimeMetrics)>
where
    G: RoadGraph + ?Sized,
    R: Rng + ?Sized,
{
    let started = Instant::now();
    let pheromone = optimizer.run(graph, rng)?;
    let elapsed = started.elapsed();

    let metrics = SlimeMetrics {
        simulation_time: elapsed,
        ..summarize(&pheromone, strong_threshold)
    };
    Ok((pheromone, metrics))
}
