//! Path finder: one agent's probabilistic walk.
//!
//! Standing on a node, the agent scores each outgoing edge by
//! `pheromone^alpha * (1 / distance)^beta` and spins a roulette wheel over
//! those scores. Scores that overflow to infinity outrank every finite
//! one; several of them split the draw evenly. It stops on reaching the
//! goal, at a dead end, when no edge has a usable score, or after
//! `max_steps` moves. None of these are errors:
//! an agent that never arrives just returns a shorter trail.

use crate::pheromone::PheromoneMap;
use physarum_core::graph::RoadGraph;
use physarum_core::types::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Distances are floored at this value so zero-length segments get a large
/// but finite score instead of a division by zero.
pub const MIN_DISTANCE: f64 = 1e-9;

/// Which of several parallel edges between the same node pair an agent may take.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParallelEdgePolicy {
    /// Every parallel edge is its own candidate on the wheel.
    #[default]
    All,
    /// Only the edge with key 0 is considered; the others are never walked.
    FirstOnly,
}

impl ParallelEdgePolicy {
    /// Whether an agent under this policy may take `edge`.
    pub fn admits(self, edge: &EdgeId) -> bool {
        match self {
            ParallelEdgePolicy::All => true,
            ParallelEdgePolicy::FirstOnly => edge.key == 0,
        }
    }
}

/// Why a walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkEnd {
    /// The agent stands on the goal.
    ReachedGoal,
    /// The current node has no outgoing edges.
    DeadEnd,
    /// Outgoing edges exist but none has a positive, finite score.
    NoViableEdge,
    /// `max_steps` moves were made without reaching the goal.
    StepLimit,
}

/// The trail left by one agent.
#[derive(Debug, Clone, PartialEq)]
pub struct Walk {
    pub start: NodeId,
    pub goal: NodeId,
    /// Edges in the order they were walked.
    pub edges: Vec<EdgeId>,
    pub end: WalkEnd,
}

impl Walk {
    pub fn reached_goal(&self) -> bool {
        self.end == WalkEnd::ReachedGoal
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Node sequence visited, starting with `start`.
    pub fn nodes(&self) -> Vec<NodeId> {
        std::iter::once(self.start)
            .chain(self.edges.iter().map(|edge| edge.target))
            .collect()
    }

    /// Node the agent stopped on.
    pub fn last_node(&self) -> NodeId {
        self.edges.last().map(|edge| edge.target).unwrap_or(self.start)
    }

    pub fn into_edges(self) -> Vec<EdgeId> {
        self.edges
    }
}

/// Walk parameters shared by every agent of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathFinder {
    /// Exponent on the pheromone level. 0 ignores pheromone.
    pub alpha: f64,
    /// Exponent on inverse distance. 0 ignores distance.
    pub beta: f64,
    pub max_steps: usize,
    pub parallel_edges: ParallelEdgePolicy,
}

impl Default for PathFinder {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl PathFinder {
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self {
            alpha,
            beta,
            max_steps: DEFAULT_MAX_STEPS,
            parallel_edges: ParallelEdgePolicy::default(),
        }
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_parallel_edges(mut self, policy: ParallelEdgePolicy) -> Self {
        self.parallel_edges = policy;
        self
    }

    /// Selection score of an edge with the given pheromone level and length.
    pub fn edge_weight(&self, level: f64, distance: f64) -> f64 {
        let inverse_distance = 1.0 / distance.max(MIN_DISTANCE);
        level.powf(self.alpha) * inverse_distance.powf(self.beta)
    }

    /// Scored outgoing edges of `node`, in the graph's enumeration order.
    ///
    /// Edges missing from the pheromone map are skipped.
    pub fn candidates<G: RoadGraph + ?Sized>(
        &self,
        graph: &G,
        pheromone: &PheromoneMap,
        node: NodeId,
    ) -> Vec<(EdgeId, f64)> {
        self.score(graph, pheromone, graph.out_edges(node))
    }

    fn score<G: RoadGraph + ?Sized>(
        &self,
        graph: &G,
        pheromone: &PheromoneMap,
        out_edges: Vec<EdgeId>,
    ) -> Vec<(EdgeId, f64)> {
        out_edges
            .into_iter()
            .filter(|edge| self.parallel_edges.admits(edge))
            .filter_map(|edge| {
                let level = pheromone.level(&edge)?;
                Some((edge, self.edge_weight(level, graph.distance(&edge))))
            })
            .collect()
    }

    /// Walk from `start` toward `goal`.
    pub fn walk<G, R>(
        &self,
        graph: &G,
        pheromone: &PheromoneMap,
        start: NodeId,
        goal: NodeId,
        rng: &mut R,
    ) -> Walk
    where
        G: RoadGraph + ?Sized,
        R: Rng + ?Sized,
    {
        let mut edges = Vec::new();
        let mut current = start;

        for _ in 0..self.max_steps {
            if current == goal {
                return Walk { start, goal, edges, end: WalkEnd::ReachedGoal };
            }

            let out_edges = graph.out_edges(current);
            if out_edges.is_empty() {
                return Walk { start, goal, edges, end: WalkEnd::DeadEnd };
            }

            let candidates = self.score(graph, pheromone, out_edges);
            let weights: Vec<f64> = candidates.iter().map(|(_, w)| *w).collect();
            let Some(choice) = select_weighted(&weights, rng) else {
                return Walk { start, goal, edges, end: WalkEnd::NoViableEdge };
            };

            let chosen = candidates[choice].0;
            edges.push(chosen);
            current = chosen.target;
        }

        let end = if current == goal {
            WalkEnd::ReachedGoal
        } else {
            WalkEnd::StepLimit
        };
        Walk { start, goal, edges, end }
    }
}

/// Roulette-wheel selection over `weights`.
///
/// Draws `r` uniformly from `[0, total)` and returns the first index whose
/// cumulative weight reaches `r`. Zero, negative and NaN weights never win.
/// If any weight is `+inf`, one of the infinite weights is picked uniformly.
/// Returns `None` when nothing is selectable.
pub fn select_weighted<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let infinite: Vec<usize> = weights
        .iter()
        .enumerate()
        .filter(|(_, w)| **w == f64::INFINITY)
        .map(|(i, _)| i)
        .collect();
    if !infinite.is_empty() {
        return Some(infinite[rng.random_range(0..infinite.len())]);
    }

    let usable = |w: f64| w > 0.0 && w.is_finite();
    // Scale by the largest weight so the total cannot overflow.
    let max = weights.iter().copied().filter(|w| usable(*w)).fold(0.0, f64::max);
    if max <= 0.0 {
        return None;
    }
    let total: f64 = weights.iter().copied().filter(|w| usable(*w)).map(|w| w / max).sum();

    let draw = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    let mut last = None;
    for (i, &weight) in weights.iter().enumerate() {
        if !usable(weight) {
            continue;
        }
        cumulative += weight / max;
        last = Some(i);
        if cumulative >= draw {
            return Some(i);
        }
    }
    // Rounding left the draw just above the final cumulative sum.
    last
}
