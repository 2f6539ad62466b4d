//! Arguments shared by the commands that run the optimizer.

use anyhow::{bail, Context, Result};
use clap::Args;
use physarum::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::Path;
use std::str::FromStr;

/// Where the road network comes from.
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Road network JSON file
    #[arg(short, long, conflicts_with = "grid")]
    pub graph: Option<String>,

    /// Synthetic street grid, e.g. "10x10"
    #[arg(long)]
    pub grid: Option<GridSize>,

    /// Block length of the synthetic grid
    #[arg(long, default_value = "100.0")]
    pub spacing: f64,
}

impl GraphArgs {
    pub fn load(&self) -> Result<RoadNetwork> {
        match (&self.graph, self.grid) {
            (Some(path), _) => RoadNetwork::load(Path::new(path))
                .with_context(|| format!("Failed to load road network: {path}")),
            (None, Some(size)) => RoadNetwork::grid(size.rows, size.cols, self.spacing)
                .with_context(|| format!("Failed to build {size} grid")),
            (None, None) => bail!("No road network given. Use --graph <FILE> or --grid ROWSxCOLS."),
        }
    }
}

/// Rows and columns of a synthetic grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

impl FromStr for GridSize {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (rows, cols) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected ROWSxCOLS, got {s:?}"))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|e| format!("invalid grid dimension {part:?}: {e}"))
        };
        let size = GridSize { rows: parse(rows)?, cols: parse(cols)? };
        if size.rows == 0 || size.cols == 0 {
            return Err(format!("grid must have at least one row and column, got {s:?}"));
        }
        Ok(size)
    }
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Optimizer overrides on top of physarum.toml.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Number of iterations
    #[arg(short, long)]
    pub iterations: Option<usize>,

    /// Agents per iteration
    #[arg(short, long)]
    pub agents: Option<usize>,

    /// Evaporation rate in [0, 1)
    #[arg(short, long)]
    pub evaporation: Option<f64>,

    /// Pheromone exponent
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Inverse-distance exponent
    #[arg(long)]
    pub beta: Option<f64>,

    /// Pheromone deposited per walked edge
    #[arg(long)]
    pub deposit: Option<f64>,

    /// Step cap per walk
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Random seed (default: drawn and printed)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Let all agents of an iteration walk over the same map
    #[arg(long)]
    pub batched: bool,

    /// Only consider the first of several parallel edges
    #[arg(long)]
    pub first_edge_only: bool,

    /// Fixed start node for every agent (requires --goal)
    #[arg(long, requires = "goal")]
    pub start: Option<u64>,

    /// Fixed goal node for every agent (requires --start)
    #[arg(long, requires = "start")]
    pub goal: Option<u64>,
}

impl RunArgs {
    /// Apply the overrides to `config`.
    pub fn apply(&self, config: &mut OptimizerConfig) {
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(agents) = self.agents {
            config.num_agents = agents;
        }
        if let Some(rate) = self.evaporation {
            config.evaporation_rate = rate;
        }
        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
        if let Some(beta) = self.beta {
            config.beta = beta;
        }
        if let Some(deposit) = self.deposit {
            config.deposit_amount = deposit;
        }
        if let Some(max_steps) = self.max_steps {
            config.max_steps = max_steps;
        }
        if self.batched {
            config.scheduling = Scheduling::Batched;
        }
        if self.first_edge_only {
            config.parallel_edges = ParallelEdgePolicy::FirstOnly;
        }
    }

    /// Fixed endpoints, when both `--start` and `--goal` were given.
    pub fn endpoints(&self) -> Option<Endpoints> {
        match (self.start, self.goal) {
            (Some(start), Some(goal)) => Some(Endpoints::Fixed(vec![(NodeId(start), NodeId(goal))])),
            _ => None,
        }
    }

    /// The seed to use, drawing a fresh one when none was given.
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| rand::rng().random())
    }
}

/// Every stochastic command runs on ChaCha8 so a printed seed replays the run.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
