//! Optimizer: the slime mold simulation loop.
//!
//! A run owns one pheromone map. Each iteration:
//! 1. Every edge evaporates by `evaporation_rate`
//! 2. `num_agents` agents each pick a start and a goal and walk
//! 3. Every edge an agent walked is reinforced by `deposit_amount`
//!
//! Evaporation of iteration *i* completes before any agent of *i* reads the
//! map, and every deposit of *i* lands before evaporation of *i + 1*.
//! Configuration is validated up front; an invalid run never touches the map.

use crate::path_finder::{ParallelEdgePolicy, PathFinder, Walk, WalkEnd};
use crate::pheromone::PheromoneMap;
use physarum_core::error::{GraphError, PhysarumError, Result};
use physarum_core::graph::RoadGraph;
use physarum_core::types::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

/// How the agents of one iteration share the pheromone map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheduling {
    /// Agents walk one after another; each sees the deposits of those before it.
    #[default]
    Sequential,
    /// All agents of an iteration walk over the freshly evaporated map, then
    /// their deposits are applied in agent order. Walks run on the rayon
    /// pool when the `parallel` feature is enabled; results are identical
    /// either way.
    Batched,
}

/// How agents choose where to start and where to go.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoints {
    /// Two distinct nodes drawn uniformly at random per agent.
    #[default]
    Random,
    /// Caller-supplied `(start, goal)` pairs, assigned to agents round-robin.
    Fixed(Vec<(NodeId, NodeId)>),
}

/// Configuration for a slime mold run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Number of evaporate/explore/reinforce rounds (default: 10).
    pub iterations: usize,
    /// Agents released per iteration (default: 5).
    pub num_agents: usize,
    /// Fraction of pheromone lost per iteration, in `[0, 1)` (default: 0.1).
    pub evaporation_rate: f64,
    /// Pheromone exponent (default: 1.0).
    pub alpha: f64,
    /// Inverse-distance exponent (default: 1.0).
    pub beta: f64,
    /// Pheromone added to each walked edge (default: 1.0).
    pub deposit_amount: f64,
    /// Step cap per walk (default: 200).
    pub max_steps: usize,
    pub parallel_edges: ParallelEdgePolicy,
    pub scheduling: Scheduling,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            num_agents: 5,
            evaporation_rate: 0.1,
            alpha: 1.0,
            beta: 1.0,
            deposit_amount: 1.0,
            max_steps: DEFAULT_MAX_STEPS,
            parallel_edges: ParallelEdgePolicy::default(),
            scheduling: Scheduling::default(),
        }
    }
}

impl OptimizerConfig {
    /// Reject parameter values that would produce meaningless pheromone.
    pub fn validate(&self) -> Result<()> {
        let rate = self.evaporation_rate;
        if !(0.0..1.0).contains(&rate) {
            return Err(PhysarumError::out_of_range("evaporation_rate", 0.0, 1.0, rate));
        }
        if !self.alpha.is_finite() {
            return Err(PhysarumError::invalid_config("alpha", self.alpha.to_string(), "must be finite"));
        }
        if !self.beta.is_finite() {
            return Err(PhysarumError::invalid_config("beta", self.beta.to_string(), "must be finite"));
        }
        if !self.deposit_amount.is_finite() || self.deposit_amount < 0.0 {
            return Err(PhysarumError::invalid_config(
                "deposit_amount",
                self.deposit_amount.to_string(),
                "must be finite and non-negative",
            ));
        }
        Ok(())
    }

    /// Walk parameters derived from this config.
    pub fn path_finder(&self) -> PathFinder {
        PathFinder::new(self.alpha, self.beta)
            .with_max_steps(self.max_steps)
            .with_parallel_edges(self.parallel_edges)
    }

    /// Whether a run with this config releases any agent.
    pub fn has_agents(&self) -> bool {
        self.iterations > 0 && self.num_agents > 0
    }
}

/// Event emitted by the optimizer during a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum OptimizationEvent {
    /// The whole map evaporated at the start of an iteration.
    Evaporated { iteration: usize },
    /// An agent finished its walk and its deposit was applied.
    AgentFinished {
        iteration: usize,
        agent: usize,
        start: NodeId,
        goal: NodeId,
        steps: usize,
        end: WalkEnd,
    },
    /// An iteration completed.
    IterationComplete {
        iteration: usize,
        total_pheromone: f64,
        agents_arrived: usize,
    },
}

/// Receives events together with the pheromone map as it stands right after them.
pub trait Observer {
    fn on_event(&mut self, event: &OptimizationEvent, pheromone: &PheromoneMap);
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl Observer for NullObserver {
    fn on_event(&mut self, _event: &OptimizationEvent, _pheromone: &PheromoneMap) {}
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn on_event(&mut self, event: &OptimizationEvent, pheromone: &PheromoneMap) {
        (**self).on_event(event, pheromone);
    }
}

impl<A: Observer, B: Observer> Observer for (A, B) {
    fn on_event(&mut self, event: &OptimizationEvent, pheromone: &PheromoneMap) {
        self.0.on_event(event, pheromone);
        self.1.on_event(event, pheromone);
    }
}

/// The slime mold optimizer.
#[derive(Debug, Clone, Default)]
pub struct SlimeMold {
    config: OptimizerConfig,
    endpoints: Endpoints,
}

impl SlimeMold {
    /// Create an optimizer with default configuration.
    pub fn new() -> Self {
        Self::from_config(OptimizerConfig::default())
    }

    /// Create an optimizer with the specified configuration.
    pub fn from_config(config: OptimizerConfig) -> Self {
        Self {
            config,
            endpoints: Endpoints::Random,
        }
    }

    /// Set how agents choose their start and goal.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Run the simulation and return the final pheromone map.
    pub fn run<G, R>(&self, graph: &G, rng: &mut R) -> Result<PheromoneMap>
    where
        G: RoadGraph + ?Sized,
        R: Rng + ?Sized,
    {
        self.run_observed(graph, rng, &mut NullObserver)
    }

    /// Run the simulation, reporting every event to `observer`.
    ///
    /// `rng` only seeds the per-agent streams, so a fixed seed reproduces the
    /// run bit for bit under either scheduling.
    pub fn run_observed<G, R, O>(&self, graph: &G, rng: &mut R, observer: &mut O) -> Result<PheromoneMap>
    where
        G: RoadGraph + ?Sized,
        R: Rng + ?Sized,
        O: Observer + ?Sized,
    {
        self.config.validate()?;
        let nodes = graph.nodes();
        self.check_endpoints(graph, &nodes)?;

        let finder = self.config.path_finder();
        let mut pheromone = PheromoneMap::initialize(graph);
        info!(
            "Starting slime mold run: {} iterations x {} agents over {} nodes, {} edges",
            self.config.iterations,
            self.config.num_agents,
            nodes.len(),
            pheromone.len()
        );

        for iteration in 0..self.config.iterations {
            pheromone.evaporate(self.config.evaporation_rate);
            observer.on_event(&OptimizationEvent::Evaporated { iteration }, &pheromone);

            let seeds: Vec<u64> = (0..self.config.num_agents).map(|_| rng.random()).collect();
            let mut arrived = 0;

            match self.config.scheduling {
                Scheduling::Sequential => {
                    for (agent, seed) in seeds.into_iter().enumerate() {
                        let walk = self.agent_walk(graph, &nodes, &finder, &pheromone, agent, seed);
                        arrived += usize::from(walk.reached_goal());
                        self.deposit(&mut pheromone, iteration, agent, &walk, observer);
                    }
                }
                Scheduling::Batched => {
                    let walks = self.batched_walks(graph, &nodes, &finder, &pheromone, &seeds);
                    for (agent, walk) in walks.iter().enumerate() {
                        arrived += usize::from(walk.reached_goal());
                        self.deposit(&mut pheromone, iteration, agent, walk, observer);
                    }
                }
            }

            let total = pheromone.total();
            debug!(
                "Iteration {}: {}/{} agents arrived, total pheromone {:.3}",
                iteration, arrived, self.config.num_agents, total
            );
            observer.on_event(
                &OptimizationEvent::IterationComplete {
                    iteration,
                    total_pheromone: total,
                    agents_arrived: arrived,
                },
                &pheromone,
            );
        }

        info!("Slime mold run complete: total pheromone {:.3}", pheromone.total());
        Ok(pheromone)
    }

    fn check_endpoints<G: RoadGraph + ?Sized>(&self, graph: &G, nodes: &[NodeId]) -> Result<()> {
        if !self.config.has_agents() {
            return Ok(());
        }
        match &self.endpoints {
            Endpoints::Random => {
                if nodes.len() < 2 {
                    return Err(GraphError::TooFewNodes { found: nodes.len() }.into());
                }
            }
            Endpoints::Fixed(pairs) => {
                if pairs.is_empty() {
                    return Err(PhysarumError::invalid_config(
                        "endpoints",
                        "[]",
                        "at least one start/goal pair is required",
                    ));
                }
                for (start, goal) in pairs {
                    for node in [start, goal] {
                        if !graph.contains_node(*node) {
                            return Err(PhysarumError::node_not_found(node.0));
                        }
                    }
                    if start == goal {
                        return Err(GraphError::SameEndpoints(start.0).into());
                    }
                }
            }
        }
        Ok(())
    }

    fn pick_endpoints<R: Rng + ?Sized>(&self, nodes: &[NodeId], agent: usize, rng: &mut R) -> (NodeId, NodeId) {
        match &self.endpoints {
            Endpoints::Random => {
                let start = rng.random_range(0..nodes.len());
                // Draw from the remaining n - 1 nodes so start != goal without retries.
                let mut goal = rng.random_range(0..nodes.len() - 1);
                if goal >= start {
                    goal += 1;
                }
                (nodes[start], nodes[goal])
            }
            Endpoints::Fixed(pairs) => pairs[agent % pairs.len()],
        }
    }

    fn agent_walk<G: RoadGraph + ?Sized>(
        &self,
        graph: &G,
        nodes: &[NodeId],
        finder: &PathFinder,
        pheromone: &PheromoneMap,
        agent: usize,
        seed: u64,
    ) -> Walk {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (start, goal) = self.pick_endpoints(nodes, agent, &mut rng);
        finder.walk(graph, pheromone, start, goal, &mut rng)
    }

    #[cfg(feature = "parallel")]
    fn batched_walks<G: RoadGraph + ?Sized>(
        &self,
        graph: &G,
        nodes: &[NodeId],
        finder: &PathFinder,
        pheromone: &PheromoneMap,
        seeds: &[u64],
    ) -> Vec<Walk> {
        use rayon::prelude::*;

        seeds
            .par_iter()
            .enumerate()
            .map(|(agent, seed)| self.agent_walk(graph, nodes, finder, pheromone, agent, *seed))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn batched_walks<G: RoadGraph + ?Sized>(
        &self,
        graph: &G,
        nodes: &[NodeId],
        finder: &PathFinder,
        pheromone: &PheromoneMap,
        seeds: &[u64],
    ) -> Vec<Walk> {
        seeds
            .iter()
            .enumerate()
            .map(|(agent, seed)| self.agent_walk(graph, nodes, finder, pheromone, agent, *seed))
            .collect()
    }

    fn deposit<O: Observer + ?Sized>(
        &self,
        pheromone: &mut PheromoneMap,
        iteration: usize,
        agent: usize,
        walk: &Walk,
        observer: &mut O,
    ) {
        pheromone.reinforce(&walk.edges, self.config.deposit_amount);
        trace!(
            "Agent {} ({} -> {}): {} steps, {:?}",
            agent,
            walk.start,
            walk.goal,
            walk.len(),
            walk.end
        );
        observer.on_event(
            &OptimizationEvent::AgentFinished {
                iteration,
                agent,
                start: walk.start,
                goal: walk.goal,
                steps: walk.len(),
                end: walk.end,
            },
            pheromone,
        );
    }
}

/// Run a slime mold optimization with random endpoints.
///
/// Convenience wrapper around [`SlimeMold::run`].
pub fn optimize<G, R>(graph: &G, config: &OptimizerConfig, rng: &mut R) -> Result<PheromoneMap>
where
    G: RoadGraph + ?Sized,
    R: Rng + ?Sized,
{
    SlimeMold::from_config(config.clone()).run(graph, rng)
}
