//! # Physarum
//!
//! Slime mold route optimization over directed road networks.
//!
//! Physarum lets a swarm of simple agents discover efficient routes on a
//! road graph. Each agent wanders from a start intersection toward a goal,
//! choosing roads by pheromone level and length. Roads that many agents use
//! get reinforced, unused roads evaporate, and after a few iterations the
//! strong roads trace out a transport network.
//!
//! ## Quick Start
//!
//! ```rust
//! use physarum::prelude::*;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! // A 6x6 street grid with 100 m blocks
//! let network = RoadNetwork::grid(6, 6, 100.0).unwrap();
//!
//! // Run the optimizer
//! let config = OptimizerConfig { iterations: 20, num_agents: 8, ..Default::default() };
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let pheromone = optimize(&network, &config, &mut rng).unwrap();
//!
//! // Keep the roads the colony settled on
//! let strong = strong_edges(&pheromone, DEFAULT_STRONG_THRESHOLD);
//! for edge in &strong {
//!     println!("{edge}: {:.2}", pheromone.level(edge).unwrap_or(0.0));
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`physarum_core`] - Identifiers, the `RoadGraph` trait and errors
//! - [`physarum_runtime`] - Road network, pheromone store, path finder,
//!   optimizer and the analysis helpers built on them
//!
//! ## Key Concepts
//!
//! ### One iteration
//!
//! | Phase | What happens |
//! |-------|--------------|
//! | Evaporate | Every level is multiplied by `1 - evaporation_rate` |
//! | Explore | Each agent walks from its start toward its goal |
//! | Reinforce | Every edge an agent walked gains `deposit_amount` |
//!
//! ### Edge choice
//!
//! An agent at node `u` picks an outgoing edge `e` with probability
//! proportional to `pheromone(e)^alpha * (1 / length(e))^beta`. A walk
//! ends at the goal, at a node with no usable outgoing edge, or after
//! `max_steps` moves. Partial walks are reinforced too.
//!
//! ### Comparing with the shortest route
//!
//! ```rust
//! use physarum::prelude::*;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let network = RoadNetwork::grid(4, 4, 10.0).unwrap();
//! let optimizer = SlimeMold::from_config(OptimizerConfig { iterations: 30, ..Default::default() })
//!     .with_endpoints(Endpoints::Fixed(vec![(NodeId(0), NodeId(15))]));
//! let pheromone = optimizer.run(&network, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
//!
//! let comparison = compare_routes(&network, &pheromone, NodeId(0), NodeId(15), 2.0, ParallelEdgePolicy::All);
//! assert_eq!(comparison.shortest_length, Some(60.0));
//! ```
//!
//! ## Snapshots
//!
//! ```rust,ignore
//! use physarum::prelude::*;
//! use std::path::Path;
//!
//! let snapshot = PheromoneSnapshot::capture(&pheromone, &config, Some(42));
//! save_snapshot(&snapshot, Path::new("pheromone.json")).unwrap();
//! let restored = load_snapshot(Path::new("pheromone.json")).unwrap().to_pheromone();
//! ```

// Re-export all subcrates
pub use physarum_core as core;
pub use physarum_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use physarum::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use physarum_core::types::{
        NodeId, EdgeId,
        DEFAULT_DISTANCE, INITIAL_PHEROMONE, DEFAULT_MAX_STEPS,
    };

    // Core traits
    pub use physarum_core::graph::RoadGraph;

    // Error types
    pub use physarum_core::error::{PhysarumError, ConfigError, GraphError, Result};

    // Road network
    pub use physarum_runtime::network::{RoadNetwork, GraphFile};

    // Optimization
    pub use physarum_runtime::pheromone::PheromoneMap;
    pub use physarum_runtime::path_finder::{PathFinder, ParallelEdgePolicy, Walk, WalkEnd};
    pub use physarum_runtime::optimizer::{
        SlimeMold, OptimizerConfig, Endpoints, Scheduling,
        Observer, NullObserver, OptimizationEvent, optimize,
    };

    // Analysis
    pub use physarum_runtime::extract::{strong_edges, path_to_edges, edges_to_nodes, DEFAULT_STRONG_THRESHOLD};
    pub use physarum_runtime::compare::{compare_routes, greedy_strong_path, RouteComparison};
    pub use physarum_runtime::metrics::{summarize, measure, SlimeMetrics};
    pub use physarum_runtime::frames::{Frame, FrameRecorder, DEFAULT_FRAME_SCALE};
    pub use physarum_runtime::snapshot::{
        PheromoneSnapshot, SnapshotMetadata, save_snapshot, load_snapshot,
    };
}
