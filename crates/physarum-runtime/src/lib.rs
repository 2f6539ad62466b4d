//! # Physarum Runtime
//!
//! Road network, pheromone store, agent walks and the optimization loop.
//!
//! The runtime is the "organism": it lays pheromone over a road network,
//! releases agents that wander between random intersections, and lets the
//! trails they share thicken while unused ones evaporate.

pub mod network;
pub mod pheromone;
pub mod path_finder;
pub mod optimizer;
pub mod extract;
pub mod compare;
pub mod metrics;
pub mod frames;
pub mod snapshot;
pub mod prelude;
