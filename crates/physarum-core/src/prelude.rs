//! Physarum Core Prelude - convenient imports for common usage.
//!
//! ```rust
//! use physarum_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{
    NodeId, EdgeId,
    DEFAULT_DISTANCE, INITIAL_PHEROMONE, DEFAULT_MAX_STEPS,
};

// Re-export the RoadGraph trait
pub use crate::graph::RoadGraph;

// Re-export error types
pub use crate::error::{PhysarumError, ConfigError, GraphError, Result};
