//! Physarum Runtime Prelude - convenient imports for common usage.
//!
//! ```rust
//! use physarum_runtime::prelude::*;
//! ```

// Re-export the road network
pub use crate::network::{RoadNetwork, RoadSegment, GraphFile, SerializedRoad};

// Re-export pheromone store and walks
pub use crate::pheromone::PheromoneMap;
pub use crate::path_finder::{
    PathFinder, ParallelEdgePolicy, Walk, WalkEnd, select_weighted, MIN_DISTANCE,
};

// Re-export the optimizer
pub use crate::optimizer::{
    SlimeMold, OptimizerConfig, Endpoints, Scheduling,
    Observer, NullObserver, OptimizationEvent, optimize,
};

// Re-export extraction, comparison and metrics
pub use crate::extract::{strong_edges, path_to_edges, edges_to_nodes, DEFAULT_STRONG_THRESHOLD};
pub use crate::compare::{compare_routes, greedy_strong_path, RouteComparison};
pub use crate::metrics::{summarize, measure, SlimeMetrics};

// Re-export frames and snapshots
pub use crate::frames::{Frame, FrameRecorder, DEFAULT_FRAME_SCALE};
pub use crate::snapshot::{
    PheromoneSnapshot, SnapshotMetadata, SerializedLevel, save_snapshot, load_snapshot,
};

// Re-export from core
pub use physarum_core::prelude::*;
