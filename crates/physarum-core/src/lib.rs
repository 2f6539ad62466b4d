//! # Physarum Core
//!
//! Core types and traits for slime mold path reinforcement.
//!
//! *Physarum polycephalum* finds efficient routes between food sources by
//! thickening the tubes that carry the most flow and letting the rest wither.
//! This crate defines the vocabulary shared by every other crate:
//!
//! - **NodeId / EdgeId** - identifiers of a directed multi-edge road network
//! - **RoadGraph** - read-only accessor the simulation walks over
//! - **PhysarumError** - configuration and graph errors reported at the driver's entry
//!
//! ## Quick Start
//!
//! ```rust
//! use physarum_core::prelude::*;
//!
//! let edge = EdgeId::new(NodeId(1), NodeId(2), 0);
//! assert_eq!(edge.source, NodeId(1));
//! assert_eq!(edge.key, 0);
//! ```

pub mod types;
pub mod graph;
pub mod error;
pub mod prelude;
