//! Shared types used across the physarum crates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Distance assumed for an edge that carries no length attribute.
pub const DEFAULT_DISTANCE: f64 = 1.0;

/// Pheromone level every edge starts with.
pub const INITIAL_PHEROMONE: f64 = 1.0;

/// Step cap for a single agent walk.
pub const DEFAULT_MAX_STEPS: usize = 200;

/// Identifier of a node (intersection) in the road network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(raw: u64) -> Self {
        NodeId(raw)
    }
}

/// Identifier of a directed edge (road segment).
///
/// The network may hold several edges between the same ordered pair of
/// nodes; `key` tells them apart, starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId {
    pub source: NodeId,
    pub target: NodeId,
    pub key: u32,
}

impl EdgeId {
    pub fn new(source: NodeId, target: NodeId, key: u32) -> Self {
        Self { source, target, key }
    }

    /// Whether this edge continues a walk currently standing at `node`.
    pub fn leaves(&self, node: NodeId) -> bool {
        self.source == node
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}#{}", self.source, self.target, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_ids_order_by_source_then_target_then_key() {
        let mut edges = vec![
            EdgeId::new(NodeId(2), NodeId(1), 0),
            EdgeId::new(NodeId(1), NodeId(3), 1),
            EdgeId::new(NodeId(1), NodeId(3), 0),
        ];
        edges.sort();
        assert_eq!(edges[0], EdgeId::new(NodeId(1), NodeId(3), 0));
        assert_eq!(edges[1], EdgeId::new(NodeId(1), NodeId(3), 1));
        assert_eq!(edges[2].source, NodeId(2));
    }

    #[test]
    fn node_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&NodeId(65_310_211)).unwrap();
        assert_eq!(json, "65310211");
    }

    #[test]
    fn edge_display() {
        assert_eq!(EdgeId::new(NodeId(4), NodeId(9), 1).to_string(), "4->9#1");
    }
}
