//! Graph accessor: the road network as the simulation sees it.
//!
//! The optimizer never owns or mutates the network. It only enumerates
//! nodes, follows outgoing edges, and asks how long an edge is.

use crate::types::*;

/// Read-only view of a directed, weighted multi-edge graph.
///
/// Enumeration order must be stable for a given graph: roulette-wheel
/// selection depends on candidate order, so seeded runs only reproduce
/// when it does not change.
pub trait RoadGraph: Send + Sync {
    /// All node IDs.
    fn nodes(&self) -> Vec<NodeId>;

    /// Outgoing edges of `node`. Unknown nodes have none.
    fn out_edges(&self, node: NodeId) -> Vec<EdgeId>;

    /// All edges.
    fn edges(&self) -> Vec<EdgeId>;

    /// Length of an edge. Falls back to [`DEFAULT_DISTANCE`] when the
    /// graph has no length for it.
    fn distance(&self, edge: &EdgeId) -> f64;

    /// Whether the graph contains `node`.
    fn contains_node(&self, node: NodeId) -> bool {
        self.nodes().contains(&node)
    }

    /// Number of nodes.
    fn node_count(&self) -> usize {
        self.nodes().len()
    }

    /// Number of edges.
    fn edge_count(&self) -> usize {
        self.edges().len()
    }
}

impl<G: RoadGraph + ?Sized> RoadGraph for &G {
    fn nodes(&self) -> Vec<NodeId> {
        (**self).nodes()
    }

    fn out_edges(&self, node: NodeId) -> Vec<EdgeId> {
        (**self).out_edges(node)
    }

    fn edges(&self) -> Vec<EdgeId> {
        (**self).edges()
    }

    fn distance(&self, edge: &EdgeId) -> f64 {
        (**self).distance(edge)
    }

    fn contains_node(&self, node: NodeId) -> bool {
        (**self).contains_node(node)
    }

    fn node_count(&self) -> usize {
        (**self).node_count()
    }

    fn edge_count(&self) -> usize {
        (**self).edge_count()
    }
}
