//! Edge extraction helpers for code that renders or compares results.

use crate::pheromone::PheromoneMap;
use physarum_core::types::*;
use std::collections::BTreeSet;

/// Default level above which an edge counts as part of the slime network.
pub const DEFAULT_STRONG_THRESHOLD: f64 = 2.0;

/// Edges whose level is strictly greater than `threshold`.
pub fn strong_edges(pheromone: &PheromoneMap, threshold: f64) -> BTreeSet<EdgeId> {
    pheromone
        .iter()
        .filter(|(_, level)| **level > threshold)
        .map(|(edge, _)| *edge)
        .collect()
}

/// Turn a node sequence into the edges connecting consecutive nodes.
///
/// Every edge gets key 0: a node sequence cannot say which of several
/// parallel edges was meant.
pub fn path_to_edges(nodes: &[NodeId]) -> Vec<EdgeId> {
    nodes
        .windows(2)
        .map(|pair| EdgeId::new(pair[0], pair[1], 0))
        .collect()
}

/// Node sequence visited by a contiguous edge sequence.
///
/// Returns an empty vector for an empty edge list.
pub fn edges_to_nodes(edges: &[EdgeId]) -> Vec<NodeId> {
    match edges.first() {
        Some(first) => std::iter::once(first.source)
            .chain(edges.iter().map(|edge| edge.target))
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_edges_use_strict_threshold() {
        let a = EdgeId::new(NodeId(1), NodeId(2), 0);
        let b = EdgeId::new(NodeId(2), NodeId(3), 0);
        let c = EdgeId::new(NodeId(2), NodeId(3), 1);
        let map = PheromoneMap::from_levels([(a, 2.0), (b, 2.0001), (c, 7.5)]);

        let strong = strong_edges(&map, DEFAULT_STRONG_THRESHOLD);
        assert_eq!(strong.into_iter().collect::<Vec<_>>(), vec![b, c]);
        assert!(strong_edges(&PheromoneMap::default(), 0.0).is_empty());
    }

    #[test]
    fn path_to_edges_pairs_consecutive_nodes_with_key_zero() {
        let nodes = [NodeId(5), NodeId(9), NodeId(2)];
        assert_eq!(
            path_to_edges(&nodes),
            vec![
                EdgeId::new(NodeId(5), NodeId(9), 0),
                EdgeId::new(NodeId(9), NodeId(2), 0),
            ]
        );
        assert!(path_to_edges(&[NodeId(5)]).is_empty());
        assert!(path_to_edges(&[]).is_empty());
    }

    #[test]
    fn edges_to_nodes_inverts_path_to_edges() {
        let nodes = vec![NodeId(1), NodeId(4), NodeId(3), NodeId(8)];
        assert_eq!(edges_to_nodes(&path_to_edges(&nodes)), nodes);
        assert!(edges_to_nodes(&[]).is_empty());
    }
}
