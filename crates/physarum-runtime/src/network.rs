//! Concrete implementation of the RoadGraph trait using petgraph.
//!
//! The road network is a directed multigraph: one-way streets are single
//! edges, two-way streets are a pair, and parallel edges between the same
//! ordered pair of intersections are told apart by their key. Storage is
//! petgraph's `Graph` with a HashMap index for O(1) node lookup by ID.

use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Directed;
use physarum_core::error::{GraphError, PhysarumError, Result};
use physarum_core::graph::RoadGraph;
use physarum_core::types::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Edge payload stored in the petgraph backing graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadSegment {
    /// Parallel-edge index between the same ordered node pair.
    pub key: u32,
    /// Length in the network's unit (meters for OSM data), if known.
    pub length: Option<f64>,
}

/// Petgraph-backed road network.
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    graph: Graph<NodeId, RoadSegment, Directed>,
    /// Map from our NodeId to petgraph's internal index.
    node_index: HashMap<NodeId, NodeIndex>,
}

impl RoadNetwork {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            node_index: HashMap::new(),
        }
    }

    /// Add a node. Adding an existing node is a no-op.
    pub fn add_node(&mut self, id: NodeId) -> NodeId {
        self.index_of_or_insert(id);
        id
    }

    /// Add a directed edge and return its identifier.
    ///
    /// Missing endpoints are created. The key is the number of edges that
    /// already connect `source` to `target`, so the first edge gets key 0.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, length: Option<f64>) -> Result<EdgeId> {
        if let Some(distance) = length {
            if distance.is_nan() || distance < 0.0 {
                return Err(GraphError::InvalidDistance {
                    from: source.0,
                    to: target.0,
                    distance,
                }
                .into());
            }
        }

        let from_idx = self.index_of_or_insert(source);
        let to_idx = self.index_of_or_insert(target);
        let key = self.graph.edges_connecting(from_idx, to_idx).count() as u32;
        self.graph.add_edge(from_idx, to_idx, RoadSegment { key, length });
        Ok(EdgeId::new(source, target, key))
    }

    /// Add a pair of opposite edges with the same length (a two-way street).
    pub fn add_two_way(&mut self, a: NodeId, b: NodeId, length: Option<f64>) -> Result<(EdgeId, EdgeId)> {
        let forward = self.add_edge(a, b, length)?;
        let backward = self.add_edge(b, a, length)?;
        Ok((forward, backward))
    }

    /// Build a `rows x cols` street grid with two-way streets of length `spacing`.
    ///
    /// Node `r * cols + c` sits at row `r`, column `c`.
    pub fn grid(rows: usize, cols: usize, spacing: f64) -> Result<Self> {
        let mut network = Self::new();
        let id = |r: usize, c: usize| NodeId((r * cols + c) as u64);

        for r in 0..rows {
            for c in 0..cols {
                network.add_node(id(r, c));
            }
        }
        for r in 0..rows {
            for c in 0..cols {
                if c + 1 < cols {
                    network.add_two_way(id(r, c), id(r, c + 1), Some(spacing))?;
                }
                if r + 1 < rows {
                    network.add_two_way(id(r, c), id(r + 1, c), Some(spacing))?;
                }
            }
        }
        Ok(network)
    }

    /// Stored length of an edge, `None` when the edge has no length or does not exist.
    pub fn length(&self, edge: &EdgeId) -> Option<f64> {
        self.segment(edge).and_then(|segment| segment.length)
    }

    /// Whether the network contains `edge`.
    pub fn contains_edge(&self, edge: &EdgeId) -> bool {
        self.segment(edge).is_some()
    }

    /// Shortest path by edge length between two nodes.
    ///
    /// Runs A* with a zero heuristic, which is Dijkstra. Parallel edges are
    /// considered individually, so the cheapest one wins. Returns the node
    /// sequence and its total length.
    pub fn shortest_path(&self, from: &NodeId, to: &NodeId) -> Option<(Vec<NodeId>, f64)> {
        let from_idx = *self.node_index.get(from)?;
        let to_idx = *self.node_index.get(to)?;

        let (cost, indices) = petgraph::algo::astar(
            &self.graph,
            from_idx,
            |idx| idx == to_idx,
            |edge| edge.weight().length.unwrap_or(DEFAULT_DISTANCE),
            |_| 0.0,
        )?;

        let path = indices.into_iter().map(|idx| self.graph[idx]).collect();
        Some((path, cost))
    }

    /// Total length of the cheapest edges along a node sequence.
    ///
    /// Returns `None` if two consecutive nodes are not connected.
    pub fn path_length(&self, nodes: &[NodeId]) -> Option<f64> {
        let mut total = 0.0;
        for pair in nodes.windows(2) {
            let from_idx = *self.node_index.get(&pair[0])?;
            let to_idx = *self.node_index.get(&pair[1])?;
            let cheapest = self
                .graph
                .edges_connecting(from_idx, to_idx)
                .map(|edge| edge.weight().length.unwrap_or(DEFAULT_DISTANCE))
                .fold(None, |best: Option<f64>, len| Some(best.map_or(len, |b| b.min(len))))?;
            total += cheapest;
        }
        Some(total)
    }

    /// Parse a network from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: GraphFile = serde_json::from_str(json)?;
        Self::try_from(file)
    }

    /// Load a network from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Save the network to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.to_file())?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Serializable form of the network.
    pub fn to_file(&self) -> GraphFile {
        let nodes = self.graph.node_indices().map(|idx| self.graph[idx]).collect();
        let edges = self
            .graph
            .edge_indices()
            .filter_map(|idx| {
                let (a, b) = self.graph.edge_endpoints(idx)?;
                Some(SerializedRoad {
                    source: self.graph[a],
                    target: self.graph[b],
                    length: self.graph[idx].length,
                })
            })
            .collect();
        GraphFile { nodes, edges }
    }

    fn index_of_or_insert(&mut self, id: NodeId) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(id);
        self.node_index.insert(id, idx);
        idx
    }

    fn segment(&self, edge: &EdgeId) -> Option<&RoadSegment> {
        let from_idx = *self.node_index.get(&edge.source)?;
        let to_idx = *self.node_index.get(&edge.target)?;
        self.graph
            .edges_connecting(from_idx, to_idx)
            .map(|e| e.weight())
            .find(|segment| segment.key == edge.key)
    }
}

impl Default for RoadNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl RoadGraph for RoadNetwork {
    fn nodes(&self) -> Vec<NodeId> {
        self.graph.node_indices().map(|idx| self.graph[idx]).collect()
    }

    fn out_edges(&self, node: NodeId) -> Vec<EdgeId> {
        let Some(&node_idx) = self.node_index.get(&node) else {
            return Vec::new();
        };

        // petgraph walks adjacency newest-first; sort back to insertion order.
        let mut edges: Vec<_> = self.graph.edges(node_idx).collect();
        edges.sort_by_key(|edge| edge.id());
        edges
            .into_iter()
            .map(|edge| EdgeId::new(node, self.graph[edge.target()], edge.weight().key))
            .collect()
    }

    fn edges(&self) -> Vec<EdgeId> {
        self.graph
            .edge_indices()
            .filter_map(|idx| {
                let (a, b) = self.graph.edge_endpoints(idx)?;
                Some(EdgeId::new(self.graph[a], self.graph[b], self.graph[idx].key))
            })
            .collect()
    }

    fn distance(&self, edge: &EdgeId) -> f64 {
        self.length(edge).unwrap_or(DEFAULT_DISTANCE)
    }

    fn contains_node(&self, node: NodeId) -> bool {
        self.node_index.contains_key(&node)
    }

    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// On-disk form of a road network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphFile {
    /// Nodes to create up front, including isolated ones.
    #[serde(default)]
    pub nodes: Vec<NodeId>,
    pub edges: Vec<SerializedRoad>,
}

/// Serializable edge. Keys are reassigned on load in file order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedRoad {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
}

impl TryFrom<GraphFile> for RoadNetwork {
    type Error = PhysarumError;

    fn try_from(file: GraphFile) -> Result<Self> {
        let mut network = RoadNetwork::new();
        for node in file.nodes {
            network.add_node(node);
        }
        for road in file.edges {
            network.add_edge(road.source, road.target, road.length)?;
        }
        Ok(network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(id: u64) -> NodeId {
        NodeId(id)
    }

    #[test]
    fn parallel_edges_get_increasing_keys() {
        let mut network = RoadNetwork::new();
        let first = network.add_edge(n(1), n(2), Some(10.0)).unwrap();
        let second = network.add_edge(n(1), n(2), Some(4.0)).unwrap();
        let reverse = network.add_edge(n(2), n(1), None).unwrap();

        assert_eq!(first.key, 0);
        assert_eq!(second.key, 1);
        assert_eq!(reverse.key, 0);
        assert_eq!(network.edge_count(), 3);
        assert_eq!(network.node_count(), 2);
        assert_eq!(network.distance(&second), 4.0);
    }

    #[test]
    fn missing_length_defaults_to_one() {
        let mut network = RoadNetwork::new();
        let edge = network.add_edge(n(1), n(2), None).unwrap();
        assert_eq!(network.length(&edge), None);
        assert_eq!(network.distance(&edge), DEFAULT_DISTANCE);
        // Unknown edges fall back too.
        assert_eq!(network.distance(&EdgeId::new(n(5), n(6), 0)), DEFAULT_DISTANCE);
    }

    #[test]
    fn negative_and_nan_lengths_are_rejected() {
        let mut network = RoadNetwork::new();
        assert!(matches!(
            network.add_edge(n(1), n(2), Some(-1.0)),
            Err(PhysarumError::Graph(GraphError::InvalidDistance { .. }))
        ));
        assert!(network.add_edge(n(1), n(2), Some(f64::NAN)).is_err());
        assert!(network.add_edge(n(1), n(2), Some(0.0)).is_ok());
    }

    #[test]
    fn out_edges_follow_insertion_order() {
        let mut network = RoadNetwork::new();
        network.add_edge(n(1), n(3), None).unwrap();
        network.add_edge(n(1), n(2), None).unwrap();
        network.add_edge(n(1), n(3), None).unwrap();
        network.add_edge(n(2), n(1), None).unwrap();

        let out = network.out_edges(n(1));
        assert_eq!(
            out,
            vec![
                EdgeId::new(n(1), n(3), 0),
                EdgeId::new(n(1), n(2), 0),
                EdgeId::new(n(1), n(3), 1),
            ]
        );
        assert!(network.out_edges(n(42)).is_empty());
    }

    #[test]
    fn grid_has_two_way_streets() {
        let network = RoadNetwork::grid(3, 4, 100.0).unwrap();
        assert_eq!(network.node_count(), 12);
        // 3 rows * 3 horizontal + 2 * 4 vertical, both directions
        assert_eq!(network.edge_count(), 2 * (3 * 3 + 2 * 4));
        // Corner has two neighbors.
        assert_eq!(network.out_edges(n(0)).len(), 2);
        // Inner node has four.
        assert_eq!(network.out_edges(n(5)).len(), 4);
    }

    #[test]
    fn shortest_path_prefers_short_detour() {
        let mut network = RoadNetwork::new();
        network.add_edge(n(1), n(4), Some(50.0)).unwrap();
        network.add_edge(n(1), n(2), Some(10.0)).unwrap();
        network.add_edge(n(2), n(3), Some(10.0)).unwrap();
        network.add_edge(n(3), n(4), Some(10.0)).unwrap();

        let (path, cost) = network.shortest_path(&n(1), &n(4)).unwrap();
        assert_eq!(path, vec![n(1), n(2), n(3), n(4)]);
        assert!((cost - 30.0).abs() < 1e-9);

        assert!(network.shortest_path(&n(4), &n(1)).is_none());
        assert!(network.shortest_path(&n(1), &n(99)).is_none());
    }

    #[test]
    fn path_length_uses_cheapest_parallel_edge() {
        let mut network = RoadNetwork::new();
        network.add_edge(n(1), n(2), Some(8.0)).unwrap();
        network.add_edge(n(1), n(2), Some(3.0)).unwrap();
        network.add_edge(n(2), n(3), None).unwrap();

        assert_eq!(network.path_length(&[n(1), n(2), n(3)]), Some(4.0));
        assert_eq!(network.path_length(&[n(1)]), Some(0.0));
        assert_eq!(network.path_length(&[n(3), n(1)]), None);
    }

    #[test]
    fn json_round_trip_keeps_structure() {
        let json = r#"{
            "nodes": [7],
            "edges": [
                {"source": 1, "target": 2, "length": 12.5},
                {"source": 1, "target": 2},
                {"source": 2, "target": 1, "length": 12.5}
            ]
        }"#;
        let network = RoadNetwork::from_json_str(json).unwrap();
        assert_eq!(network.node_count(), 3);
        assert!(network.contains_node(n(7)));
        assert!(network.contains_edge(&EdgeId::new(n(1), n(2), 1)));
        assert_eq!(network.length(&EdgeId::new(n(1), n(2), 1)), None);

        let reparsed = RoadNetwork::try_from(network.to_file()).unwrap();
        assert_eq!(reparsed.edges(), network.edges());
    }
}
