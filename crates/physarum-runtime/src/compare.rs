//! Route comparison: slime trail versus shortest path.
//!
//! After a run, the strong edges form a sparse network. A route is read off
//! it greedily: from the start, keep taking the first strong outgoing edge.
//! That route is then measured against the length-optimal path.

use crate::extract::{edges_to_nodes, strong_edges};
use crate::network::RoadNetwork;
use crate::path_finder::ParallelEdgePolicy;
use crate::pheromone::PheromoneMap;
use physarum_core::graph::RoadGraph;
use physarum_core::types::*;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// Greedy route along strong edges, as the edges actually taken.
///
/// Parallel edges are followed according to `policy`, the same way agents
/// choose them. The route stops at the goal, when the current node has no
/// strong edge to an unvisited node, or after `max_steps` moves.
pub fn greedy_strong_path<G: RoadGraph + ?Sized>(
    graph: &G,
    strong: &BTreeSet<EdgeId>,
    start: NodeId,
    goal: NodeId,
    max_steps: usize,
    policy: ParallelEdgePolicy,
) -> Vec<EdgeId> {
    let mut edges = Vec::new();
    let mut visited = HashSet::from([start]);
    let mut current = start;

    while current != goal && edges.len() < max_steps {
        let next = graph
            .out_edges(current)
            .into_iter()
            .filter(|edge| policy.admits(edge) && strong.contains(edge))
            .find(|edge| !visited.contains(&edge.target));

        let Some(next) = next else {
            break;
        };
        visited.insert(next.target);
        edges.push(next);
        current = next.target;
    }
    edges
}

/// Slime route and shortest route between the same pair of nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteComparison {
    pub start: NodeId,
    pub goal: NodeId,
    /// Greedy route over strong edges, possibly stopping short of `goal`.
    pub slime_path: Vec<NodeId>,
    /// The edges behind `slime_path`, parallel keys included.
    pub slime_edges: Vec<EdgeId>,
    /// Sum of the distances of `slime_edges`.
    pub slime_length: f64,
    pub slime_reached_goal: bool,
    /// Length-optimal route, `None` if `goal` is unreachable.
    pub shortest_path: Option<Vec<NodeId>>,
    pub shortest_length: Option<f64>,
}

impl RouteComparison {
    /// Slime length over shortest length; `None` unless both routes reach the goal.
    pub fn stretch(&self) -> Option<f64> {
        if !self.slime_reached_goal {
            return None;
        }
        let shortest = self.shortest_length?;
        if shortest > 0.0 {
            Some(self.slime_length / shortest)
        } else {
            None
        }
    }

    /// Fraction of shortest-path hops that the slime route also uses.
    pub fn overlap(&self) -> f64 {
        let Some(shortest) = &self.shortest_path else {
            return 0.0;
        };
        let hops: HashSet<(NodeId, NodeId)> = shortest.windows(2).map(|w| (w[0], w[1])).collect();
        if hops.is_empty() {
            return 0.0;
        }
        let shared = self
            .slime_path
            .windows(2)
            .filter(|w| hops.contains(&(w[0], w[1])))
            .count();
        shared as f64 / hops.len() as f64
    }
}

/// Compare the slime route between `start` and `goal` with the shortest path.
///
/// `policy` should be the one the pheromone map was produced with.
pub fn compare_routes(
    network: &RoadNetwork,
    pheromone: &PheromoneMap,
    start: NodeId,
    goal: NodeId,
    threshold: f64,
    policy: ParallelEdgePolicy,
) -> RouteComparison {
    let strong = strong_edges(pheromone, threshold);
    let slime_edges = greedy_strong_path(network, &strong, start, goal, network.node_count(), policy);
    let slime_path = if slime_edges.is_empty() {
        vec![start]
    } else {
        edges_to_nodes(&slime_edges)
    };
    let slime_length: f64 = slime_edges.iter().map(|edge| network.distance(edge)).sum();
    let slime_reached_goal = slime_path.last() == Some(&goal);
    let shortest = network.shortest_path(&start, &goal);

    RouteComparison {
        start,
        goal,
        slime_path,
        slime_edges,
        slime_length,
        slime_reached_goal,
        shortest_length: shortest.as_ref().map(|(_, cost)| *cost),
        shortest_path: shortest.map(|(path, _)| path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(id: u64) -> NodeId {
        NodeId(id)
    }

    /// 1 -> 2 -> 4 short (2 + 2), 1 -> 3 -> 4 long (5 + 5).
    fn diamond() -> RoadNetwork {
        let mut network = RoadNetwork::new();
        network.add_edge(n(1), n(3), Some(5.0)).unwrap();
        network.add_edge(n(3), n(4), Some(5.0)).unwrap();
        network.add_edge(n(1), n(2), Some(2.0)).unwrap();
        network.add_edge(n(2), n(4), Some(2.0)).unwrap();
        network
    }

    #[test]
    fn greedy_route_follows_first_strong_edge() {
        let network = diamond();
        let strong = BTreeSet::from([
            EdgeId::new(n(1), n(3), 0),
            EdgeId::new(n(3), n(4), 0),
            EdgeId::new(n(1), n(2), 0),
        ]);
        let edges = greedy_strong_path(&network, &strong, n(1), n(4), 10, ParallelEdgePolicy::All);
        assert_eq!(edges, vec![EdgeId::new(n(1), n(3), 0), EdgeId::new(n(3), n(4), 0)]);
    }

    #[test]
    fn greedy_route_stops_without_strong_edges() {
        let network = diamond();
        let edges = greedy_strong_path(&network, &BTreeSet::new(), n(1), n(4), 10, ParallelEdgePolicy::All);
        assert!(edges.is_empty());
    }

    #[test]
    fn greedy_route_does_not_loop() {
        let mut network = RoadNetwork::new();
        network.add_two_way(n(1), n(2), None).unwrap();
        network.add_node(n(3));
        let strong: BTreeSet<_> = network.edges().into_iter().collect();
        let edges = greedy_strong_path(&network, &strong, n(1), n(3), 100, ParallelEdgePolicy::All);
        assert_eq!(edges, vec![EdgeId::new(n(1), n(2), 0)]);
    }

    #[test]
    fn comparison_against_shortest_path() {
        let network = diamond();
        let pheromone = PheromoneMap::from_levels([
            (EdgeId::new(n(1), n(3), 0), 4.0),
            (EdgeId::new(n(3), n(4), 0), 4.0),
            (EdgeId::new(n(1), n(2), 0), 0.5),
            (EdgeId::new(n(2), n(4), 0), 0.5),
        ]);

        let comparison = compare_routes(&network, &pheromone, n(1), n(4), 2.0, ParallelEdgePolicy::All);
        assert!(comparison.slime_reached_goal);
        assert_eq!(comparison.slime_path, vec![n(1), n(3), n(4)]);
        assert_eq!(comparison.slime_length, 10.0);
        assert_eq!(comparison.shortest_path, Some(vec![n(1), n(2), n(4)]));
        assert_eq!(comparison.shortest_length, Some(4.0));
        assert_eq!(comparison.stretch(), Some(2.5));
        assert_eq!(comparison.overlap(), 0.0);
    }

    #[test]
    fn stretch_requires_arrival() {
        let network = diamond();
        let comparison = compare_routes(
            &network,
            &PheromoneMap::initialize(&network),
            n(1),
            n(4),
            2.0,
            ParallelEdgePolicy::All,
        );
        assert!(!comparison.slime_reached_goal);
        assert_eq!(comparison.stretch(), None);
        assert_eq!(comparison.slime_path, vec![n(1)]);
    }

    /// 1 -> 2 twice: key 0 is 10 long, key 1 is 1 long.
    fn parallel_pair() -> RoadNetwork {
        let mut network = RoadNetwork::new();
        network.add_edge(n(1), n(2), Some(10.0)).unwrap();
        network.add_edge(n(1), n(2), Some(1.0)).unwrap();
        network
    }

    #[test]
    fn slime_length_is_measured_on_the_edge_taken() {
        let network = parallel_pair();
        let pheromone = PheromoneMap::from_levels([
            (EdgeId::new(n(1), n(2), 0), 5.0),
            (EdgeId::new(n(1), n(2), 1), 0.1),
        ]);

        let comparison = compare_routes(&network, &pheromone, n(1), n(2), 2.0, ParallelEdgePolicy::All);
        assert_eq!(comparison.slime_edges, vec![EdgeId::new(n(1), n(2), 0)]);
        assert_eq!(comparison.slime_path, vec![n(1), n(2)]);
        assert_eq!(comparison.slime_length, 10.0);
        assert_eq!(comparison.shortest_length, Some(1.0));
        assert_eq!(comparison.stretch(), Some(10.0));
    }

    #[test]
    fn strong_parallel_edges_are_followed_unless_excluded() {
        let network = parallel_pair();
        let pheromone = PheromoneMap::from_levels([
            (EdgeId::new(n(1), n(2), 0), 0.5),
            (EdgeId::new(n(1), n(2), 1), 9.0),
        ]);

        let all = compare_routes(&network, &pheromone, n(1), n(2), 2.0, ParallelEdgePolicy::All);
        assert!(all.slime_reached_goal);
        assert_eq!(all.slime_edges, vec![EdgeId::new(n(1), n(2), 1)]);
        assert_eq!(all.slime_length, 1.0);

        let first_only = compare_routes(&network, &pheromone, n(1), n(2), 2.0, ParallelEdgePolicy::FirstOnly);
        assert!(!first_only.slime_reached_goal);
        assert_eq!(first_only.slime_path, vec![n(1)]);
        assert_eq!(first_only.slime_length, 0.0);
    }
}
