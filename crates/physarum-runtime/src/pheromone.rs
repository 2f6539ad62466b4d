//! Pheromone store: the only mutable state of a run.
//!
//! Every edge of the graph holds one non-negative level. Each iteration the
//! whole map evaporates first, then edges walked by agents are reinforced.
//! Levels are unbounded above: edges that keep being used keep growing.

use physarum_core::graph::RoadGraph;
use physarum_core::types::*;
use std::collections::HashMap;

/// Per-edge pheromone levels.
///
/// Created once per run with one entry per graph edge. The key set never
/// changes afterwards; only the levels do.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PheromoneMap {
    levels: HashMap<EdgeId, f64>,
}

impl PheromoneMap {
    /// Seed every edge of `graph` with [`INITIAL_PHEROMONE`].
    ///
    /// A graph without edges yields an empty map. Callers that average over
    /// the map must handle that case.
    pub fn initialize<G: RoadGraph + ?Sized>(graph: &G) -> Self {
        let levels = graph
            .edges()
            .into_iter()
            .map(|edge| (edge, INITIAL_PHEROMONE))
            .collect();
        Self { levels }
    }

    /// Build a map from explicit levels.
    pub fn from_levels(levels: impl IntoIterator<Item = (EdgeId, f64)>) -> Self {
        Self {
            levels: levels.into_iter().collect(),
        }
    }

    /// Multiply every level by `1 - rate`.
    ///
    /// Sane rates lie in `[0, 1)`. A rate of 1 or more wipes (or flips) every
    /// level and a negative rate amplifies them; both are accepted here and
    /// rejected by the optimizer's config validation instead.
    pub fn evaporate(&mut self, rate: f64) {
        let retain = 1.0 - rate;
        for level in self.levels.values_mut() {
            *level *= retain;
        }
    }

    /// Add `amount` to each listed edge, once per occurrence.
    ///
    /// Edges unknown to the map are ignored so that the key set stays fixed.
    pub fn reinforce<'a>(&mut self, edges: impl IntoIterator<Item = &'a EdgeId>, amount: f64) {
        for edge in edges {
            if let Some(level) = self.levels.get_mut(edge) {
                *level += amount;
            }
        }
    }

    /// Current level of an edge, `None` if the edge is not tracked.
    pub fn level(&self, edge: &EdgeId) -> Option<f64> {
        self.levels.get(edge).copied()
    }

    pub fn contains(&self, edge: &EdgeId) -> bool {
        self.levels.contains_key(edge)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Sum of all levels.
    pub fn total(&self) -> f64 {
        self.levels.values().sum()
    }

    /// Highest level, `None` for an empty map.
    pub fn max_level(&self) -> Option<f64> {
        self.levels.values().copied().reduce(f64::max)
    }

    /// Iterate over `(edge, level)` in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&EdgeId, &f64)> {
        self.levels.iter()
    }

    /// All entries sorted by edge, for stable output.
    pub fn sorted_entries(&self) -> Vec<(EdgeId, f64)> {
        let mut entries: Vec<_> = self.levels.iter().map(|(e, l)| (*e, *l)).collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::RoadNetwork;

    fn diamond() -> RoadNetwork {
        let mut network = RoadNetwork::new();
        network.add_edge(NodeId(1), NodeId(2), Some(1.0)).unwrap();
        network.add_edge(NodeId(2), NodeId(4), Some(1.0)).unwrap();
        network.add_edge(NodeId(1), NodeId(3), Some(10.0)).unwrap();
        network.add_edge(NodeId(3), NodeId(4), Some(10.0)).unwrap();
        network.add_edge(NodeId(3), NodeId(4), Some(12.0)).unwrap();
        network
    }

    #[test]
    fn initialize_seeds_every_edge_with_one() {
        let network = diamond();
        let map = PheromoneMap::initialize(&network);
        assert_eq!(map.len(), network.edge_count());
        for edge in network.edges() {
            assert_eq!(map.level(&edge), Some(INITIAL_PHEROMONE));
        }
    }

    #[test]
    fn initialize_empty_graph_yields_empty_map() {
        let map = PheromoneMap::initialize(&RoadNetwork::new());
        assert!(map.is_empty());
        assert_eq!(map.total(), 0.0);
        assert_eq!(map.max_level(), None);
    }

    #[test]
    fn evaporation_strictly_decreases_levels() {
        let mut map = PheromoneMap::initialize(&diamond());
        let before = map.clone();
        map.evaporate(0.1);
        for (edge, level) in map.iter() {
            let old = before.level(edge).unwrap();
            assert!(*level < old);
            assert!((*level - 0.9 * old).abs() < 1e-12);
        }
    }

    #[test]
    fn zero_rate_evaporation_is_a_no_op() {
        let mut map = PheromoneMap::initialize(&diamond());
        let before = map.clone();
        map.evaporate(0.0);
        assert_eq!(map, before);
    }

    #[test]
    fn reinforcement_touches_only_listed_edges() {
        let network = diamond();
        let mut map = PheromoneMap::initialize(&network);
        let target = EdgeId::new(NodeId(1), NodeId(2), 0);
        map.reinforce([&target], 2.5);

        assert_eq!(map.level(&target), Some(3.5));
        for edge in network.edges().iter().filter(|e| **e != target) {
            assert_eq!(map.level(edge), Some(1.0));
        }
    }

    #[test]
    fn repeated_edges_are_reinforced_per_occurrence() {
        let mut map = PheromoneMap::initialize(&diamond());
        let edge = EdgeId::new(NodeId(3), NodeId(4), 1);
        map.reinforce(&[edge, edge], 1.0);
        assert_eq!(map.level(&edge), Some(3.0));
    }

    #[test]
    fn empty_reinforcement_leaves_map_unchanged() {
        let mut map = PheromoneMap::initialize(&diamond());
        let before = map.clone();
        map.reinforce(&Vec::<EdgeId>::new(), 5.0);
        assert_eq!(map, before);
    }

    #[test]
    fn unknown_edges_do_not_grow_the_map() {
        let mut map = PheromoneMap::initialize(&diamond());
        let stray = EdgeId::new(NodeId(9), NodeId(8), 0);
        map.reinforce([&stray], 1.0);
        assert_eq!(map.len(), 5);
        assert!(!map.contains(&stray));
    }

    #[test]
    fn sorted_entries_are_ordered() {
        let map = PheromoneMap::initialize(&diamond());
        let entries = map.sorted_entries();
        assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
    }
}
