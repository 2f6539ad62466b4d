//! Snapshot persistence: save/load the result of a run.
//!
//! Serializes the final pheromone map to JSON so that plotting and
//! comparison tools can pick it up later. A snapshot is an output, not a
//! checkpoint: runs always start from fresh pheromone.

use crate::optimizer::OptimizerConfig;
use crate::pheromone::PheromoneMap;
use physarum_core::error::Result;
use physarum_core::types::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serializable result of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PheromoneSnapshot {
    pub metadata: SnapshotMetadata,
    pub edges: Vec<SerializedLevel>,
}

/// Snapshot metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub run_id: String,
    #[serde(default)]
    pub seed: Option<u64>,
    pub config: OptimizerConfig,
    pub edge_count: usize,
    pub total_pheromone: f64,
}

/// Serializable edge level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedLevel {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default)]
    pub key: u32,
    pub level: f64,
}

impl PheromoneSnapshot {
    /// Capture a pheromone map together with the config that produced it.
    pub fn capture(pheromone: &PheromoneMap, config: &OptimizerConfig, seed: Option<u64>) -> Self {
        let edges = pheromone
            .sorted_entries()
            .into_iter()
            .map(|(edge, level)| SerializedLevel {
                source: edge.source,
                target: edge.target,
                key: edge.key,
                level,
            })
            .collect();

        Self {
            metadata: SnapshotMetadata {
                run_id: uuid::Uuid::new_v4().to_string(),
                seed,
                config: config.clone(),
                edge_count: pheromone.len(),
                total_pheromone: pheromone.total(),
            },
            edges,
        }
    }

    /// Rebuild the pheromone map.
    pub fn to_pheromone(&self) -> PheromoneMap {
        PheromoneMap::from_levels(
            self.edges
                .iter()
                .map(|e| (EdgeId::new(e.source, e.target, e.key), e.level)),
        )
    }
}

/// Save a snapshot to a JSON file.
pub fn save_snapshot(snapshot: &PheromoneSnapshot, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load a snapshot from a JSON file.
pub fn load_snapshot(path: &Path) -> Result<PheromoneSnapshot> {
    let json = std::fs::read_to_string(path)?;
    let snapshot: PheromoneSnapshot = serde_json::from_str(&json)?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_records_sorted_levels() {
        let a = EdgeId::new(NodeId(3), NodeId(1), 0);
        let b = EdgeId::new(NodeId(1), NodeId(3), 1);
        let map = PheromoneMap::from_levels([(a, 0.5), (b, 4.0)]);
        let snapshot = PheromoneSnapshot::capture(&map, &OptimizerConfig::default(), Some(42));

        assert_eq!(snapshot.metadata.edge_count, 2);
        assert_eq!(snapshot.metadata.total_pheromone, 4.5);
        assert_eq!(snapshot.metadata.seed, Some(42));
        assert_eq!(snapshot.edges[0].source, NodeId(1));
        assert_eq!(snapshot.edges[0].key, 1);
        assert_eq!(snapshot.to_pheromone(), map);
    }

    #[test]
    fn each_capture_gets_its_own_run_id() {
        let map = PheromoneMap::default();
        let first = PheromoneSnapshot::capture(&map, &OptimizerConfig::default(), None);
        let second = PheromoneSnapshot::capture(&map, &OptimizerConfig::default(), None);
        assert_ne!(first.metadata.run_id, second.metadata.run_id);
    }
}
