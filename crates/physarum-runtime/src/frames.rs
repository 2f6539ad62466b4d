//! Frame capture for animating a run.
//!
//! The recorder snapshots the pheromone map after every evaporation and
//! after every agent's deposit, which is what a growth animation needs.
//! Drawing the frames is left to the caller.

use crate::optimizer::{Observer, OptimizationEvent};
use crate::pheromone::PheromoneMap;
use physarum_core::types::*;
use serde::Serialize;

/// Level at which an edge is drawn at full intensity.
pub const DEFAULT_FRAME_SCALE: f64 = 5.0;

/// One captured state of the pheromone map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub index: usize,
    pub iteration: usize,
    pub label: String,
    /// Levels sorted by edge.
    pub levels: Vec<(EdgeId, f64)>,
}

impl Frame {
    /// Level of `edge` in this frame.
    pub fn level(&self, edge: &EdgeId) -> Option<f64> {
        self.levels
            .binary_search_by(|(e, _)| e.cmp(edge))
            .ok()
            .map(|i| self.levels[i].1)
    }

    /// Drawing intensity of `edge` in `[0, 1]`: `level / scale`, capped at 1.
    pub fn intensity(&self, edge: &EdgeId, scale: f64) -> f64 {
        let level = self.level(edge).unwrap_or(0.0);
        if scale <= 0.0 {
            return if level > 0.0 { 1.0 } else { 0.0 };
        }
        (level / scale).clamp(0.0, 1.0)
    }
}

/// Observer that keeps every frame of a run in memory.
#[derive(Debug, Clone, Default)]
pub struct FrameRecorder {
    frames: Vec<Frame>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    fn capture(&mut self, iteration: usize, label: String, pheromone: &PheromoneMap) {
        self.frames.push(Frame {
            index: self.frames.len(),
            iteration,
            label,
            levels: pheromone.sorted_entries(),
        });
    }
}

impl Observer for FrameRecorder {
    fn on_event(&mut self, event: &OptimizationEvent, pheromone: &PheromoneMap) {
        match event {
            OptimizationEvent::Evaporated { iteration } => {
                self.capture(*iteration, format!("Iteration {iteration} after evaporation"), pheromone);
            }
            OptimizationEvent::AgentFinished { iteration, agent, .. } => {
                self.capture(*iteration, format!("Iter {iteration}, Agent {agent}"), pheromone);
            }
            OptimizationEvent::IterationComplete { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::RoadNetwork;
    use crate::optimizer::{OptimizerConfig, SlimeMold};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn one_frame_per_evaporation_and_agent() {
        let network = RoadNetwork::grid(3, 3, 10.0).unwrap();
        let config = OptimizerConfig { iterations: 2, num_agents: 3, ..Default::default() };
        let mut recorder = FrameRecorder::new();
        let final_map = SlimeMold::from_config(config)
            .run_observed(&network, &mut ChaCha8Rng::seed_from_u64(9), &mut recorder)
            .unwrap();

        let frames = recorder.into_frames();
        assert_eq!(frames.len(), 2 * (1 + 3));
        assert_eq!(frames[0].label, "Iteration 0 after evaporation");
        assert_eq!(frames[1].label, "Iter 0, Agent 0");
        assert!(frames.iter().enumerate().all(|(i, f)| f.index == i));

        // The last frame is the final map.
        let last = frames.last().unwrap();
        assert_eq!(last.levels, final_map.sorted_entries());
    }

    #[test]
    fn intensity_is_capped() {
        let a = EdgeId::new(NodeId(1), NodeId(2), 0);
        let b = EdgeId::new(NodeId(2), NodeId(1), 0);
        let frame = Frame {
            index: 0,
            iteration: 0,
            label: String::new(),
            levels: vec![(a, 2.5), (b, 12.0)],
        };
        assert_eq!(frame.intensity(&a, DEFAULT_FRAME_SCALE), 0.5);
        assert_eq!(frame.intensity(&b, DEFAULT_FRAME_SCALE), 1.0);
        assert_eq!(frame.intensity(&EdgeId::new(NodeId(7), NodeId(8), 0), DEFAULT_FRAME_SCALE), 0.0);
    }
}
