//! Record every intermediate pheromone state of a run.

use anyhow::{Context, Result};
use colored::Colorize;
use physarum::prelude::*;
use serde::Serialize;
use tracing::info;

use super::Setup;
use crate::args::{seeded_rng, GraphArgs, RunArgs};
use crate::progress::ProgressObserver;

#[derive(Serialize)]
struct Animation {
    seed: u64,
    scale: f64,
    frames: Vec<AnimatedFrame>,
}

#[derive(Serialize)]
struct AnimatedFrame {
    index: usize,
    iteration: usize,
    label: String,
    edges: Vec<AnimatedEdge>,
}

#[derive(Serialize)]
struct AnimatedEdge {
    source: NodeId,
    target: NodeId,
    key: u32,
    level: f64,
    /// Drawing intensity in [0, 1].
    intensity: f64,
}

pub fn run(output: &str, graph: &GraphArgs, args: &RunArgs, scale: Option<f64>, verbose: bool) -> Result<()> {
    let setup = Setup::prepare(graph, args)?;
    setup.announce();

    let mut observers = (
        FrameRecorder::new(),
        ProgressObserver::new(setup.optimizer.config().iterations, verbose),
    );
    setup
        .optimizer
        .run_observed(&setup.network, &mut seeded_rng(setup.seed), &mut observers)?;
    let (recorder, progress) = observers;
    progress.finish();

    let scale = scale.unwrap_or(setup.config.output.frame_scale);
    let animation = Animation {
        seed: setup.seed,
        scale,
        frames: recorder
            .into_frames()
            .into_iter()
            .map(|frame| animate_frame(frame, scale))
            .collect(),
    };

    let json = serde_json::to_string(&animation).context("Failed to serialize frames")?;
    std::fs::write(output, json).with_context(|| format!("Failed to write frames: {output}"))?;
    info!("Wrote {} frames to {}", animation.frames.len(), output);

    println!();
    println!("{} Recorded {} frames", "✓".green().bold(), animation.frames.len().to_string().cyan());
    println!("  Output: {}", output.cyan());

    Ok(())
}

fn animate_frame(frame: Frame, scale: f64) -> AnimatedFrame {
    let edges = frame
        .levels
        .iter()
        .map(|(edge, level)| AnimatedEdge {
            source: edge.source,
            target: edge.target,
            key: edge.key,
            level: *level,
            intensity: frame.intensity(edge, scale),
        })
        .collect();

    AnimatedFrame {
        index: frame.index,
        iteration: frame.iteration,
        label: frame.label,
        edges,
    }
}
