//! CLI command implementations.

pub mod init;
pub mod run;
pub mod metrics;
pub mod compare;
pub mod animate;

use anyhow::Result;
use colored::Colorize;
use physarum::prelude::*;
use tracing::{debug, info};

use crate::args::{GraphArgs, RunArgs};
use crate::config::Config;

/// Everything a command needs before starting a run.
pub struct Setup {
    pub config: Config,
    pub network: RoadNetwork,
    pub optimizer: SlimeMold,
    pub seed: u64,
}

impl Setup {
    /// Load physarum.toml, apply CLI overrides and load the network.
    pub fn prepare(graph: &GraphArgs, run: &RunArgs) -> Result<Self> {
        let mut config = Config::load()?;
        run.apply(&mut config.optimizer);
        config.optimizer.validate()?;
        debug!("Effective optimizer config: {:?}", config.optimizer);

        println!("{} Loading road network...", "→".blue());
        let network = graph.load()?;
        println!(
            "  Loaded: {} nodes, {} edges",
            network.node_count().to_string().cyan(),
            network.edge_count().to_string().cyan()
        );

        let mut optimizer = SlimeMold::from_config(config.optimizer.clone());
        if let Some(endpoints) = run.endpoints() {
            optimizer = optimizer.with_endpoints(endpoints);
        }

        let seed = run.seed();
        info!(
            "Prepared run over {} nodes, {} edges (seed {})",
            network.node_count(),
            network.edge_count(),
            seed
        );
        Ok(Self { config, network, optimizer, seed })
    }

    pub fn announce(&self) {
        let config = self.optimizer.config();
        println!(
            "{} Running {} iterations x {} agents (seed {})...",
            "→".blue(),
            config.iterations.to_string().cyan(),
            config.num_agents.to_string().cyan(),
            self.seed.to_string().yellow()
        );
    }
}
