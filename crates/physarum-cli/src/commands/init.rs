//! Initialize a new Physarum project.

use anyhow::{Context, Result};
use colored::Colorize;
use physarum::prelude::*;
use std::path::PathBuf;

use crate::config::Config;

pub fn run(path: Option<String>) -> Result<()> {
    let base_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    println!("{} Initializing Physarum project...", "→".blue());

    std::fs::create_dir_all(&base_path)
        .with_context(|| format!("Failed to create {}", base_path.display()))?;

    // Create default config
    let config_path = base_path.join("physarum.toml");
    if !config_path.exists() {
        Config::default().save(&config_path)?;
        println!("  {} Created {}", "✓".green(), config_path.display());
    } else {
        println!("  {} {} already exists", "•".yellow(), config_path.display());
    }

    // Create a sample network
    let network_path = base_path.join("network.json");
    if !network_path.exists() {
        sample_network()?
            .save(&network_path)
            .with_context(|| format!("Failed to write {}", network_path.display()))?;
        println!("  {} Created {}", "✓".green(), network_path.display());
    } else {
        println!("  {} {} already exists", "•".yellow(), network_path.display());
    }

    println!();
    println!("{} Physarum project initialized!", "✓".green().bold());
    println!();
    println!("Next steps:");
    println!("  {} physarum run --graph network.json", "1.".blue());
    println!("  {} physarum compare 1 6 --graph network.json", "2.".blue());
    println!("  {} physarum metrics --grid 10x10", "3.".blue());

    Ok(())
}

/// Two routes from 1 to 6: a short avenue through 2 and 4, and a long
/// detour through 3 and 5, with a one-way cross street between them.
fn sample_network() -> Result<RoadNetwork> {
    let mut network = RoadNetwork::new();
    let n = NodeId;
    network.add_two_way(n(1), n(2), Some(120.0))?;
    network.add_two_way(n(2), n(4), Some(150.0))?;
    network.add_two_way(n(4), n(6), Some(110.0))?;
    network.add_two_way(n(1), n(3), Some(300.0))?;
    network.add_two_way(n(3), n(5), Some(420.0))?;
    network.add_two_way(n(5), n(6), Some(260.0))?;
    network.add_edge(n(3), n(4), Some(200.0))?;
    Ok(network)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_network_has_a_short_and_a_long_route() {
        let network = sample_network().unwrap();
        let (path, length) = network.shortest_path(&NodeId(1), &NodeId(6)).unwrap();
        assert_eq!(path, vec![NodeId(1), NodeId(2), NodeId(4), NodeId(6)]);
        assert_eq!(length, 380.0);
    }

    #[test]
    fn init_writes_config_and_network() {
        let dir = tempfile::tempdir().unwrap();
        run(Some(dir.path().display().to_string())).unwrap();

        assert!(Config::load_from(&dir.path().join("physarum.toml")).is_ok());
        let network = RoadNetwork::load(&dir.path().join("network.json")).unwrap();
        assert_eq!(network.node_count(), 6);
        assert_eq!(network.edge_count(), 13);
    }
}
