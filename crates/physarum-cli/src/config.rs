//! Configuration management for Physarum CLI.

use anyhow::{Context, Result};
use physarum::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Physarum project configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub optimizer: OptimizerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_strong_threshold")]
    pub strong_threshold: f64,
    #[serde(default = "default_frame_scale")]
    pub frame_scale: f64,
    #[serde(default = "default_snapshot")]
    pub snapshot: String,
}

// Default value functions
fn default_strong_threshold() -> f64 { DEFAULT_STRONG_THRESHOLD }
fn default_frame_scale() -> f64 { DEFAULT_FRAME_SCALE }
fn default_snapshot() -> String { "pheromone.json".to_string() }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            strong_threshold: default_strong_threshold(),
            frame_scale: default_frame_scale(),
            snapshot: default_snapshot(),
        }
    }
}

impl Config {
    /// Load config from physarum.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load config from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

/// Find physarum.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join("physarum.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
