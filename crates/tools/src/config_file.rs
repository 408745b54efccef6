//! Maze configuration read from TOML, with command-line overrides applied on top.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use labyrinth::{GrowthStop, MazeConfig};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub hazard_count: Option<usize>,
    pub iteration_cap: Option<u32>,
    pub stop_at_coverage: bool,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut MazeConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(hazard_count) = self.hazard_count {
            config.hazard_count = hazard_count;
        }
        if let Some(iteration_cap) = self.iteration_cap {
            config.iteration_cap = iteration_cap;
        }
        if self.stop_at_coverage {
            config.growth_stop = GrowthStop::FloorCoverage;
        }
    }
}

pub fn parse_config(raw: &str) -> Result<MazeConfig> {
    let config: MazeConfig = toml::from_str(raw).context("Failed to deserialize maze config")?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<MazeConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&raw).with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Defaults, then the optional file, then the overrides.
pub fn resolve_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<MazeConfig> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => MazeConfig::default(),
    };
    overrides.apply(&mut config);
    config.validate()?;
    Ok(config)
}
