//! Host configuration loaded from an optional JSON file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use clutch_core::enums::TeamSide;
use clutch_sim::SimConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub seed: u64,
    /// Wall-clock length of one time-unit.
    pub tick_interval_ms: u64,
    /// JSON file with the teams to play. Demo teams are used when absent.
    pub roster_path: Option<PathBuf>,
    pub results_dir: PathBuf,
    pub ai_sides: Vec<TeamSide>,
    pub start_playing: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_interval_ms: 250,
            roster_path: None,
            results_dir: PathBuf::from("results"),
            ai_sides: vec![TeamSide::Away],
            start_playing: true,
        }
    }
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            seed: self.seed,
            ai_sides: self.ai_sides.clone(),
            start_playing: self.start_playing,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse app config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read app config from {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
