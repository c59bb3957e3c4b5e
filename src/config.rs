use std::path::Path;

use log::warn;

use crate::ai::GreedyConfig;
use crate::error::ConfigError;
use crate::game::{BoardConfig, MAX_CELLS};
use crate::simulation::{Simulation, SimulationConfig};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub agent: GreedyConfig,
    pub simulation: SimulationConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.rows == 0 {
            return Err(ConfigError::Validation("board.rows must be >= 1".into()));
        }
        if self.board.columns == 0 {
            return Err(ConfigError::Validation(
                "board.columns must be >= 1".into(),
            ));
        }
        match self.board.cell_count() {
            Some(cells) if cells <= MAX_CELLS => {}
            _ => {
                return Err(ConfigError::Validation(format!(
                    "board must have at most {MAX_CELLS} cells, got {} x {}",
                    self.board.rows, self.board.columns
                )));
            }
        }
        let p = self.agent.random_move_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::Validation(
                "agent.random_move_probability must be in [0, 1]".into(),
            ));
        }
        if self.simulation.num_matches == 0 {
            return Err(ConfigError::Validation(
                "simulation.num_matches must be > 0".into(),
            ));
        }
        if self.simulation.threads == 0 {
            return Err(ConfigError::Validation(
                "simulation.threads must be >= 1".into(),
            ));
        }

        Ok(())
    }

    /// Build the simulation driver described by this configuration.
    pub fn simulation(&self) -> Simulation {
        Simulation::new(self.board, self.agent, self.simulation.clone())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// sample config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
