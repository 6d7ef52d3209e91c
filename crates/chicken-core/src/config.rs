//! Configuration System
//!
//! Loads run parameters, the payoff table and the population layout from a
//! TOML file. Every section has defaults, so a partial file is valid.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::components::agent::{AgentError, AgentParams, RutThreshold};
use crate::components::game::PayoffTable;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "chicken.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub simulation: SimulationConfig,
    pub payoffs: PayoffTable,
    pub cohorts: Vec<CohortConfig>,
}

/// Simulation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub rounds: u64,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rounds: 1000,
            seed: 42,
        }
    }
}

/// A group of identically configured agents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CohortConfig {
    pub count: usize,
    #[serde(default)]
    pub memory: u32,
    /// Percentage in [0, 100]; absent disables rut detection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rut_threshold: Option<f64>,
}

impl CohortConfig {
    pub fn new(count: usize, memory: u32, rut_threshold: Option<f64>) -> Self {
        Self {
            count,
            memory,
            rut_threshold,
        }
    }

    pub fn params(&self) -> Result<AgentParams, AgentError> {
        Ok(AgentParams::new(
            self.memory,
            RutThreshold::from_option(self.rut_threshold)?,
        ))
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            payoffs: PayoffTable::default(),
            cohorts: vec![
                CohortConfig::new(10, 0, None),
                CohortConfig::new(10, 2, None),
                CohortConfig::new(10, 4, Some(80.0)),
                CohortConfig::new(10, 8, Some(70.0)),
            ],
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check everything that would otherwise fail once rounds are running
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agent_count() == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        for (index, cohort) in self.cohorts.iter().enumerate() {
            cohort
                .params()
                .map_err(|source| ConfigError::Cohort { index, source })?;
        }
        Ok(())
    }

    pub fn agent_count(&self) -> usize {
        self.cohorts.iter().map(|c| c.count).sum()
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("population is empty")]
    EmptyPopulation,
    #[error("cohort {index}: {source}")]
    Cohort {
        index: usize,
        #[source]
        source: AgentError,
    },
}
