//! Simulation configuration.

use serde::{Deserialize, Serialize};

use crate::colony::Parameters;
use crate::error::{AcoError, Result};
use crate::models::{DEFAULT_INITIAL_TAU, DEFAULT_TOWN_SIZE};

/// Everything needed to set up an [`Aco`](crate::simulation::Aco):
/// algorithm parameters, canvas settings and an optional random seed.
///
/// Every field has a default, so partial JSON documents are accepted.
///
/// # Examples
///
/// ```
/// use ant_colony::config::Config;
/// use ant_colony::colony::PheromoneRule;
///
/// let config = Config::from_json(r#"{
///     "parameters": { "ant_count": 12, "rule": "ant_quantity" },
///     "fill_paths": false,
///     "seed": 42
/// }"#).unwrap();
///
/// assert_eq!(config.parameters.ant_count, 12);
/// assert_eq!(config.parameters.rule, PheromoneRule::AntQuantity);
/// assert_eq!(config.initial_tau, 1.0);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Colony parameters.
    pub parameters: Parameters,
    /// Hit-test radius for town picking.
    pub town_size: i32,
    /// Pheromone floor.
    pub initial_tau: f64,
    /// Connect every new town to all existing towns.
    pub fill_paths: bool,
    /// Seed for the random source; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parameters: Parameters::default(),
            town_size: DEFAULT_TOWN_SIZE,
            initial_tau: DEFAULT_INITIAL_TAU,
            fill_paths: true,
            seed: None,
        }
    }
}

impl Config {
    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sets the colony parameters.
    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Sets the pheromone floor.
    pub fn with_initial_tau(mut self, initial_tau: f64) -> Self {
        self.initial_tau = initial_tau;
        self
    }

    /// Sets the path auto-fill mode.
    pub fn with_fill_paths(mut self, fill_paths: bool) -> Self {
        self.fill_paths = fill_paths;
        self
    }

    /// Sets the hit-test radius.
    pub fn with_town_size(mut self, town_size: i32) -> Self {
        self.town_size = town_size;
        self
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks parameter ranges and a positive, finite trail floor.
    pub fn validate(&self) -> Result<()> {
        self.parameters.validate()?;
        if !self.initial_tau.is_finite() || self.initial_tau <= 0.0 {
            return Err(AcoError::Config(format!(
                "initial_tau must be positive, got {}",
                self.initial_tau
            )));
        }
        if self.town_size <= 0 {
            return Err(AcoError::Config(format!(
                "town_size must be positive, got {}",
                self.town_size
            )));
        }
        Ok(())
    }
}
