//! Simulation configuration loaded from TOML
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working configuration. Command-line flags override whatever is loaded here.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::battle::terrain::Terrain;
use crate::core::error::{Result, WargamesError};

/// Configuration for battle runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Pause between turns in paced mode (milliseconds)
    ///
    /// 0 disables pacing and runs the battle synchronously.
    pub delay_ms: i64,

    /// Seed for the battle's random source
    ///
    /// `None` seeds from entropy, so two runs will usually differ.
    pub seed: Option<u64>,

    /// Battlefield terrain, `None` for terrain-free combat
    pub terrain: Option<Terrain>,

    /// Maximum number of entries kept in the battle log
    pub log_capacity: usize,

    /// Number of battles to run when estimating odds
    pub odds_runs: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            delay_ms: 0,
            seed: None,
            terrain: None,
            log_capacity: 50,
            odds_runs: 1000,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.delay_ms < 0 {
            return Err(WargamesError::InvalidConfig(format!(
                "delay_ms ({}) must not be negative",
                self.delay_ms
            )));
        }

        if self.log_capacity == 0 {
            return Err(WargamesError::InvalidConfig(
                "log_capacity must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = SimulationConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = SimulationConfig::from_toml_str(
            r#"
            delay_ms = 25
            seed = 7
            terrain = "Hill"
            log_capacity = 10
            odds_runs = 200
            "#,
        )
        .unwrap();

        assert_eq!(config.delay_ms, 25);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.terrain, Some(Terrain::Hill));
        assert_eq!(config.log_capacity, 10);
        assert_eq!(config.odds_runs, 200);
    }

    #[test]
    fn test_negative_delay_rejected() {
        let result = SimulationConfig::from_toml_str("delay_ms = -5");
        assert!(matches!(result, Err(WargamesError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_log_capacity_rejected() {
        let config = SimulationConfig {
            log_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let result = SimulationConfig::from_toml_str("delay_ms = \"soon\"");
        assert!(matches!(result, Err(WargamesError::TomlError(_))));
    }
}
