//! Tunable constants for pace estimation.
//!
//! Every table has a `Default` reproducing the stock values, and every field
//! is optional when loading from JSON so a config file only needs to name the
//! entries it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::RelayError;

/// Multipliers converting a PR race pace into an expected relay pace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayAdjustment {
    #[serde(rename = "5k")]
    pub five_k: f64,
    #[serde(rename = "10k")]
    pub ten_k: f64,
    pub half: f64,
    pub marathon: f64,
}

impl Default for RelayAdjustment {
    fn default() -> Self {
        Self {
            five_k: 1.12,
            ten_k: 1.10,
            half: 1.05,
            marathon: 1.00,
        }
    }
}

/// Pace multipliers per terrain category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainMultipliers {
    pub easy: f64,
    pub medium: f64,
    pub hard: f64,
    pub extra_hard: f64,
}

impl Default for TerrainMultipliers {
    fn default() -> Self {
        Self {
            easy: 0.95,
            medium: 1.00,
            hard: 1.10,
            extra_hard: 1.18,
        }
    }
}

/// Pace multipliers for fatigue levels 1 through 5, in order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FatigueMultipliers(pub [f64; 5]);

impl Default for FatigueMultipliers {
    fn default() -> Self {
        Self([1.00, 1.03, 1.07, 1.12, 1.20])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaceConfig {
    pub relay_adjustment: RelayAdjustment,
    pub terrain: TerrainMultipliers,
    pub fatigue: FatigueMultipliers,
    /// Minutes per mile assumed for a leg with no runner assigned.
    pub unassigned_pace: f64,
}

impl Default for PaceConfig {
    fn default() -> Self {
        Self {
            relay_adjustment: RelayAdjustment::default(),
            terrain: TerrainMultipliers::default(),
            fatigue: FatigueMultipliers::default(),
            unassigned_pace: 10.0,
        }
    }
}

impl PaceConfig {
    pub fn from_json_str(s: &str) -> Result<Self, RelayError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RelayError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = PaceConfig::from_json_str(r#"{ "terrain": { "hard": 1.15 } }"#).unwrap();

        assert_eq!(config.terrain.hard, 1.15);
        assert_eq!(config.terrain.easy, 0.95);
        assert_eq!(config.terrain.extra_hard, 1.18);
        assert_eq!(config.relay_adjustment, RelayAdjustment::default());
        assert_eq!(config.unassigned_pace, 10.0);
    }

    #[test]
    fn test_relay_adjustment_wire_names() {
        let config =
            PaceConfig::from_json_str(r#"{ "relay_adjustment": { "5k": 1.2 } }"#).unwrap();
        assert_eq!(config.relay_adjustment.five_k, 1.2);
        assert_eq!(config.relay_adjustment.ten_k, 1.10);
    }

    #[test]
    fn test_fatigue_table_override() {
        let config =
            PaceConfig::from_json_str(r#"{ "fatigue": [1.0, 1.0, 1.0, 1.0, 1.5] }"#).unwrap();
        assert_eq!(config.fatigue.0[4], 1.5);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(matches!(
            PaceConfig::from_json_str("{ not json"),
            Err(RelayError::Json(_))
        ));
    }
}
