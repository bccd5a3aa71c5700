//! Planner configuration
//!
//! Every tunable lives here: the three objective tier factors and the
//! delimiters of the catalog tables. Defaults reproduce the built-in
//! behavior; a TOML file passed via `--config` may override any subset.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core::error::{PlanError, Result};

/// Tunable planner parameters.
///
/// The factors separate the objective tiers by magnitude alone: activated
/// general zones cost the most, then visited zone levels (scaled by their
/// catalog weight), then hunted monsters. The separation approximates a
/// lexicographic priority, so the factors must stay strictly descending.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlanConfig {
    /// Cost per activated general zone (highest-priority tier)
    pub zone_factor: i64,

    /// Multiplier on each visited level's catalog weight (middle tier)
    pub level_factor: i64,

    /// Cost per hunted monster (lowest tier)
    pub monster_factor: i64,

    /// Column separator of the catalog tables
    pub column_delimiter: char,

    /// Element separator inside multi-valued cells
    pub array_delimiter: char,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            zone_factor: 40,
            level_factor: 20,
            monster_factor: 10,
            column_delimiter: ';',
            array_delimiter: '|',
        }
    }
}

impl PlanConfig {
    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.monster_factor <= 0 {
            return Err(PlanError::Config(format!(
                "monster_factor must be positive, got {}",
                self.monster_factor
            )));
        }
        if self.zone_factor <= self.level_factor || self.level_factor <= self.monster_factor {
            return Err(PlanError::Config(format!(
                "objective factors must be strictly descending: zone ({}) > level ({}) > monster ({})",
                self.zone_factor, self.level_factor, self.monster_factor
            )));
        }
        if self.column_delimiter == self.array_delimiter {
            return Err(PlanError::Config(format!(
                "column and array delimiters are both '{}'",
                self.column_delimiter
            )));
        }
        Ok(())
    }

    /// Parse a TOML override; keys left out keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| PlanError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }
}
