//! Region and tier tables.
//!
//! Tables are validated once when loaded and then handed to the engine as
//! read-only values; nothing here is consulted at calculation time.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::core::{Region, RegionTable, Tier, TierEngine, TierLadder};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("At least one region must be configured")]
    NoRegions,

    #[error("Duplicate region code: {0}")]
    DuplicateRegion(String),

    #[error("Region {code} has invalid fxRateToBase {rate}; must be finite and > 0")]
    InvalidFxRate { code: String, rate: f64 },

    #[error("Tier ladder must contain at least one tier")]
    EmptyLadder,

    #[error("First tier {name} must have threshold 0, found {threshold}")]
    FloorNotZero { name: String, threshold: f64 },

    #[error("Tier {name} threshold {threshold} must be finite and above the previous tier")]
    UnorderedThresholds { name: String, threshold: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramConfig {
    pub regions: Vec<Region>,
    pub tiers: Vec<Tier>,
}

impl ProgramConfig {
    pub fn reference() -> Self {
        Self {
            regions: vec![
                Region::new("US", "United States (USD)", 1.0, "USD"),
                Region::new("EU", "Europe (EUR)", 1.1, "EUR"),
                Region::new("UK", "United Kingdom (GBP)", 1.27, "GBP"),
                Region::new("JP", "Japan (JPY)", 0.007, "JPY"),
            ],
            tiers: vec![
                Tier::new("Member", 0.0),
                Tier::new("Silver", 1_000.0),
                Tier::new("Gold", 2_500.0),
                Tier::new("Platinum", 5_000.0),
            ],
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config = serde_json::from_str::<Self>(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::from_json(&fs::read_to_string(path)?)?;
        info!(
            path = %path.display(),
            regions = config.regions.len(),
            tiers = config.tiers.len(),
            "loaded program config"
        );
        Ok(config)
    }

    /// Reads `path` when given, otherwise falls back to the reference tables.
    pub fn load_or_reference(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::reference()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.regions.is_empty() {
            return Err(ConfigError::NoRegions);
        }

        let mut seen = HashSet::new();
        for region in &self.regions {
            if !seen.insert(region.code.to_ascii_uppercase()) {
                return Err(ConfigError::DuplicateRegion(region.code.clone()));
            }
            if !region.fx_rate_to_base.is_finite() || region.fx_rate_to_base <= 0.0 {
                return Err(ConfigError::InvalidFxRate {
                    code: region.code.clone(),
                    rate: region.fx_rate_to_base,
                });
            }
        }

        let Some(floor) = self.tiers.first() else {
            return Err(ConfigError::EmptyLadder);
        };
        if floor.threshold_base != 0.0 {
            return Err(ConfigError::FloorNotZero {
                name: floor.name.clone(),
                threshold: floor.threshold_base,
            });
        }

        for pair in self.tiers.windows(2) {
            let (prev, tier) = (&pair[0], &pair[1]);
            if !tier.threshold_base.is_finite() || tier.threshold_base <= prev.threshold_base {
                return Err(ConfigError::UnorderedThresholds {
                    name: tier.name.clone(),
                    threshold: tier.threshold_base,
                });
            }
        }

        Ok(())
    }

    pub fn into_engine(self) -> Result<TierEngine, ConfigError> {
        self.validate()?;
        Ok(TierEngine::new(
            RegionTable::from_validated(self.regions),
            TierLadder::from_validated(self.tiers),
        ))
    }
}
