//! Analysis configuration: projection horizon, rent policy and solver settings
//!
//! Every field has a default so a JSON file only needs to list overrides.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

use crate::error::{AnalysisError, AnalysisResult};
use crate::projection::IrrSettings;

/// Default projection horizon in years
pub const DEFAULT_HORIZON_YEARS: u32 = 10;

/// Longest projection horizon accepted by validation
pub const MAX_HORIZON_YEARS: u32 = 100;

/// Default target net yield for rent recommendations (percent)
pub const DEFAULT_TARGET_NET_YIELD_PCT: f64 = 6.0;

/// Default land department transfer fee (percent of price)
pub const DEFAULT_DLD_FEE_PCT: f64 = 4.0;

/// Multiplicative rent premiums applied after the target-yield rent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RentPremiums {
    pub villa: f64,
    pub penthouse: f64,
    pub premium_location: f64,

    /// Area keywords that qualify for the location premium (case-insensitive)
    pub premium_locations: Vec<String>,
}

impl Default for RentPremiums {
    fn default() -> Self {
        Self {
            villa: 1.15,
            penthouse: 1.25,
            premium_location: 1.20,
            premium_locations: vec![
                "Palm Jumeirah".to_string(),
                "Downtown".to_string(),
                "Dubai Marina".to_string(),
                "Emirates Hills".to_string(),
                "Jumeirah Bay".to_string(),
                "Bluewaters".to_string(),
                "DIFC".to_string(),
            ],
        }
    }
}

/// Configuration for an analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of years to project
    pub horizon_years: u32,

    /// Net yield the rent recommendation targets (percent)
    pub target_net_yield_pct: f64,

    /// Transfer fee charged when `dld_fee_included` is set (percent of price)
    pub dld_fee_pct: f64,

    pub irr: IrrSettings,

    pub rent_premiums: RentPremiums,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            horizon_years: DEFAULT_HORIZON_YEARS,
            target_net_yield_pct: DEFAULT_TARGET_NET_YIELD_PCT,
            dld_fee_pct: DEFAULT_DLD_FEE_PCT,
            irr: IrrSettings::default(),
            rent_premiums: RentPremiums::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load a configuration from a JSON file; missing fields keep their defaults
    pub fn from_json_path(path: &Path) -> AnalysisResult<Self> {
        let file = File::open(path)?;
        let config: AnalysisConfig = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> AnalysisResult<Self> {
        let config: AnalysisConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AnalysisResult<()> {
        if self.horizon_years == 0 || self.horizon_years > MAX_HORIZON_YEARS {
            return Err(AnalysisError::invalid(
                "horizon_years",
                format!("must be between 1 and {}", MAX_HORIZON_YEARS),
            ));
        }
        if !self.target_net_yield_pct.is_finite() || self.target_net_yield_pct <= 0.0 {
            return Err(AnalysisError::invalid(
                "target_net_yield_pct",
                "must be a positive number",
            ));
        }
        if !self.dld_fee_pct.is_finite() || self.dld_fee_pct < 0.0 {
            return Err(AnalysisError::invalid("dld_fee_pct", "must not be negative"));
        }
        Ok(())
    }
}
