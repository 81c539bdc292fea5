//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::sim::types::{HourlyArrival, SimulationConfig};

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Global run parameters.
    #[serde(default)]
    pub simulation: RunConfig,
    /// Fleet and demand model.
    #[serde(default)]
    pub fleet: SimulationConfig,
    /// Fleet sizes for the concurrency scan.
    #[serde(default)]
    pub scan: ScanConfig,
}

/// Global run parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Master random seed.
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// Inclusive range of fleet sizes for the concurrency scan.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Smallest fleet size (must be > 0).
    pub min_fleet_size: usize,
    /// Largest fleet size (must be >= `min_fleet_size`).
    pub max_fleet_size: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_fleet_size: 1,
            max_fleet_size: 30,
        }
    }
}

impl ScanConfig {
    pub fn fleet_sizes(&self) -> std::ops::RangeInclusive<usize> {
        self.min_fleet_size..=self.max_fleet_size
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: 20 points of 11 kW.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns the fast-charging preset: the baseline site with 22 kW points.
    pub fn fast_charging() -> Self {
        Self {
            fleet: SimulationConfig {
                charging_point_power_kw: 22.0,
                ..SimulationConfig::default()
            },
            ..Self::default()
        }
    }

    /// Returns the large-depot preset: many slower points with a pronounced
    /// evening return peak.
    pub fn large_depot() -> Self {
        let arrival_probability_by_hour = SimulationConfig::default()
            .arrival_probability_by_hour
            .into_iter()
            .map(|a| HourlyArrival {
                probability: match a.hour {
                    17..=20 => 0.15,
                    _ => a.probability,
                },
                ..a
            })
            .collect();

        Self {
            fleet: SimulationConfig {
                num_charging_points: 60,
                charging_point_power_kw: 7.4,
                ev_consumption_kwh_per_100km: 20.0,
                arrival_probability_by_hour,
                ..SimulationConfig::default()
            },
            scan: ScanConfig {
                min_fleet_size: 1,
                max_fleet_size: 60,
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "fast_charging", "large_depot"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "fast_charging" => Ok(Self::fast_charging()),
            "large_depot" => Ok(Self::large_depot()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.fleet.validate();

        let scan = &self.scan;
        if scan.min_fleet_size == 0 {
            errors.push(ConfigError::new("scan.min_fleet_size", "must be > 0"));
        }
        if scan.min_fleet_size > scan.max_fleet_size {
            errors.push(ConfigError::new(
                "scan.min_fleet_size",
                "must be <= scan.max_fleet_size",
            ));
        }

        errors
    }
}
