//! Core simulation types: timing grid, fleet configuration, probability tables.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Number of 15-minute intervals per hour.
pub const INTERVALS_PER_HOUR: usize = 4;
/// Number of hours in a simulated day.
pub const HOURS_PER_DAY: usize = 24;
/// Number of intervals per simulated day.
pub const INTERVALS_PER_DAY: usize = INTERVALS_PER_HOUR * HOURS_PER_DAY;
/// Days in the simulated (non-leap) year.
pub const DAYS_IN_YEAR: usize = 365;
/// Total intervals in one simulated year.
pub const INTERVALS_PER_YEAR: usize = INTERVALS_PER_DAY * DAYS_IN_YEAR;
/// Duration of one interval in hours.
pub const INTERVAL_HOURS: f64 = 0.25;

/// Arrival probability for one hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HourlyArrival {
    /// Hour of day, `0..=23`.
    pub hour: usize,
    /// Probability that an available point receives a vehicle in one interval.
    pub probability: f64,
}

/// One entry of the charging demand distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DemandBin {
    /// Distance to recharge for, in kilometres. Zero means no charging need.
    pub distance_km: f64,
    /// Likelihood of this distance.
    pub probability: f64,
}

/// Fleet and demand model configuration for one simulation run.
///
/// Both probability tables are ordered: the demand table is sampled by
/// cumulative sum in declaration order, so reordering its entries changes
/// results.
///
/// # Examples
///
/// ```
/// use ev_fleet_sim::sim::types::SimulationConfig;
///
/// let cfg = SimulationConfig::default();
/// assert_eq!(cfg.num_charging_points, 20);
/// assert_eq!(cfg.theoretical_max_power_kw(), 220.0);
/// assert!(cfg.validate().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of charging points in the fleet (must be > 0).
    pub num_charging_points: usize,
    /// Rated power of every point (kW).
    pub charging_point_power_kw: f64,
    /// Vehicle consumption (kWh per 100 km).
    pub ev_consumption_kwh_per_100km: f64,
    /// Per-hour arrival probabilities, one entry for each hour 0..=23.
    pub arrival_probability_by_hour: Vec<HourlyArrival>,
    /// Ordered charging demand distribution.
    pub demand_probability_by_distance: Vec<DemandBin>,
    /// Allowed deviation of the demand probabilities' sum from 1.
    pub probability_sum_tolerance: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_charging_points: 20,
            charging_point_power_kw: 11.0,
            ev_consumption_kwh_per_100km: 18.0,
            arrival_probability_by_hour: default_arrival_probabilities(),
            demand_probability_by_distance: default_demand_distribution(),
            probability_sum_tolerance: 1e-3,
        }
    }
}

/// Hourly arrival probabilities of a typical public charging site.
pub fn default_arrival_probabilities() -> Vec<HourlyArrival> {
    (0..HOURS_PER_DAY)
        .map(|hour| {
            let probability = match hour {
                8..=9 => 0.0283,
                10..=12 => 0.0566,
                13..=15 => 0.0755,
                16..=18 => 0.1038,
                19..=21 => 0.0472,
                _ => 0.0094,
            };
            HourlyArrival { hour, probability }
        })
        .collect()
}

/// Charging demand distribution in kilometres.
pub fn default_demand_distribution() -> Vec<DemandBin> {
    [
        (0.0, 0.3431),
        (5.0, 0.0490),
        (10.0, 0.0980),
        (20.0, 0.1176),
        (30.0, 0.0882),
        (50.0, 0.1176),
        (100.0, 0.1078),
        (200.0, 0.0490),
        (300.0, 0.0294),
    ]
    .into_iter()
    .map(|(distance_km, probability)| DemandBin {
        distance_km,
        probability,
    })
    .collect()
}

impl SimulationConfig {
    /// Power drawn if every point charges at once (kW).
    pub fn theoretical_max_power_kw(&self) -> f64 {
        self.num_charging_points as f64 * self.charging_point_power_kw
    }

    /// Returns the arrival probabilities indexed by hour.
    ///
    /// Hours missing from the table map to 0. Only meaningful on a
    /// configuration that passed [`SimulationConfig::validate`].
    pub fn arrival_lookup(&self) -> [f64; HOURS_PER_DAY] {
        let mut lookup = [0.0; HOURS_PER_DAY];
        for entry in &self.arrival_probability_by_hour {
            if let Some(slot) = lookup.get_mut(entry.hour) {
                *slot = entry.probability;
            }
        }
        lookup
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid. Field paths are
    /// prefixed with `fleet.` to match the scenario file layout.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.num_charging_points == 0 {
            errors.push(ConfigError::new("fleet.num_charging_points", "must be > 0"));
        }
        if !is_positive(self.charging_point_power_kw) {
            errors.push(ConfigError::new(
                "fleet.charging_point_power_kw",
                "must be a finite number > 0",
            ));
        }
        if !is_positive(self.ev_consumption_kwh_per_100km) {
            errors.push(ConfigError::new(
                "fleet.ev_consumption_kwh_per_100km",
                "must be a finite number > 0",
            ));
        }
        if !self.probability_sum_tolerance.is_finite() || self.probability_sum_tolerance < 0.0 {
            errors.push(ConfigError::new(
                "fleet.probability_sum_tolerance",
                "must be a finite number >= 0",
            ));
        }

        self.validate_arrivals(&mut errors);
        self.validate_demand(&mut errors);
        errors
    }

    fn validate_arrivals(&self, errors: &mut Vec<ConfigError>) {
        const FIELD: &str = "fleet.arrival_probability_by_hour";

        let mut seen = [false; HOURS_PER_DAY];
        for (i, entry) in self.arrival_probability_by_hour.iter().enumerate() {
            match seen.get_mut(entry.hour) {
                None => errors.push(ConfigError::new(
                    format!("{FIELD}[{i}].hour"),
                    format!("must be in 0..=23, got {}", entry.hour),
                )),
                Some(true) => errors.push(ConfigError::new(
                    format!("{FIELD}[{i}].hour"),
                    format!("hour {} listed more than once", entry.hour),
                )),
                Some(slot) => *slot = true,
            }
            if !is_probability(entry.probability) {
                errors.push(ConfigError::new(
                    format!("{FIELD}[{i}].probability"),
                    format!("must be in [0.0, 1.0], got {}", entry.probability),
                ));
            }
        }

        let missing: Vec<String> = seen
            .iter()
            .enumerate()
            .filter(|(_, covered)| !**covered)
            .map(|(hour, _)| hour.to_string())
            .collect();
        if !missing.is_empty() {
            errors.push(ConfigError::new(
                FIELD,
                format!("must cover every hour 0..=23, missing {}", missing.join(", ")),
            ));
        }
    }

    fn validate_demand(&self, errors: &mut Vec<ConfigError>) {
        const FIELD: &str = "fleet.demand_probability_by_distance";

        if self.demand_probability_by_distance.is_empty() {
            errors.push(ConfigError::new(FIELD, "must not be empty"));
            return;
        }

        let mut sum = 0.0;
        for (i, bin) in self.demand_probability_by_distance.iter().enumerate() {
            if !bin.distance_km.is_finite() || bin.distance_km < 0.0 {
                errors.push(ConfigError::new(
                    format!("{FIELD}[{i}].distance_km"),
                    format!("must be a finite number >= 0, got {}", bin.distance_km),
                ));
            }
            if !is_probability(bin.probability) {
                errors.push(ConfigError::new(
                    format!("{FIELD}[{i}].probability"),
                    format!("must be in [0.0, 1.0], got {}", bin.probability),
                ));
            }
            sum += bin.probability;
        }

        if sum.is_finite() && (sum - 1.0).abs() > self.probability_sum_tolerance {
            errors.push(ConfigError::new(
                FIELD,
                format!(
                    "probabilities must sum to 1 (within {}), got {sum}",
                    self.probability_sum_tolerance
                ),
            ));
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn is_probability(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}
