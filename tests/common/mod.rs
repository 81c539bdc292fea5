//! Shared test fixtures for integration tests.

pub use ev_fleet_sim::sim::ScriptedSource;
use ev_fleet_sim::sim::types::SimulationConfig;

/// A draw that never triggers an arrival under the default arrival table.
#[allow(dead_code)]
pub const NO_ARRIVAL: f64 = 0.999;

/// Default configuration with a single 11 kW point.
#[allow(dead_code)]
pub fn single_point_config() -> SimulationConfig {
    SimulationConfig {
        num_charging_points: 1,
        ..SimulationConfig::default()
    }
}
