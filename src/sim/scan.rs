//! Concurrency factor as a function of fleet size.

use std::ops::RangeInclusive;

use serde::Serialize;
use tracing::debug;

use crate::error::SimError;

use super::engine::run_simulation;
use super::sampler::RandomSource;
use super::types::SimulationConfig;

/// Fleet sizes scanned by default.
pub const DEFAULT_FLEET_SIZES: RangeInclusive<usize> = 1..=30;

/// Concurrency factor observed for one fleet size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScanPoint {
    pub fleet_size: usize,
    pub concurrency_factor_percent: f64,
}

/// Simulates one year per fleet size and collects the concurrency factors.
///
/// Every run gets a fresh engine and a fresh random source from
/// `make_rng(fleet_size)`; nothing carries over between runs. All other
/// fields of `base` are held constant.
///
/// # Errors
///
/// Returns the first [`SimError`] raised by any run (e.g. a fleet size of 0
/// or an invalid `base`).
pub fn run_concurrency_scan<R, F>(
    base: &SimulationConfig,
    fleet_sizes: impl IntoIterator<Item = usize>,
    mut make_rng: F,
) -> Result<Vec<ScanPoint>, SimError>
where
    R: RandomSource,
    F: FnMut(usize) -> R,
{
    fleet_sizes
        .into_iter()
        .map(|fleet_size| {
            let config = SimulationConfig {
                num_charging_points: fleet_size,
                ..base.clone()
            };
            let result = run_simulation(config, make_rng(fleet_size))?;
            debug!(
                fleet_size,
                concurrency_factor_percent = result.concurrency_factor_percent,
                "scanned fleet size"
            );
            Ok(ScanPoint {
                fleet_size,
                concurrency_factor_percent: result.concurrency_factor_percent,
            })
        })
        .collect()
}
