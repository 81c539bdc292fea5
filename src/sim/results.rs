//! Summary statistics of a completed year run.

use std::fmt;

use serde::Serialize;

use super::types::{INTERVAL_HOURS, INTERVALS_PER_DAY};

/// Running accumulators the engine updates once per interval.
#[derive(Debug, Clone, Default)]
pub struct RunTotals {
    /// Energy delivered so far (kWh, unrounded).
    pub total_energy_kwh: f64,
    /// Highest interval power seen so far (kW).
    pub max_power_kw: f64,
    /// Sessions that put a point into the charging state.
    pub sessions_started: usize,
    /// Arrivals whose sampled demand was 0 km.
    pub zero_demand_arrivals: usize,
}

impl RunTotals {
    /// Folds one interval's fleet power into the accumulators.
    pub fn record_interval(&mut self, interval_power_kw: f64) {
        self.max_power_kw = self.max_power_kw.max(interval_power_kw);
        self.total_energy_kwh += interval_power_kw * INTERVAL_HOURS;
    }
}

/// Results of one simulated year.
///
/// Energy and power figures are rounded to two decimals; the retained
/// `power_demand_history` keeps full precision.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    /// Energy delivered over the year (kWh).
    pub total_energy_consumed_kwh: f64,
    /// Fleet power if every point charges at once (kW).
    pub theoretical_max_power_kw: f64,
    /// Highest simultaneous fleet power observed (kW).
    pub actual_max_power_kw: f64,
    /// Peak power as a percentage of the theoretical maximum.
    pub concurrency_factor_percent: f64,
    /// Delivered energy as a percentage of running at full power all year.
    pub utilization_percent: f64,
    /// Number of charging sessions started.
    pub sessions_started: usize,
    /// Number of arrivals that needed no charge.
    pub zero_demand_arrivals: usize,
    /// Fleet power per 15-minute interval (kW).
    pub power_demand_history: Vec<f64>,
}

impl SimulationResult {
    /// Derives the reported figures from the run accumulators.
    ///
    /// # Arguments
    ///
    /// * `totals` - Accumulators at the end of the run
    /// * `theoretical_max_power_kw` - Points × rated power
    /// * `power_demand_history` - Per-interval fleet power
    pub fn new(
        totals: &RunTotals,
        theoretical_max_power_kw: f64,
        power_demand_history: Vec<f64>,
    ) -> Self {
        let concurrency_factor_percent = if theoretical_max_power_kw > 0.0 {
            round_percent(totals.max_power_kw / theoretical_max_power_kw)
        } else {
            0.0
        };

        let full_power_kwh =
            theoretical_max_power_kw * power_demand_history.len() as f64 * INTERVAL_HOURS;
        let utilization_percent = if full_power_kwh > 0.0 {
            round_percent(totals.total_energy_kwh / full_power_kwh)
        } else {
            0.0
        };

        Self {
            total_energy_consumed_kwh: round_2dp(totals.total_energy_kwh),
            theoretical_max_power_kw,
            actual_max_power_kw: round_2dp(totals.max_power_kw),
            concurrency_factor_percent,
            utilization_percent,
            sessions_started: totals.sessions_started,
            zero_demand_arrivals: totals.zero_demand_arrivals,
            power_demand_history,
        }
    }

    /// The 96 intervals of day `day_index`, or fewer if the history ends
    /// first. Empty when the day starts past the end of the history.
    pub fn daily_power_profile(&self, day_index: usize) -> &[f64] {
        daily_slice(&self.power_demand_history, day_index)
    }
}

pub(crate) fn daily_slice(history: &[f64], day_index: usize) -> &[f64] {
    let start = day_index.saturating_mul(INTERVALS_PER_DAY).min(history.len());
    let end = start.saturating_add(INTERVALS_PER_DAY).min(history.len());
    &history[start..end]
}

/// Rounds to two decimal places, halves away from zero.
pub fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Converts a ratio to a percentage with two decimal places.
fn round_percent(ratio: f64) -> f64 {
    (ratio * 10_000.0).round() / 100.0
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Simulation Results ---")?;
        writeln!(
            f,
            "Total energy consumed:     {:.2} kWh",
            self.total_energy_consumed_kwh
        )?;
        writeln!(
            f,
            "Theoretical maximum power: {:.2} kW",
            self.theoretical_max_power_kw
        )?;
        writeln!(f, "Actual maximum power:      {:.2} kW", self.actual_max_power_kw)?;
        writeln!(
            f,
            "Concurrency factor:        {:.2}%",
            self.concurrency_factor_percent
        )?;
        writeln!(f, "Utilization:               {:.2}%", self.utilization_percent)?;
        write!(
            f,
            "Sessions started:          {} ({} arrivals without demand)",
            self.sessions_started, self.zero_demand_arrivals
        )
    }
}
