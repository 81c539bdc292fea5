//! Simulation engine that drives a fleet of charging points through one year.

use tracing::debug;

use crate::devices::{ChargingPoint, ChargingSession, Device, DeviceContext};
use crate::error::SimError;

use super::clock::{Clock, hour_of_day};
use super::results::{RunTotals, SimulationResult, daily_slice};
use super::sampler::{RandomSource, duration_intervals, sample_arrival, sample_demand_km};
use super::types::{HOURS_PER_DAY, INTERVALS_PER_HOUR, INTERVALS_PER_YEAR, SimulationConfig};

/// Simulation engine owning the fleet, the random source, and the run state.
///
/// Generic over `R: RandomSource` so tests can inject scripted draws and
/// runs can be reproduced from a seed.
pub struct Engine<R: RandomSource> {
    config: SimulationConfig,
    arrival_by_hour: [f64; HOURS_PER_DAY],
    points: Vec<ChargingPoint>,
    rng: R,
    history: Vec<f64>,
    totals: RunTotals,
}

impl<R: RandomSource> Engine<R> {
    /// Creates a new engine with an idle fleet.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] listing every violated
    /// constraint; no engine is built.
    pub fn new(config: SimulationConfig, rng: R) -> Result<Self, SimError> {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(SimError::InvalidConfiguration(errors));
        }

        let points = (0..config.num_charging_points)
            .map(|_| ChargingPoint::new(config.charging_point_power_kw))
            .collect();

        Ok(Self {
            arrival_by_hour: config.arrival_lookup(),
            config,
            points,
            rng,
            history: Vec::with_capacity(INTERVALS_PER_YEAR),
            totals: RunTotals::default(),
        })
    }

    /// Resolves arrivals for interval `t`, then advances every point and
    /// returns the fleet power for the interval.
    ///
    /// All arrivals are sampled before any point advances, so a point freed
    /// during this interval only accepts a vehicle from `t + 1` on.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError::ResourceConflict`] from the fleet.
    pub fn step(&mut self, t: usize) -> Result<f64, SimError> {
        let arrival_probability = self.arrival_by_hour[hour_of_day(t)];

        for point in &mut self.points {
            if !point.is_available() || !sample_arrival(arrival_probability, &mut self.rng) {
                continue;
            }

            let distance_km =
                sample_demand_km(&self.config.demand_probability_by_distance, &mut self.rng);
            if distance_km > 0.0 {
                let duration = duration_intervals(
                    distance_km,
                    self.config.ev_consumption_kwh_per_100km,
                    self.config.charging_point_power_kw,
                    INTERVALS_PER_HOUR,
                );
                point.start_charging(ChargingSession::new(
                    t,
                    duration,
                    self.config.charging_point_power_kw,
                ))?;
                self.totals.sessions_started += 1;
            } else {
                self.totals.zero_demand_arrivals += 1;
            }
        }

        let context = DeviceContext::new(t);
        let interval_power_kw = self
            .points
            .iter_mut()
            .fold(0.0, |sum, point| sum + point.power_kw(&context));

        self.history.push(interval_power_kw);
        self.totals.record_interval(interval_power_kw);
        Ok(interval_power_kw)
    }

    /// Runs all 35,040 intervals of a year.
    ///
    /// Any state from a previous run (sessions, history, accumulators) is
    /// discarded first; the random source continues where it left off.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError::ResourceConflict`] from the fleet.
    pub fn simulate_year(&mut self) -> Result<(), SimError> {
        self.reset();
        debug!(
            points = self.points.len(),
            power_kw = self.config.charging_point_power_kw,
            "simulating one year"
        );

        let mut clock = Clock::year();
        while let Some(t) = clock.tick() {
            self.step(t)?;
        }

        debug!(
            peak_kw = self.totals.max_power_kw,
            energy_kwh = self.totals.total_energy_kwh,
            sessions = self.totals.sessions_started,
            "year simulated"
        );
        Ok(())
    }

    fn reset(&mut self) {
        for point in &mut self.points {
            point.reset();
        }
        self.history.clear();
        self.totals = RunTotals::default();
    }

    /// Summary of the run so far, with a copy of the power history.
    pub fn results(&self) -> SimulationResult {
        SimulationResult::new(
            &self.totals,
            self.config.theoretical_max_power_kw(),
            self.history.clone(),
        )
    }

    /// Consumes the engine and hands the power history over without copying.
    pub fn into_results(self) -> SimulationResult {
        SimulationResult::new(
            &self.totals,
            self.config.theoretical_max_power_kw(),
            self.history,
        )
    }

    /// The 96 intervals of day `day_index` (fewer at the end of the history).
    pub fn daily_power_profile(&self, day_index: usize) -> &[f64] {
        daily_slice(&self.history, day_index)
    }

    pub fn power_demand_history(&self) -> &[f64] {
        &self.history
    }

    pub fn points(&self) -> &[ChargingPoint] {
        &self.points
    }
}

/// Builds an engine, simulates one year, and returns its results.
///
/// # Errors
///
/// Returns [`SimError::InvalidConfiguration`] for a bad configuration.
pub fn run_simulation<R: RandomSource>(
    config: SimulationConfig,
    rng: R,
) -> Result<SimulationResult, SimError> {
    let mut engine = Engine::new(config, rng)?;
    engine.simulate_year()?;
    Ok(engine.into_results())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::PointState;
    use crate::sim::sampler::ScriptedSource;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn single_point() -> SimulationConfig {
        SimulationConfig {
            num_charging_points: 1,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn zero_points_is_rejected() {
        let cfg = SimulationConfig {
            num_charging_points: 0,
            ..SimulationConfig::default()
        };
        let result = Engine::new(cfg, ScriptedSource::new(&[], 0.5));
        assert!(matches!(result, Err(SimError::InvalidConfiguration(_))));
    }

    #[test]
    fn forced_arrival_starts_session_at_current_interval() {
        // Arrival draw 0.0, demand draw 0.85 -> 100 km -> 6 intervals.
        let mut engine = Engine::new(single_point(), ScriptedSource::new(&[0.0, 0.85], 0.999))
            .expect("valid config");

        assert_eq!(engine.step(0).ok(), Some(11.0));
        let session = engine.points()[0].session().copied();
        assert_eq!(session.map(|s| s.start_interval()), Some(0));
        assert_eq!(session.map(|s| s.duration_intervals()), Some(6));

        for t in 1..6 {
            assert_eq!(engine.step(t).ok(), Some(11.0));
        }
        assert_eq!(engine.step(6).ok(), Some(0.0));
        assert_eq!(engine.points()[0].state(), PointState::Idle);
    }

    #[test]
    fn zero_demand_arrival_keeps_point_idle() {
        let mut engine = Engine::new(single_point(), ScriptedSource::new(&[0.0, 0.1], 0.999))
            .expect("valid config");

        assert_eq!(engine.step(0).ok(), Some(0.0));
        assert!(engine.points()[0].is_available());
        assert_eq!(engine.results().zero_demand_arrivals, 1);
        assert_eq!(engine.results().sessions_started, 0);
    }

    #[test]
    fn occupied_points_draw_nothing_from_the_source() {
        let draws = [0.0, 0.85, 0.0, 0.1];
        let mut engine = Engine::new(single_point(), ScriptedSource::new(&draws, 0.999))
            .expect("valid config");

        // The session ends during interval 6, after that interval's arrivals.
        for t in 0..7 {
            assert!(engine.step(t).is_ok());
        }
        assert_eq!(engine.results().zero_demand_arrivals, 0);

        assert_eq!(engine.step(7).ok(), Some(0.0));
        let results = engine.results();
        assert_eq!(results.sessions_started, 1);
        assert_eq!(results.zero_demand_arrivals, 1);
    }

    #[test]
    fn year_run_fills_history() {
        let mut engine = Engine::new(SimulationConfig::default(), StdRng::seed_from_u64(1))
            .expect("valid config");
        assert!(engine.simulate_year().is_ok());
        assert_eq!(engine.power_demand_history().len(), INTERVALS_PER_YEAR);
        assert_eq!(engine.daily_power_profile(364).len(), 96);
        assert!(engine.daily_power_profile(365).is_empty());
    }

    #[test]
    fn rerun_resets_state() {
        let mut engine = Engine::new(single_point(), StdRng::seed_from_u64(3))
            .expect("valid config");
        assert!(engine.simulate_year().is_ok());
        assert!(engine.simulate_year().is_ok());
        assert_eq!(engine.power_demand_history().len(), INTERVALS_PER_YEAR);

        let history_energy: f64 = engine.power_demand_history().iter().sum::<f64>() * 0.25;
        let reported = engine.results().total_energy_consumed_kwh;
        assert!((history_energy - reported).abs() < 0.01);
    }

    #[test]
    fn results_before_run_are_empty() {
        let engine = Engine::new(single_point(), StdRng::seed_from_u64(0)).ok();
        let results = engine.map(|e| e.results());
        assert_eq!(results.as_ref().map(|r| r.power_demand_history.len()), Some(0));
        assert_eq!(results.map(|r| r.actual_max_power_kw), Some(0.0));
    }
}
