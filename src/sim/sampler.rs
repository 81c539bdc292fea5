//! Stochastic arrival and charging-demand sampling.
//!
//! All randomness flows through [`RandomSource`], so a run is reproducible
//! whenever the injected source is.

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::{StdRng, ThreadRng};

use super::types::DemandBin;

/// A source of uniform random numbers in `[0, 1)`.
pub trait RandomSource {
    /// Draws the next uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;
}

impl RandomSource for StdRng {
    fn next_f64(&mut self) -> f64 {
        self.random()
    }
}

impl RandomSource for ThreadRng {
    fn next_f64(&mut self) -> f64 {
        self.random()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Decides whether a vehicle arrives at an available point in one interval.
///
/// Consumes exactly one draw and returns `true` iff it is below `probability`.
pub fn sample_arrival(probability: f64, rng: &mut impl RandomSource) -> bool {
    rng.next_f64() < probability
}

/// Samples the distance an arriving vehicle needs to recharge for.
///
/// Walks `distribution` in declaration order and returns the first distance
/// whose running cumulative probability reaches the draw. If the table sums
/// to less than the draw, returns `0.0` (no charging need).
pub fn sample_demand_km(distribution: &[DemandBin], rng: &mut impl RandomSource) -> f64 {
    let u = rng.next_f64();
    let mut cumulative = 0.0;
    for bin in distribution {
        cumulative += bin.probability;
        if u <= cumulative {
            return bin.distance_km;
        }
    }
    0.0
}

/// Number of whole intervals needed to recharge for `distance_km`.
///
/// The result is truncated, so a session may deliver slightly less energy
/// than the distance requires.
///
/// # Examples
///
/// ```
/// use ev_fleet_sim::sim::sampler::duration_intervals;
///
/// // 18 kWh at 11 kW is 1.636 h, i.e. 6.54 intervals.
/// assert_eq!(duration_intervals(100.0, 18.0, 11.0, 4), 6);
/// assert_eq!(duration_intervals(0.0, 18.0, 11.0, 4), 0);
/// ```
pub fn duration_intervals(
    distance_km: f64,
    consumption_kwh_per_100km: f64,
    charging_point_power_kw: f64,
    intervals_per_hour: usize,
) -> usize {
    if distance_km == 0.0 {
        return 0;
    }
    let energy_required_kwh = distance_km * consumption_kwh_per_100km / 100.0;
    let hours_required = energy_required_kwh / charging_point_power_kw;
    // Saturating float-to-int cast: huge demands become `usize::MAX`, which
    // the session end clamps to.
    (hours_required * intervals_per_hour as f64).floor() as usize
}

/// Replays a fixed sequence of draws, then repeats `fallback` forever.
///
/// Useful for replaying recorded draws or forcing specific arrivals.
///
/// # Examples
///
/// ```
/// use ev_fleet_sim::sim::sampler::{RandomSource, ScriptedSource};
///
/// let mut src = ScriptedSource::new(&[0.25], 0.9);
/// assert_eq!(src.next_f64(), 0.25);
/// assert_eq!(src.next_f64(), 0.9);
/// assert_eq!(src.next_f64(), 0.9);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    draws: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedSource {
    /// Creates a source that yields `draws` in order, then `fallback`.
    pub fn new(draws: &[f64], fallback: f64) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
            fallback,
        }
    }
}

impl RandomSource for ScriptedSource {
    fn next_f64(&mut self) -> f64 {
        self.draws.pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::types::default_demand_distribution;
    use rand::SeedableRng;

    fn draw_demand(u: f64) -> f64 {
        sample_demand_km(
            &default_demand_distribution(),
            &mut ScriptedSource::new(&[u], 0.0),
        )
    }

    #[test]
    fn arrival_is_strictly_below_probability() {
        assert!(sample_arrival(0.1, &mut ScriptedSource::new(&[0.0999], 0.0)));
        assert!(!sample_arrival(0.1, &mut ScriptedSource::new(&[0.1], 0.0)));
        assert!(!sample_arrival(0.0, &mut ScriptedSource::new(&[0.0], 0.0)));
    }

    #[test]
    fn demand_boundary_is_inclusive() {
        assert_eq!(draw_demand(0.0), 0.0);
        assert_eq!(draw_demand(0.3431), 0.0);
        assert_eq!(draw_demand(0.3432), 5.0);
        assert_eq!(draw_demand(0.85), 100.0);
        assert_eq!(draw_demand(0.99), 300.0);
    }

    #[test]
    fn demand_falls_back_to_zero_past_table_sum() {
        // The default table sums to 0.9997.
        assert_eq!(draw_demand(0.99985), 0.0);
    }

    #[test]
    fn demand_depends_on_declaration_order() {
        let mut reversed = default_demand_distribution();
        reversed.reverse();
        let u = 0.01;
        assert_eq!(draw_demand(u), 0.0);
        assert_eq!(
            sample_demand_km(&reversed, &mut ScriptedSource::new(&[u], 0.0)),
            300.0
        );
    }

    #[test]
    fn each_sample_consumes_one_draw() {
        let mut src = ScriptedSource::new(&[0.5, 0.0], 0.9);
        sample_arrival(0.1, &mut src);
        assert!(sample_arrival(0.1, &mut src));
        assert_eq!(src.next_f64(), 0.9);
    }

    #[test]
    fn duration_truncates() {
        // 5 km: 0.9 kWh / 11 kW * 4 = 0.327
        assert_eq!(duration_intervals(5.0, 18.0, 11.0, 4), 0);
        // 50 km: 9 kWh / 11 kW * 4 = 3.27
        assert_eq!(duration_intervals(50.0, 18.0, 11.0, 4), 3);
        // 300 km: 54 kWh / 11 kW * 4 = 19.6
        assert_eq!(duration_intervals(300.0, 18.0, 11.0, 4), 19);
        // 100 km at 22 kW: 18 / 22 * 4 = 3.27
        assert_eq!(duration_intervals(100.0, 18.0, 22.0, 4), 3);
    }

    #[test]
    fn std_rng_draws_stay_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let u = rng.next_f64();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn mutable_reference_forwards_draws() {
        fn draw(mut rng: impl RandomSource) -> f64 {
            rng.next_f64()
        }

        let mut src = ScriptedSource::new(&[0.25, 0.5], 0.0);
        assert_eq!(draw(&mut src), 0.25);
        assert_eq!(src.next_f64(), 0.5);
    }
}
