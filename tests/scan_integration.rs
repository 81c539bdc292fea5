//! Integration tests for the fleet-size concurrency scan.

use rand::SeedableRng;
use rand::rngs::StdRng;

use ev_fleet_sim::config::ScenarioConfig;
use ev_fleet_sim::sim::types::SimulationConfig;
use ev_fleet_sim::sim::{DEFAULT_FLEET_SIZES, run_concurrency_scan, run_simulation};

fn seeded(seed: u64) -> impl FnMut(usize) -> StdRng {
    move |n| StdRng::seed_from_u64(seed.wrapping_add(n as u64))
}

#[test]
fn default_scan_covers_thirty_fleet_sizes() {
    let points = run_concurrency_scan(&SimulationConfig::default(), DEFAULT_FLEET_SIZES, seeded(42))
        .expect("scan succeeds");

    assert_eq!(points.len(), 30);
    for (i, p) in points.iter().enumerate() {
        assert_eq!(p.fleet_size, i + 1);
        assert!(p.concurrency_factor_percent > 0.0);
        assert!(p.concurrency_factor_percent <= 100.0);
    }
    // A single point charges at full power at some time during a year.
    assert_eq!(points[0].concurrency_factor_percent, 100.0);
    // Thirty points never all charge at once.
    assert!(points[29].concurrency_factor_percent < 100.0);
}

#[test]
fn scan_entry_matches_standalone_run_with_same_seed() {
    let base = SimulationConfig::default();
    let points = run_concurrency_scan(&base, [5, 12], seeded(3)).expect("scan succeeds");

    let standalone = run_simulation(
        SimulationConfig {
            num_charging_points: 12,
            ..base
        },
        StdRng::seed_from_u64(3 + 12),
    )
    .expect("valid config");
    assert_eq!(
        points[1].concurrency_factor_percent,
        standalone.concurrency_factor_percent
    );
}

#[test]
fn reseeded_scans_are_reproducible() {
    let base = SimulationConfig::default();
    let a = run_concurrency_scan(&base, 1..=8, seeded(11)).expect("scan succeeds");
    let b = run_concurrency_scan(&base, 1..=8, seeded(11)).expect("scan succeeds");
    assert_eq!(a, b);
}

#[test]
fn scan_uses_scenario_range() {
    let mut scenario = ScenarioConfig::baseline();
    scenario.scan.min_fleet_size = 4;
    scenario.scan.max_fleet_size = 6;
    let points = run_concurrency_scan(&scenario.fleet, scenario.scan.fleet_sizes(), seeded(0))
        .expect("scan succeeds");
    let sizes: Vec<usize> = points.iter().map(|p| p.fleet_size).collect();
    assert_eq!(sizes, vec![4, 5, 6]);
}
