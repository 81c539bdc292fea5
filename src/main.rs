//! EV fleet simulator entry point: CLI wiring and config-driven runs.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ev_fleet_sim::config::ScenarioConfig;
use ev_fleet_sim::io::export::{export_history_csv, export_json, export_scan_csv};
use ev_fleet_sim::sim::clock::time_of_day_label;
use ev_fleet_sim::sim::{
    RandomSource, ScanPoint, SimulationResult, run_concurrency_scan, run_simulation,
};

/// Year-long stochastic simulation of an EV charging point fleet.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Load scenario from TOML config file.
    #[arg(long, conflicts_with = "preset")]
    scenario: Option<PathBuf>,

    /// Use a built-in preset (baseline, fast_charging, large_depot).
    #[arg(long)]
    preset: Option<String>,

    /// Override random seed.
    #[arg(long, conflicts_with = "entropy")]
    seed: Option<u64>,

    /// Draw from the platform generator instead of a seeded one.
    #[arg(long)]
    entropy: bool,

    /// Override the number of charging points.
    #[arg(long)]
    points: Option<usize>,

    /// Print the 96-interval power profile of this day (0-based).
    #[arg(long)]
    profile_day: Option<usize>,

    /// Run the concurrency factor scan over the configured fleet sizes.
    #[arg(long)]
    scan: bool,

    /// Export per-interval fleet power to CSV.
    #[arg(long)]
    telemetry_out: Option<PathBuf>,

    /// Export the concurrency scan to CSV (implies --scan).
    #[arg(long)]
    scan_out: Option<PathBuf>,

    /// Export the result and scan as JSON.
    #[arg(long)]
    json_out: Option<PathBuf>,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the year simulation and, if requested, the fleet-size scan.
///
/// `make_rng(n)` supplies the random source for a run; the main run uses
/// `make_rng(0)`.
fn run<R: RandomSource>(
    scenario: &ScenarioConfig,
    with_scan: bool,
    mut make_rng: impl FnMut(usize) -> R,
) -> anyhow::Result<(SimulationResult, Option<Vec<ScanPoint>>)> {
    let started = Instant::now();
    let result = run_simulation(scenario.fleet.clone(), make_rng(0))?;
    info!(
        points = scenario.fleet.num_charging_points,
        elapsed_s = started.elapsed().as_secs_f64(),
        "simulation finished"
    );

    if !with_scan {
        return Ok((result, None));
    }

    let started = Instant::now();
    let points = run_concurrency_scan(&scenario.fleet, scenario.scan.fleet_sizes(), make_rng)?;
    info!(
        runs = points.len(),
        elapsed_s = started.elapsed().as_secs_f64(),
        "concurrency scan finished"
    );
    Ok((result, Some(points)))
}

fn print_profile(result: &SimulationResult, day: usize) {
    let profile = result.daily_power_profile(day);
    println!("\n--- Power profile, day {day} ---");
    if profile.is_empty() {
        println!("(day is outside the simulated year)");
    }
    for (i, power_kw) in profile.iter().enumerate() {
        println!("{}  {power_kw:>8.2} kW", time_of_day_label(i));
    }
}

fn print_scan(points: &[ScanPoint]) {
    println!("\n--- Concurrency factor by fleet size ---");
    for p in points {
        println!(
            "{:>3} charging points: {:>6.2}%",
            p.fleet_size, p.concurrency_factor_percent
        );
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    // Load config: --scenario takes priority, then --preset, then baseline default
    let mut scenario = if let Some(ref path) = args.scenario {
        ScenarioConfig::from_toml_file(path)?
    } else if let Some(ref name) = args.preset {
        ScenarioConfig::from_preset(name)?
    } else {
        ScenarioConfig::baseline()
    };

    if let Some(seed) = args.seed {
        scenario.simulation.seed = seed;
    }
    if let Some(points) = args.points {
        scenario.fleet.num_charging_points = points;
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let with_scan = args.scan || args.scan_out.is_some();
    let (result, scan) = if args.entropy {
        run(&scenario, with_scan, |_| rand::rng())?
    } else {
        let seed = scenario.simulation.seed;
        run(&scenario, with_scan, |n| {
            StdRng::seed_from_u64(seed.wrapping_add(n as u64))
        })?
    };

    println!("{result}");
    if let Some(day) = args.profile_day {
        print_profile(&result, day);
    }
    if let Some(points) = &scan {
        print_scan(points);
    }

    if let Some(ref path) = args.telemetry_out {
        export_history_csv(&result, path)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?;
        info!(path = %path.display(), "telemetry written");
    }
    if let (Some(path), Some(points)) = (&args.scan_out, &scan) {
        export_scan_csv(points, path)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?;
        info!(path = %path.display(), "scan written");
    }
    if let Some(ref path) = args.json_out {
        export_json(&result, scan.as_deref(), path)
            .with_context(|| format!("failed to write JSON to {}", path.display()))?;
        info!(path = %path.display(), "json written");
    }

    Ok(())
}
