//! CSV and JSON export of simulation results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::sim::clock::{day_of, time_of_day_label};
use crate::sim::results::SimulationResult;
use crate::sim::scan::ScanPoint;

/// Column header for the power history CSV.
const HISTORY_HEADER: &str = "interval,day,time_of_day,power_kw";

/// Column header for the concurrency scan CSV.
const SCAN_HEADER: &str = "fleet_size,concurrency_factor_pct";

/// Exports the per-interval fleet power to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_history_csv(result: &SimulationResult, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_history_csv(&result.power_demand_history, io::BufWriter::new(file))
}

/// Writes the per-interval fleet power as CSV to any writer.
///
/// One row per interval, in order, with the day index and the `HH:MM`
/// start time of the interval.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_history_csv(history: &[f64], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(HISTORY_HEADER.split(','))?;

    for (interval, power_kw) in history.iter().enumerate() {
        wtr.write_record(&[
            interval.to_string(),
            day_of(interval).to_string(),
            time_of_day_label(interval),
            format!("{power_kw:.4}"),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports the concurrency scan to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_scan_csv(points: &[ScanPoint], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_scan_csv(points, io::BufWriter::new(file))
}

/// Writes the concurrency scan as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_scan_csv(points: &[ScanPoint], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(SCAN_HEADER.split(','))?;

    for p in points {
        wtr.write_record(&[
            p.fleet_size.to_string(),
            format!("{:.2}", p.concurrency_factor_percent),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Everything a chart front end needs from one invocation.
#[derive(Serialize)]
struct Report<'a> {
    result: &'a SimulationResult,
    scan: Option<&'a [ScanPoint]>,
}

/// Writes the result (and scan, if run) as a single JSON document.
///
/// # Errors
///
/// Returns an `io::Error` if serialization or writing fails.
pub fn write_json(
    result: &SimulationResult,
    scan: Option<&[ScanPoint]>,
    mut writer: impl Write,
) -> io::Result<()> {
    serde_json::to_writer(&mut writer, &Report { result, scan })?;
    writer.flush()
}

/// Exports the result (and scan, if run) as JSON to the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation, serialization, or writing fails.
pub fn export_json(
    result: &SimulationResult,
    scan: Option<&[ScanPoint]>,
    path: &Path,
) -> io::Result<()> {
    let file = File::create(path)?;
    write_json(result, scan, io::BufWriter::new(file))
}
