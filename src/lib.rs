//! Year-long stochastic simulation of an EV charging point fleet.

/// TOML scenario files and presets.
pub mod config;
pub mod devices;
pub mod error;
pub mod io;
/// Simulation engine, sampling, results, and fleet-size scan.
pub mod sim;
