/// Interval clock and time-of-day helpers.
pub mod clock;
pub mod engine;
pub mod results;
/// Arrival and demand sampling.
pub mod sampler;
/// Fleet-size concurrency scan.
pub mod scan;
pub mod types;

pub use engine::{Engine, run_simulation};
pub use results::SimulationResult;
pub use sampler::{RandomSource, ScriptedSource};
pub use scan::{DEFAULT_FLEET_SIZES, ScanPoint, run_concurrency_scan};
pub use types::SimulationConfig;
