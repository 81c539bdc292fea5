//! Device simulation components for charging-site modeling.

/// Charging point state machine and its session record.
pub mod charging_point;
pub mod types;

// Re-export the main types for convenience
pub use charging_point::{ChargingPoint, ChargingSession, PointState};
pub use types::Device;
pub use types::DeviceContext;
