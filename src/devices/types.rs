//! Common types and traits for device simulation components.

/// Contextual information passed to devices during power calculations.
///
/// # Fields
/// * `timestep` - Current simulation interval index
pub struct DeviceContext {
    pub timestep: usize,
}

impl DeviceContext {
    /// Creates a new `DeviceContext` for the given interval.
    pub fn new(timestep: usize) -> Self {
        Self { timestep }
    }
}

/// Trait defining a device that draws electricity from the grid connection.
///
/// Devices are advanced once per interval by the engine; calling
/// [`Device::power_kw`] may change internal state (e.g. end a session).
pub trait Device {
    /// Returns the power drawn during the specified interval.
    ///
    /// # Arguments
    ///
    /// * `context` - Contextual information about the simulation state, like
    ///   the current `timestep`
    ///
    /// # Returns
    ///
    /// Power in kilowatts (kW), never negative.
    fn power_kw(&mut self, context: &DeviceContext) -> f64;
}
