use crate::devices::types::{Device, DeviceContext};
use crate::error::SimError;

/// One vehicle's occupation of a charging point.
///
/// Sessions are immutable: a point only ever replaces or clears the session
/// it holds. The last powered interval is `end_interval() - 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargingSession {
    start_interval: usize,
    duration_intervals: usize,
    power_kw: f64,
}

impl ChargingSession {
    pub fn new(start_interval: usize, duration_intervals: usize, power_kw: f64) -> Self {
        Self {
            start_interval,
            duration_intervals,
            power_kw,
        }
    }

    pub fn start_interval(&self) -> usize {
        self.start_interval
    }

    pub fn duration_intervals(&self) -> usize {
        self.duration_intervals
    }

    pub fn power_kw(&self) -> f64 {
        self.power_kw
    }

    /// First interval at which the session no longer draws power.
    ///
    /// Saturates at `usize::MAX`, so an oversized session charges until the
    /// run ends.
    pub fn end_interval(&self) -> usize {
        self.start_interval.saturating_add(self.duration_intervals)
    }
}

/// Operating state of a [`ChargingPoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointState {
    Idle,
    Charging,
}

/// A single charging point of fixed rated power.
///
/// Holds at most one [`ChargingSession`]. While a session is active the point
/// draws its rated power every interval, with no ramp or taper; on the first
/// interval at or past the session end it frees itself and draws nothing.
///
/// Power is reported as a positive draw from the site connection.
#[derive(Debug, Clone)]
pub struct ChargingPoint {
    /// Rated charging power in kilowatts.
    pub rated_power_kw: f64,

    session: Option<ChargingSession>,
}

impl ChargingPoint {
    /// Creates an idle charging point.
    ///
    /// # Panics
    ///
    /// Panics if `rated_power_kw` is not a positive finite number.
    pub fn new(rated_power_kw: f64) -> Self {
        assert!(rated_power_kw.is_finite() && rated_power_kw > 0.0);
        Self {
            rated_power_kw,
            session: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.session.is_none()
    }

    pub fn state(&self) -> PointState {
        if self.session.is_some() {
            PointState::Charging
        } else {
            PointState::Idle
        }
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&ChargingSession> {
        self.session.as_ref()
    }

    /// Occupies the point with `session`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ResourceConflict`] if a session is already active;
    /// the active session is kept.
    pub fn start_charging(&mut self, session: ChargingSession) -> Result<(), SimError> {
        if let Some(active) = &self.session {
            return Err(SimError::ResourceConflict {
                requested_start: session.start_interval,
                active_start: active.start_interval,
            });
        }
        self.session = Some(session);
        Ok(())
    }

    /// Advances the point to `current_interval` and returns the power drawn.
    pub fn advance(&mut self, current_interval: usize) -> f64 {
        let Some(session) = &self.session else {
            return 0.0;
        };

        if current_interval >= session.end_interval() {
            self.session = None;
            return 0.0;
        }

        self.rated_power_kw
    }

    /// Drops any active session.
    pub fn reset(&mut self) {
        self.session = None;
    }
}

impl Device for ChargingPoint {
    fn power_kw(&mut self, context: &DeviceContext) -> f64 {
        self.advance(context.timestep)
    }
}
