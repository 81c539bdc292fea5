//! Error types shared by configuration, devices, and the engine.

use thiserror::Error;

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"fleet.num_charging_points"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Failures raised while building or running a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// The configuration violates one or more constraints; nothing was run.
    #[error("invalid configuration: {}", join_errors(.0))]
    InvalidConfiguration(Vec<ConfigError>),

    /// A session was offered to a charging point that is still occupied.
    #[error(
        "charging point is occupied by a session started at interval {active_start}, \
         cannot start another at interval {requested_start}"
    )]
    ResourceConflict {
        requested_start: usize,
        active_start: usize,
    },
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_configuration_lists_every_field() {
        let err = SimError::InvalidConfiguration(vec![
            ConfigError::new("fleet.num_charging_points", "must be > 0"),
            ConfigError::new("fleet.charging_point_power_kw", "must be > 0"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("fleet.num_charging_points"));
        assert!(msg.contains("fleet.charging_point_power_kw"));
    }

    #[test]
    fn config_error_display() {
        let e = ConfigError::new("preset", "unknown");
        assert_eq!(e.to_string(), "config error: preset: unknown");
    }
}
