//! Error types shared by the simulation engine.

use std::fmt;

/// A configuration value violates its constraint.
///
/// Raised before a simulation starts; a run never begins with an invalid
/// configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    /// Dotted name of the offending parameter (e.g. `prey.step_size`)
    pub parameter: &'static str,
    /// Human readable constraint that was violated
    pub constraint: &'static str,
    /// Offending value as supplied
    pub value: String,
}

impl ConfigError {
    pub fn new(parameter: &'static str, constraint: &'static str, value: impl ToString) -> Self {
        Self {
            parameter,
            constraint,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid configuration: {} {} (got {})",
            self.parameter, self.constraint, self.value
        )
    }
}

impl std::error::Error for ConfigError {}

/// Check that a real-valued parameter is finite and strictly positive.
pub fn require_positive(parameter: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::new(parameter, "must be a positive finite number", value))
    }
}

/// Errors raised while a simulation is running.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    Configuration(ConfigError),
    /// An internal precondition was violated. Indicates a controller bug and
    /// is never retried.
    InvalidState(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(e) => write!(f, "{}", e),
            Self::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Configuration(e) => Some(e),
            Self::InvalidState(_) => None,
        }
    }
}

impl From<ConfigError> for SimulationError {
    fn from(e: ConfigError) -> Self {
        Self::Configuration(e)
    }
}
