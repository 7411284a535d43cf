//! Errors surfaced by the simulation core.

use std::fmt;

use crate::validation::{join_messages, ValidationError};

/// Failure of a core operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// `start` rejected its configuration. No state was touched.
    Validation(Vec<ValidationError>),
    /// The state machine reached a state the design rules out.
    /// Fatal: the run must not continue.
    InvariantViolation(String),
}

impl SimulationError {
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        let message = message.into();
        log::error!("invariant violation: {message}");
        SimulationError::InvariantViolation(message)
    }

    /// Validation errors, if this is a rejected configuration.
    pub fn validation_errors(&self) -> Option<&[ValidationError]> {
        match self {
            SimulationError::Validation(errors) => Some(errors),
            SimulationError::InvariantViolation(_) => None,
        }
    }
}

impl From<Vec<ValidationError>> for SimulationError {
    fn from(errors: Vec<ValidationError>) -> Self {
        SimulationError::Validation(errors)
    }
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Validation(errors) => {
                write!(f, "invalid configuration: {}", join_messages(errors))
            }
            SimulationError::InvariantViolation(message) => {
                write!(f, "invariant violation: {message}")
            }
        }
    }
}

impl std::error::Error for SimulationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;

    #[test]
    fn test_from_validation_errors() {
        let errors = SimulationConfig::new(1, 9, 3).validate().unwrap_err();
        let err = SimulationError::from(errors);
        assert_eq!(err.validation_errors().map(|e| e.len()), Some(1));
        assert!(err.to_string().starts_with("invalid configuration: "));
    }

    #[test]
    fn test_invariant_display() {
        let err = SimulationError::invariant("two processes running");
        assert_eq!(err.validation_errors(), None);
        assert_eq!(err.to_string(), "invariant violation: two processes running");
    }
}
