//! Input validation for simulation configuration.
//!
//! Runs before `start` touches any state. Detects:
//! - Inverted or empty burst ranges
//! - Zero-length bursts
//! - Runs with nothing to schedule
//! - Zero timer periods

use std::fmt;

use crate::config::SimulationConfig;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// `min_burst_ms >= max_burst_ms`.
    InvalidBurstRange,
    /// `min_burst_ms == 0`; bursts must be positive.
    ZeroBurst,
    /// `total_processes == 0`.
    NoProcesses,
    /// A timer period or the aging rate is zero.
    ZeroInterval,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a simulation configuration.
///
/// Checks:
/// 1. `min_burst_ms < max_burst_ms`
/// 2. `min_burst_ms > 0`
/// 3. `total_processes > 0`
/// 4. Every timing field is non-zero
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_config(config: &SimulationConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.min_burst_ms >= config.max_burst_ms {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidBurstRange,
            format!(
                "Minimum burst must be less than maximum burst ({} >= {})",
                config.min_burst_ms, config.max_burst_ms
            ),
        ));
    }

    if config.min_burst_ms == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroBurst,
            "Minimum burst must be positive",
        ));
    }

    if config.total_processes == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoProcesses,
            "Process count must be positive",
        ));
    }

    let timing = &config.timing;
    for (field, value) in [
        ("arrival_interval_ms", timing.arrival_interval_ms),
        ("aging_tick_ms", timing.aging_tick_ms),
        ("progress_tick_ms", timing.progress_tick_ms),
        ("aging_wait_per_unit_ms", timing.aging_wait_per_unit_ms),
    ] {
        if value == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroInterval,
                format!("Timing field '{field}' must be positive"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Joins error messages for a single user-facing line.
pub fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimingConfig;

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&SimulationConfig::new(3, 10, 20)).is_ok());
    }

    #[test]
    fn test_inverted_range() {
        let errors = validate_config(&SimulationConfig::new(3, 10, 5)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidBurstRange);
        assert!(errors[0].message.starts_with("Minimum burst must be less"));
    }

    #[test]
    fn test_equal_bounds_rejected() {
        let errors = validate_config(&SimulationConfig::new(3, 10, 10)).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidBurstRange));
    }

    #[test]
    fn test_zero_burst_and_no_processes() {
        let errors = validate_config(&SimulationConfig::new(0, 0, 10)).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
        assert!(kinds.contains(&ValidationErrorKind::ZeroBurst));
        assert!(kinds.contains(&ValidationErrorKind::NoProcesses));
        assert!(!kinds.contains(&ValidationErrorKind::InvalidBurstRange));
    }

    #[test]
    fn test_zero_timing() {
        let timing = TimingConfig {
            aging_tick_ms: 0,
            ..TimingConfig::default()
        };
        let config = SimulationConfig::new(3, 10, 20).with_timing(timing);
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::ZeroInterval);
        assert!(errors[0].message.contains("aging_tick_ms"));
    }

    #[test]
    fn test_join_messages() {
        let errors = validate_config(&SimulationConfig::new(0, 10, 5)).unwrap_err();
        let joined = join_messages(&errors);
        assert!(joined.contains("; "));
        assert!(joined.contains("Process count"));
    }
}
