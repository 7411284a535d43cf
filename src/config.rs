//! Simulation configuration.
//!
//! Plain serde data. The presentation layer builds one of these from
//! whatever controls it has and hands it to
//! [`SimulationController::start`](crate::simulation::SimulationController::start).
//!
//! # Example
//!
//! ```
//! use sjf_sim::config::SimulationConfig;
//!
//! let config = SimulationConfig::new(5, 100, 900).with_aging(true);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.timing.arrival_interval_ms, 800);
//! ```

use serde::{Deserialize, Serialize};

use crate::validation::{validate_config, ValidationResult};

/// Interval between process arrivals (ms).
pub const DEFAULT_ARRIVAL_INTERVAL_MS: u64 = 800;
/// Interval between aging ticks (ms). Also the wait credited per tick.
pub const DEFAULT_AGING_TICK_MS: u64 = 20;
/// Interval between progress ticks of the running process (ms).
pub const DEFAULT_PROGRESS_TICK_MS: u64 = 20;
/// Waited time that buys one unit of key reduction under aging (ms).
pub const DEFAULT_AGING_WAIT_PER_UNIT_MS: u64 = 50;

/// Timer periods and the aging rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub arrival_interval_ms: u64,
    pub aging_tick_ms: u64,
    pub progress_tick_ms: u64,
    pub aging_wait_per_unit_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            arrival_interval_ms: DEFAULT_ARRIVAL_INTERVAL_MS,
            aging_tick_ms: DEFAULT_AGING_TICK_MS,
            progress_tick_ms: DEFAULT_PROGRESS_TICK_MS,
            aging_wait_per_unit_ms: DEFAULT_AGING_WAIT_PER_UNIT_MS,
        }
    }
}

/// Inclusive burst-length bounds (ms).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurstRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl BurstRange {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// Whether `burst_ms` lies inside the bounds.
    pub fn contains(&self, burst_ms: u64) -> bool {
        (self.min_ms..=self.max_ms).contains(&burst_ms)
    }
}

/// Start-time configuration of one simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of processes the arrival scheduler creates.
    pub total_processes: usize,
    /// Smallest burst length (ms), inclusive.
    pub min_burst_ms: u64,
    /// Largest burst length (ms), inclusive.
    pub max_burst_ms: u64,
    /// Initial state of the aging flag. Can be toggled while running.
    pub aging_enabled: bool,
    /// Timer periods.
    pub timing: TimingConfig,
}

impl SimulationConfig {
    /// Creates a configuration with aging off and default timing.
    pub fn new(total_processes: usize, min_burst_ms: u64, max_burst_ms: u64) -> Self {
        Self {
            total_processes,
            min_burst_ms,
            max_burst_ms,
            aging_enabled: false,
            timing: TimingConfig::default(),
        }
    }

    /// Sets the initial aging flag.
    pub fn with_aging(mut self, enabled: bool) -> Self {
        self.aging_enabled = enabled;
        self
    }

    /// Replaces the timer configuration.
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Sets the arrival interval.
    pub fn with_arrival_interval(mut self, interval_ms: u64) -> Self {
        self.timing.arrival_interval_ms = interval_ms;
        self
    }

    /// Burst bounds as a range.
    pub fn burst_range(&self) -> BurstRange {
        BurstRange::new(self.min_burst_ms, self.max_burst_ms)
    }

    /// Checks the configuration. See [`validate_config`].
    pub fn validate(&self) -> ValidationResult {
        validate_config(self)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(10, 100, 1000)
    }
}
