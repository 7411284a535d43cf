//! Shortest-Job-First CPU scheduling simulator with optional aging.
//!
//! Processes arrive one at a time with random burst lengths, wait in a
//! ready queue, and run non-preemptively on a single CPU. The next process
//! is the one with the smallest effective key: its remaining burst, or,
//! with aging on, its remaining burst reduced by the time it has waited.
//!
//! # Modules
//!
//! - **`models`**: `Process`, `ProcessStatus`, `ColorTag`
//! - **`config`**: `SimulationConfig`, `TimingConfig`, `BurstRange`
//! - **`validation`**: configuration checks
//! - **`arrival`**: burst sources and the arrival scheduler
//! - **`aging`**: wait-time crediting for queued processes
//! - **`dispatching`**: selection rules (SJF, aged SJF) and the `Selector`
//! - **`execution`**: the single CPU slot and progress computation
//! - **`simulation`**: controller, timers, events, reports
//!
//! # Example
//!
//! ```
//! use sjf_sim::prelude::*;
//!
//! let mut sim = SimulationController::new(ScriptedBursts::new([400, 250, 100]));
//! sim.start(SimulationConfig::new(3, 50, 500).with_aging(true)).unwrap();
//! let report = sim.run_to_completion().unwrap();
//!
//! assert_eq!(report.completed_count(), 3);
//! assert!(sim.pending_events().iter().any(|e| e.is_idle()));
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin, Gagne (2018), "Operating System Concepts", ch. 5
//! - Tanenbaum, Bos (2014), "Modern Operating Systems", sec. 2.4

pub mod aging;
pub mod arrival;
pub mod config;
pub mod dispatching;
pub mod error;
pub mod execution;
pub mod models;
pub mod simulation;
pub mod validation;

/// Common imports.
pub mod prelude {
    pub use crate::arrival::{BurstSource, ScriptedBursts, UniformBursts};
    pub use crate::config::{SimulationConfig, TimingConfig};
    pub use crate::error::SimulationError;
    pub use crate::models::{ColorTag, Process, ProcessId, ProcessStatus};
    pub use crate::simulation::{
        RealtimeDriver, SimulationController, SimulationEvent, SimulationPhase, SimulationReport,
    };
}
