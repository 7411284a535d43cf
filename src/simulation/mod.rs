//! Discrete-event simulation of a single CPU under SJF with aging.
//!
//! # Components
//!
//! - [`SimulationController`]: lifecycle and event loop
//! - [`TimerQueue`]: virtual clock with cancellable periodic timers
//! - [`SimulationState`]: processes and their lifecycle collections
//! - [`SimulationEvent`]: snapshots for the presentation layer
//! - [`SimulationReport`]: per-run metrics
//! - [`RealtimeDriver`]: wall-clock pacing for animated front ends

mod controller;
mod driver;
mod events;
mod report;
mod state;
mod timer;

pub use controller::{SimulationController, SimulationPhase};
pub use driver::RealtimeDriver;
pub use events::{CompletedEntry, ReadyEntry, SimulationEvent, IDLE_LABEL};
pub use report::{ProcessRecord, SimulationReport};
pub use state::SimulationState;
pub use timer::{TimerEvent, TimerKind, TimerQueue};
