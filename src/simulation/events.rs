//! Outbound events for the presentation layer.
//!
//! Each event carries an owned snapshot, never a reference into live
//! state. Events serialize as JSON objects tagged by `event`:
//!
//! ```json
//! {"event":"execution_progress","name":"P03","percent":40}
//! ```

use serde::{Deserialize, Serialize};

use crate::models::{ColorTag, Process};

/// Label reported by the progress event while the CPU is idle.
pub const IDLE_LABEL: &str = "idle";

/// One row of the ready-queue view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadyEntry {
    pub name: String,
    pub remaining_ms: u64,
    pub color: ColorTag,
}

impl From<&Process> for ReadyEntry {
    fn from(process: &Process) -> Self {
        Self {
            name: process.name.clone(),
            remaining_ms: process.remaining_ms,
            color: process.color,
        }
    }
}

/// One row of the completed view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedEntry {
    pub name: String,
    pub burst_ms: u64,
    pub color: ColorTag,
}

impl From<&Process> for CompletedEntry {
    fn from(process: &Process) -> Self {
        Self {
            name: process.name.clone(),
            burst_ms: process.burst_ms,
            color: process.color,
        }
    }
}

/// Something the presentation layer should render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimulationEvent {
    /// The ready queue changed (arrival, aging tick, dispatch).
    ReadyQueueChanged { queue: Vec<ReadyEntry> },
    /// A process completed.
    CompletedListChanged { completed: Vec<CompletedEntry> },
    /// Progress of the running process, or `(IDLE_LABEL, 0)` when idle.
    ExecutionProgress { name: String, percent: u8 },
    /// `start` rejected its configuration.
    ValidationFailed { message: String },
    /// Queue empty and arrivals exhausted; all timers stopped.
    SimulationFinished { at_ms: u64, completed: usize },
    /// The run was stopped explicitly.
    SimulationStopped { at_ms: u64 },
}

impl SimulationEvent {
    /// Progress event for a running process.
    pub fn progress(name: impl Into<String>, percent: u8) -> Self {
        SimulationEvent::ExecutionProgress {
            name: name.into(),
            percent,
        }
    }

    /// Progress event reporting an idle CPU.
    pub fn idle() -> Self {
        Self::progress(IDLE_LABEL, 0)
    }

    /// Whether this is the idle progress sentinel.
    pub fn is_idle(&self) -> bool {
        matches!(
            self,
            SimulationEvent::ExecutionProgress { name, percent: 0 } if name == IDLE_LABEL
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_from_process() {
        let p = Process::new(2, 340).with_color(ColorTag::new(0xabcdef));
        let ready = ReadyEntry::from(&p);
        assert_eq!(ready.name, "P02");
        assert_eq!(ready.remaining_ms, 340);
        let done = CompletedEntry::from(&p);
        assert_eq!(done.burst_ms, 340);
        assert_eq!(done.color, ColorTag::new(0xabcdef));
    }

    #[test]
    fn test_idle_sentinel() {
        assert!(SimulationEvent::idle().is_idle());
        assert!(!SimulationEvent::progress("P00", 0).is_idle());
        assert!(!SimulationEvent::progress(IDLE_LABEL, 5).is_idle());
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(SimulationEvent::progress("P03", 40)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"event": "execution_progress", "name": "P03", "percent": 40})
        );

        let queue = SimulationEvent::ReadyQueueChanged {
            queue: vec![ReadyEntry::from(
                &Process::new(0, 15).with_color(ColorTag::new(0x102030)),
            )],
        };
        let json = serde_json::to_value(&queue).unwrap();
        assert_eq!(json["event"], "ready_queue_changed");
        assert_eq!(json["queue"][0]["remaining_ms"], 15);
        // Colors travel as their raw RGB value.
        assert_eq!(json["queue"][0]["color"], 0x102030);
    }
}
