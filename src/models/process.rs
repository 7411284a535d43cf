//! Process (job) model.
//!
//! A process is one unit of CPU work. It arrives, waits in the ready
//! queue, runs once to completion and is then retired.
//!
//! # Time Representation
//! All times are in milliseconds of virtual simulation time (t=0 is the
//! instant `start` was accepted).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ColorTag;

/// Process identifier. Assigned sequentially from 0 in arrival order,
/// which also makes it the process's index in the arrival record.
pub type ProcessId = usize;

/// Lifecycle position of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessStatus {
    /// Arrived and waiting in the ready queue.
    Ready,
    /// Dispatched; occupying the CPU.
    Running,
    /// Ran to completion.
    Completed,
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessStatus::Ready => write!(f, "READY"),
            ProcessStatus::Running => write!(f, "RUNNING"),
            ProcessStatus::Completed => write!(f, "DONE"),
        }
    }
}

/// A simulated process.
///
/// `remaining_ms` starts equal to `burst_ms` and is never decremented:
/// execution is non-preemptive, so a process has either not started or
/// finished. It is kept separate because it is the SJF comparison key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    /// Unique identifier (arrival order).
    pub id: ProcessId,
    /// Display label derived from `id` (`P00`, `P01`, ...).
    pub name: String,
    /// Total CPU time required (ms). Immutable once created.
    pub burst_ms: u64,
    /// Time still required (ms). Equal to `burst_ms` in this model.
    pub remaining_ms: u64,
    /// Aging credit: time accumulated in the ready queue (ms).
    pub wait_ms: u64,
    /// Opaque display attribute.
    pub color: ColorTag,
    /// Current lifecycle position.
    pub status: ProcessStatus,
    /// Virtual time of arrival.
    pub arrived_at_ms: u64,
    /// Virtual time of dispatch, once dispatched.
    pub started_at_ms: Option<u64>,
    /// Virtual time of completion, once completed.
    pub completed_at_ms: Option<u64>,
}

impl Process {
    /// Creates a ready process that arrived at t=0.
    pub fn new(id: ProcessId, burst_ms: u64) -> Self {
        Self {
            id,
            name: Self::display_name(id),
            burst_ms,
            remaining_ms: burst_ms,
            wait_ms: 0,
            color: ColorTag::default(),
            status: ProcessStatus::Ready,
            arrived_at_ms: 0,
            started_at_ms: None,
            completed_at_ms: None,
        }
    }

    /// Display label for an id: `P` followed by the id padded to two digits.
    pub fn display_name(id: ProcessId) -> String {
        format!("P{id:02}")
    }

    /// Sets the display color.
    pub fn with_color(mut self, color: ColorTag) -> Self {
        self.color = color;
        self
    }

    /// Sets the arrival time.
    pub fn with_arrival(mut self, arrived_at_ms: u64) -> Self {
        self.arrived_at_ms = arrived_at_ms;
        self
    }

    /// Sets the accumulated aging wait.
    pub fn with_wait(mut self, wait_ms: u64) -> Self {
        self.wait_ms = wait_ms;
        self
    }

    pub fn is_ready(&self) -> bool {
        self.status == ProcessStatus::Ready
    }

    pub fn is_running(&self) -> bool {
        self.status == ProcessStatus::Running
    }

    pub fn is_completed(&self) -> bool {
        self.status == ProcessStatus::Completed
    }

    /// Completion minus arrival, once completed.
    pub fn turnaround_ms(&self) -> Option<u64> {
        self.completed_at_ms
            .map(|done| done.saturating_sub(self.arrived_at_ms))
    }

    /// Dispatch minus arrival, once dispatched.
    pub fn response_ms(&self) -> Option<u64> {
        self.started_at_ms
            .map(|start| start.saturating_sub(self.arrived_at_ms))
    }
}
