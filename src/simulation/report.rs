//! Run metrics.
//!
//! Summarizes a run from its process records.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Latest completion time |
//! | Turnaround | completion - arrival |
//! | Response | dispatch - arrival |
//! | Throughput | completed processes per virtual second |
//!
//! Averages cover completed processes only.

use serde::{Deserialize, Serialize};

use crate::models::{Process, ProcessId, ProcessStatus};

use super::state::SimulationState;

/// Per-process timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub id: ProcessId,
    pub name: String,
    pub burst_ms: u64,
    pub status: ProcessStatus,
    pub arrived_at_ms: u64,
    pub started_at_ms: Option<u64>,
    pub completed_at_ms: Option<u64>,
    pub turnaround_ms: Option<u64>,
    pub response_ms: Option<u64>,
    /// Aging credit at the moment of dispatch (or now, if still queued).
    pub aging_wait_ms: u64,
}

impl From<&Process> for ProcessRecord {
    fn from(p: &Process) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            burst_ms: p.burst_ms,
            status: p.status,
            arrived_at_ms: p.arrived_at_ms,
            started_at_ms: p.started_at_ms,
            completed_at_ms: p.completed_at_ms,
            turnaround_ms: p.turnaround_ms(),
            response_ms: p.response_ms(),
            aging_wait_ms: p.wait_ms,
        }
    }
}

/// Run summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Every process, in arrival order.
    pub processes: Vec<ProcessRecord>,
    /// Process names in completion order.
    pub completion_order: Vec<String>,
    /// Latest completion time (ms). 0 when nothing completed.
    pub makespan_ms: u64,
    pub avg_turnaround_ms: f64,
    pub avg_response_ms: f64,
    /// Completed processes per second of virtual time.
    pub throughput_per_sec: f64,
}

impl SimulationReport {
    /// Builds the report from the current state.
    pub fn from_state(state: &SimulationState) -> Self {
        let processes: Vec<ProcessRecord> =
            state.processes().iter().map(ProcessRecord::from).collect();
        let completed = state.completed();

        let completion_order: Vec<String> = completed.iter().map(|p| p.name.clone()).collect();
        let makespan_ms = completed
            .iter()
            .filter_map(|p| p.completed_at_ms)
            .max()
            .unwrap_or(0);

        let count = completed.len();
        let mean = |total: u64| {
            if count == 0 {
                0.0
            } else {
                total as f64 / count as f64
            }
        };
        let total_turnaround: u64 = completed.iter().filter_map(|p| p.turnaround_ms()).sum();
        let total_response: u64 = completed.iter().filter_map(|p| p.response_ms()).sum();

        let throughput_per_sec = if makespan_ms == 0 {
            0.0
        } else {
            count as f64 * 1000.0 / makespan_ms as f64
        };

        Self {
            processes,
            completion_order,
            makespan_ms,
            avg_turnaround_ms: mean(total_turnaround),
            avg_response_ms: mean(total_response),
            throughput_per_sec,
        }
    }

    pub fn completed_count(&self) -> usize {
        self.completion_order.len()
    }

    /// Longest time any completed process waited for the CPU.
    pub fn max_response_ms(&self) -> u64 {
        self.processes
            .iter()
            .filter_map(|r| r.response_ms)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_basic() {
        let mut state = SimulationState::new();
        state.admit(Process::new(0, 100).with_arrival(0)).unwrap();
        state.admit(Process::new(1, 50).with_arrival(0)).unwrap();

        state.dispatch(1, 0).unwrap();
        state.complete(1, 60).unwrap();
        state.dispatch(0, 60).unwrap();
        state.complete(0, 160).unwrap();

        let report = SimulationReport::from_state(&state);
        assert_eq!(report.completion_order, vec!["P01", "P00"]);
        assert_eq!(report.makespan_ms, 160);
        // Turnaround: 60 and 160.
        assert!((report.avg_turnaround_ms - 110.0).abs() < 1e-10);
        // Response: 0 and 60.
        assert!((report.avg_response_ms - 30.0).abs() < 1e-10);
        assert_eq!(report.max_response_ms(), 60);
        assert!((report.throughput_per_sec - 12.5).abs() < 1e-10);
    }

    #[test]
    fn test_report_partial_run() {
        let mut state = SimulationState::new();
        state.admit(Process::new(0, 100)).unwrap();
        state.dispatch(0, 0).unwrap();

        let report = SimulationReport::from_state(&state);
        assert_eq!(report.completed_count(), 0);
        assert_eq!(report.makespan_ms, 0);
        assert_eq!(report.avg_turnaround_ms, 0.0);
        assert_eq!(report.processes[0].status, ProcessStatus::Running);
        assert_eq!(report.processes[0].response_ms, Some(0));
    }

    #[test]
    fn test_report_empty() {
        let report = SimulationReport::from_state(&SimulationState::new());
        assert!(report.processes.is_empty());
        assert_eq!(report.throughput_per_sec, 0.0);
    }
}
