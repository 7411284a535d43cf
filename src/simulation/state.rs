//! Owned simulation state.
//!
//! Every process lives in `processes`, indexed by id (ids are assigned
//! in arrival order from 0). The ready queue, running slot and completed
//! list hold ids only, and all three are updated together by the
//! methods here so a process is always in exactly one of them.

use std::collections::HashSet;

use crate::error::SimulationError;
use crate::models::{Process, ProcessId, ProcessStatus};

use super::events::{CompletedEntry, ReadyEntry};

/// Process record and lifecycle collections of one run.
#[derive(Debug, Clone, Default)]
pub struct SimulationState {
    processes: Vec<Process>,
    ready_queue: Vec<ProcessId>,
    running: Option<ProcessId>,
    completed: Vec<ProcessId>,
}

impl SimulationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties every collection.
    pub fn reset(&mut self) {
        self.processes.clear();
        self.ready_queue.clear();
        self.running = None;
        self.completed.clear();
    }

    /// Records a newly arrived process and appends it to the ready queue.
    pub fn admit(&mut self, mut process: Process) -> Result<ProcessId, SimulationError> {
        let id = process.id;
        if id != self.processes.len() {
            return Err(SimulationError::invariant(format!(
                "arrival id {id} out of sequence (expected {})",
                self.processes.len()
            )));
        }
        process.status = ProcessStatus::Ready;
        self.processes.push(process);
        self.ready_queue.push(id);
        Ok(id)
    }

    /// Moves `pid` from the ready queue to the running slot.
    pub fn dispatch(&mut self, pid: ProcessId, now_ms: u64) -> Result<&Process, SimulationError> {
        if let Some(current) = self.running {
            return Err(SimulationError::invariant(format!(
                "dispatch of P{pid:02} while P{current:02} is running"
            )));
        }
        let position = self
            .ready_queue
            .iter()
            .position(|&id| id == pid)
            .ok_or_else(|| {
                SimulationError::invariant(format!("dispatch of P{pid:02} not in ready queue"))
            })?;

        self.ready_queue.remove(position);
        self.running = Some(pid);

        let process = &mut self.processes[pid];
        process.status = ProcessStatus::Running;
        process.started_at_ms = Some(now_ms);
        Ok(&self.processes[pid])
    }

    /// Retires the running process to the completed list.
    pub fn complete(&mut self, pid: ProcessId, now_ms: u64) -> Result<&Process, SimulationError> {
        if self.running != Some(pid) {
            return Err(SimulationError::invariant(format!(
                "completion of P{pid:02} which is not running"
            )));
        }

        // Normally already gone; dispatch removes it.
        self.ready_queue.retain(|&id| id != pid);
        self.running = None;
        self.completed.push(pid);

        let process = &mut self.processes[pid];
        process.status = ProcessStatus::Completed;
        process.completed_at_ms = Some(now_ms);
        Ok(&self.processes[pid])
    }

    /// Every process ever created, in arrival order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn process(&self, pid: ProcessId) -> Option<&Process> {
        self.processes.get(pid)
    }

    /// Ready processes in queue order.
    pub fn ready(&self) -> Vec<&Process> {
        self.ready_queue
            .iter()
            .map(|&id| &self.processes[id])
            .collect()
    }

    /// Ready processes, mutable, for aging.
    pub fn ready_mut(&mut self) -> impl Iterator<Item = &mut Process> {
        self.processes.iter_mut().filter(|p| p.is_ready())
    }

    pub fn ready_ids(&self) -> &[ProcessId] {
        &self.ready_queue
    }

    pub fn running(&self) -> Option<&Process> {
        self.running.map(|id| &self.processes[id])
    }

    /// Completed processes in completion order.
    pub fn completed(&self) -> Vec<&Process> {
        self.completed
            .iter()
            .map(|&id| &self.processes[id])
            .collect()
    }

    pub fn completed_ids(&self) -> &[ProcessId] {
        &self.completed
    }

    pub fn is_queue_empty(&self) -> bool {
        self.ready_queue.is_empty()
    }

    pub fn is_cpu_idle(&self) -> bool {
        self.running.is_none()
    }

    /// Ready-queue snapshot for the presentation layer.
    pub fn ready_snapshot(&self) -> Vec<ReadyEntry> {
        self.ready().into_iter().map(ReadyEntry::from).collect()
    }

    /// Completed-list snapshot for the presentation layer.
    pub fn completed_snapshot(&self) -> Vec<CompletedEntry> {
        self.completed()
            .into_iter()
            .map(CompletedEntry::from)
            .collect()
    }

    /// Verifies the cross-collection invariants.
    ///
    /// 1. Every process is in exactly one of ready / running / completed
    /// 2. At most one process has status `Running`
    /// 3. Each process's status matches the collection holding it
    pub fn check_invariants(&self) -> Result<(), SimulationError> {
        let mut seen = HashSet::new();
        let members = self
            .ready_queue
            .iter()
            .map(|&id| (id, ProcessStatus::Ready))
            .chain(self.running.map(|id| (id, ProcessStatus::Running)))
            .chain(
                self.completed
                    .iter()
                    .map(|&id| (id, ProcessStatus::Completed)),
            );

        for (id, expected) in members {
            let process = self.processes.get(id).ok_or_else(|| {
                SimulationError::invariant(format!("collection holds unknown id {id}"))
            })?;
            if !seen.insert(id) {
                return Err(SimulationError::invariant(format!(
                    "{} is in more than one collection",
                    process.name
                )));
            }
            if process.status != expected {
                return Err(SimulationError::invariant(format!(
                    "{} has status {} but sits in the {} collection",
                    process.name, process.status, expected
                )));
            }
        }

        if seen.len() != self.processes.len() {
            return Err(SimulationError::invariant(format!(
                "{} process(es) belong to no collection",
                self.processes.len() - seen.len()
            )));
        }

        let running = self.processes.iter().filter(|p| p.is_running()).count();
        if running > 1 {
            return Err(SimulationError::invariant(format!(
                "{running} processes are running"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(bursts: &[u64]) -> SimulationState {
        let mut state = SimulationState::new();
        for (id, &burst) in bursts.iter().enumerate() {
            state.admit(Process::new(id, burst)).unwrap();
        }
        state
    }

    #[test]
    fn test_admit_dispatch_complete() {
        let mut state = state_with(&[10, 3, 7]);
        assert_eq!(state.ready_ids(), &[0, 1, 2]);

        state.dispatch(1, 800).unwrap();
        assert_eq!(state.ready_ids(), &[0, 2]);
        assert_eq!(state.running().map(|p| p.id), Some(1));
        assert_eq!(state.process(1).unwrap().started_at_ms, Some(800));
        state.check_invariants().unwrap();

        state.complete(1, 820).unwrap();
        assert!(state.is_cpu_idle());
        assert_eq!(state.completed_ids(), &[1]);
        assert_eq!(state.process(1).unwrap().status, ProcessStatus::Completed);
        state.check_invariants().unwrap();
    }

    #[test]
    fn test_second_dispatch_rejected() {
        let mut state = state_with(&[10, 3]);
        state.dispatch(0, 0).unwrap();
        assert!(state.dispatch(1, 0).is_err());
        assert_eq!(state.ready_ids(), &[1]);
        state.check_invariants().unwrap();
    }

    #[test]
    fn test_dispatch_unknown_rejected() {
        let mut state = state_with(&[10]);
        assert!(state.dispatch(5, 0).is_err());
        assert!(state.is_cpu_idle());
    }

    #[test]
    fn test_complete_requires_running() {
        let mut state = state_with(&[10, 4]);
        assert!(state.complete(0, 10).is_err());
        state.dispatch(0, 0).unwrap();
        assert!(state.complete(1, 10).is_err());
    }

    #[test]
    fn test_out_of_sequence_admit_rejected() {
        let mut state = state_with(&[10]);
        assert!(state.admit(Process::new(3, 5)).is_err());
        assert_eq!(state.processes().len(), 1);
    }

    #[test]
    fn test_ready_mut_skips_running() {
        let mut state = state_with(&[10, 20, 30]);
        state.dispatch(1, 0).unwrap();
        let ids: Vec<_> = state.ready_mut().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn test_invariant_detects_status_mismatch() {
        let mut state = state_with(&[10, 20]);
        state.processes[0].status = ProcessStatus::Running;
        assert!(state.check_invariants().is_err());
    }

    #[test]
    fn test_snapshots() {
        let mut state = state_with(&[10, 20]);
        state.dispatch(0, 0).unwrap();
        state.complete(0, 20).unwrap();

        let ready = state.ready_snapshot();
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].name, "P01");
        assert_eq!(ready[0].remaining_ms, 20);

        let done = state.completed_snapshot();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].burst_ms, 10);
    }

    #[test]
    fn test_reset() {
        let mut state = state_with(&[10, 20]);
        state.dispatch(0, 0).unwrap();
        state.reset();
        assert!(state.processes().is_empty());
        assert!(state.is_queue_empty());
        assert!(state.is_cpu_idle());
        assert!(state.completed_ids().is_empty());
    }
}
