//! Execution driver.
//!
//! Runs one dispatched process to completion against the virtual clock.
//! Progress is elapsed time over burst, not consumed `remaining`:
//!
//! `percent = min(floor(elapsed * 100 / burst), 100)`
//!
//! The driver owns the single CPU slot, so at most one process (and one
//! progress ticker) is ever active.

use crate::error::SimulationError;
use crate::models::{Process, ProcessId};

/// Percent reported once a burst has fully elapsed.
pub const COMPLETE_PERCENT: u8 = 100;

/// CPU slot state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionState {
    /// No process on the CPU.
    #[default]
    Idle,
    /// A process is executing.
    Running {
        pid: ProcessId,
        burst_ms: u64,
        started_at_ms: u64,
        last_percent: u8,
    },
}

/// Result of one progress tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressTick {
    pub pid: ProcessId,
    pub percent: u8,
    /// `elapsed >= burst`; the process must be retired now.
    pub finished: bool,
}

/// Idle → Running → (complete) → Idle.
#[derive(Debug, Clone, Default)]
pub struct ExecutionDriver {
    state: ExecutionState,
}

impl ExecutionDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `process` on the CPU at `now_ms`.
    ///
    /// Fails if another process is already running.
    pub fn begin(&mut self, process: &Process, now_ms: u64) -> Result<(), SimulationError> {
        if let ExecutionState::Running { pid, .. } = self.state {
            return Err(SimulationError::invariant(format!(
                "dispatch of P{:02} while P{pid:02} is running",
                process.id
            )));
        }

        self.state = ExecutionState::Running {
            pid: process.id,
            burst_ms: process.burst_ms,
            started_at_ms: now_ms,
            last_percent: 0,
        };
        log::debug!(
            "dispatch {} burst={}ms at t={}ms",
            process.name,
            process.burst_ms,
            now_ms
        );
        Ok(())
    }

    /// Handles one progress tick at `now_ms`.
    ///
    /// Fails if nothing is running.
    pub fn tick(&mut self, now_ms: u64) -> Result<ProgressTick, SimulationError> {
        match &mut self.state {
            ExecutionState::Running {
                pid,
                burst_ms,
                started_at_ms,
                last_percent,
            } => {
                let elapsed = now_ms.saturating_sub(*started_at_ms);
                let percent = progress_percent(elapsed, *burst_ms).max(*last_percent);
                *last_percent = percent;

                Ok(ProgressTick {
                    pid: *pid,
                    percent,
                    finished: elapsed >= *burst_ms,
                })
            }
            ExecutionState::Idle => Err(SimulationError::invariant(
                "progress tick with no running process",
            )),
        }
    }

    /// Frees the CPU, returning the process that was on it.
    pub fn finish(&mut self) -> Result<ProcessId, SimulationError> {
        match std::mem::take(&mut self.state) {
            ExecutionState::Running { pid, .. } => Ok(pid),
            ExecutionState::Idle => Err(SimulationError::invariant(
                "completion with no running process",
            )),
        }
    }

    /// Drops any running process without completing it.
    pub fn reset(&mut self) {
        self.state = ExecutionState::Idle;
    }

    pub fn state(&self) -> ExecutionState {
        self.state
    }

    /// Id of the running process, if any.
    pub fn running(&self) -> Option<ProcessId> {
        match self.state {
            ExecutionState::Running { pid, .. } => Some(pid),
            ExecutionState::Idle => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == ExecutionState::Idle
    }
}

/// `min(floor(elapsed * 100 / burst), 100)`.
pub fn progress_percent(elapsed_ms: u64, burst_ms: u64) -> u8 {
    if burst_ms == 0 {
        return COMPLETE_PERCENT;
    }
    let scaled = u128::from(elapsed_ms) * 100 / u128::from(burst_ms);
    scaled.min(u128::from(COMPLETE_PERCENT)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(0, 200), 0);
        assert_eq!(progress_percent(20, 200), 10);
        assert_eq!(progress_percent(33, 100), 33);
        assert_eq!(progress_percent(199, 200), 99);
        assert_eq!(progress_percent(200, 200), 100);
        assert_eq!(progress_percent(260, 200), 100);
        assert_eq!(progress_percent(u64::MAX, 1), 100);
    }

    #[test]
    fn test_run_to_completion() {
        let mut driver = ExecutionDriver::new();
        let p = Process::new(4, 50);
        driver.begin(&p, 1000).unwrap();
        assert_eq!(driver.running(), Some(4));

        let t1 = driver.tick(1020).unwrap();
        assert_eq!((t1.percent, t1.finished), (40, false));
        let t2 = driver.tick(1040).unwrap();
        assert_eq!((t2.percent, t2.finished), (80, false));
        let t3 = driver.tick(1060).unwrap();
        assert_eq!((t3.pid, t3.percent, t3.finished), (4, 100, true));

        assert_eq!(driver.finish().unwrap(), 4);
        assert!(driver.is_idle());
    }

    #[test]
    fn test_percent_sequence_monotonic_and_capped() {
        let mut driver = ExecutionDriver::new();
        driver.begin(&Process::new(0, 137), 0).unwrap();
        let mut last = 0;
        let mut now = 0;
        loop {
            now += 20;
            let tick = driver.tick(now).unwrap();
            assert!(tick.percent >= last);
            assert!(tick.percent <= 100);
            last = tick.percent;
            if tick.finished {
                assert_eq!(tick.percent, 100);
                assert!(now >= 137);
                break;
            }
        }
        assert_eq!(now, 140);
    }

    #[test]
    fn test_double_dispatch_rejected() {
        let mut driver = ExecutionDriver::new();
        driver.begin(&Process::new(0, 10), 0).unwrap();
        let err = driver.begin(&Process::new(1, 10), 5).unwrap_err();
        assert!(matches!(err, SimulationError::InvariantViolation(_)));
        // The first process keeps the CPU.
        assert_eq!(driver.running(), Some(0));
    }

    #[test]
    fn test_tick_while_idle_rejected() {
        let mut driver = ExecutionDriver::new();
        assert!(driver.tick(20).is_err());
        assert!(driver.finish().is_err());
    }
}
