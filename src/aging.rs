//! Aging tracker.
//!
//! On every aging tick each queued process is credited one tick length
//! of wait. Only the ready queue is touched; the running process and
//! completed processes never age.

use crate::models::Process;

/// Credits wait time to queued processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgingTracker {
    tick_ms: u64,
    ticks_applied: u64,
}

impl AgingTracker {
    /// Creates a tracker that credits `tick_ms` per tick.
    pub fn new(tick_ms: u64) -> Self {
        Self {
            tick_ms,
            ticks_applied: 0,
        }
    }

    /// Handles one aging tick.
    ///
    /// Does nothing when aging is disabled or the queue is empty.
    /// Returns the number of processes credited.
    pub fn tick<'a, I>(&mut self, queued: I, aging_enabled: bool) -> usize
    where
        I: IntoIterator<Item = &'a mut Process>,
    {
        if !aging_enabled {
            return 0;
        }

        let mut aged = 0;
        for process in queued {
            debug_assert!(process.is_ready(), "aging a non-ready process");
            process.wait_ms = process.wait_ms.saturating_add(self.tick_ms);
            aged += 1;
        }

        if aged > 0 {
            self.ticks_applied += 1;
            log::trace!("aging tick: {aged} queued process(es) +{}ms", self.tick_ms);
        }
        aged
    }

    /// Wait credited per tick (ms).
    pub fn tick_ms(&self) -> u64 {
        self.tick_ms
    }

    /// Ticks that credited at least one process.
    pub fn ticks_applied(&self) -> u64 {
        self.ticks_applied
    }
}
