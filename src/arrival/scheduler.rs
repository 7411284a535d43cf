//! Arrival scheduler: creates one process per arrival tick.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::BurstSource;
use crate::config::BurstRange;
use crate::models::{ColorTag, Process, ProcessId};

/// Outcome of one arrival tick.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrivalTick {
    /// A new process arrived. `last` is set when it was the final one.
    Arrived { process: Process, last: bool },
    /// The configured count was already reached; nothing was created.
    Exhausted,
}

/// Emits `total` processes, one per tick, with sequential ids.
///
/// Once the count is reached the scheduler is exhausted for good.
#[derive(Debug, Clone)]
pub struct ArrivalScheduler {
    total: usize,
    generated: usize,
    range: BurstRange,
    colors: SmallRng,
}

impl ArrivalScheduler {
    /// Creates a scheduler for `total` processes with bursts in `range`.
    pub fn new(total: usize, range: BurstRange) -> Self {
        Self::with_color_rng(total, range, SmallRng::from_os_rng())
    }

    /// Same as [`new`](Self::new) with an explicit color source.
    pub fn with_color_rng(total: usize, range: BurstRange, colors: SmallRng) -> Self {
        Self {
            total,
            generated: 0,
            range,
            colors,
        }
    }

    /// Handles one arrival tick at virtual time `now_ms`.
    pub fn tick<B: BurstSource + ?Sized>(&mut self, source: &mut B, now_ms: u64) -> ArrivalTick {
        if self.is_exhausted() {
            return ArrivalTick::Exhausted;
        }

        let id: ProcessId = self.generated;
        let burst_ms = source.next_burst(&self.range).max(1);
        let process = Process::new(id, burst_ms)
            .with_color(ColorTag::random(&mut self.colors))
            .with_arrival(now_ms);
        self.generated += 1;

        log::debug!(
            "arrival {} burst={}ms at t={}ms ({}/{})",
            process.name,
            burst_ms,
            now_ms,
            self.generated,
            self.total
        );

        ArrivalTick::Arrived {
            process,
            last: self.is_exhausted(),
        }
    }

    /// Whether every configured process has been created.
    pub fn is_exhausted(&self) -> bool {
        self.generated >= self.total
    }

    /// Processes created so far.
    pub fn generated(&self) -> usize {
        self.generated
    }

    /// Processes still to come.
    pub fn pending(&self) -> usize {
        self.total.saturating_sub(self.generated)
    }

    pub fn total(&self) -> usize {
        self.total
    }
}
