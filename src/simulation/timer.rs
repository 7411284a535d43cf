//! Virtual clock with cancellable periodic timers.
//!
//! # Algorithm
//!
//! Firings sit in a min-heap keyed by `(due_ms, sequence)`. Each logical
//! timer has one slot holding its period and a generation number.
//! Restarting or cancelling a slot bumps the generation; heap entries
//! from older generations are discarded when they surface, so a
//! cancelled timer can never fire again.
//!
//! A periodic timer first fires one period after it is armed and is
//! re-armed at `due + period` each time it fires.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use serde::{Deserialize, Serialize};

/// The three logical timers of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimerKind {
    /// Process arrivals.
    Arrival,
    /// Wait-time crediting for queued processes.
    Aging,
    /// Progress of the running process.
    Progress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Firing {
    due_ms: u64,
    seq: u64,
    kind: TimerKind,
    generation: u64,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    period_ms: u64,
    generation: u64,
}

/// A due firing handed to the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    pub kind: TimerKind,
    pub at_ms: u64,
}

/// Virtual clock and timer heap.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now_ms: u64,
    seq: u64,
    generation: u64,
    heap: BinaryHeap<Reverse<Firing>>,
    slots: HashMap<TimerKind, Slot>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time (ms).
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Arms `kind` to fire every `period_ms`, replacing any previous arming.
    pub fn start(&mut self, kind: TimerKind, period_ms: u64) {
        let period_ms = period_ms.max(1);
        self.generation += 1;
        let slot = Slot {
            period_ms,
            generation: self.generation,
        };
        self.slots.insert(kind, slot);
        self.push(kind, self.now_ms + period_ms, slot.generation);
    }

    /// Disarms `kind`. Returns whether it was armed.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        self.slots.remove(&kind).is_some()
    }

    /// Disarms every timer and rewinds the clock to 0.
    pub fn reset(&mut self) {
        self.slots.clear();
        self.heap.clear();
        self.now_ms = 0;
    }

    /// Disarms every timer, keeping the clock.
    pub fn cancel_all(&mut self) {
        self.slots.clear();
        self.heap.clear();
    }

    pub fn is_active(&self, kind: TimerKind) -> bool {
        self.slots.contains_key(&kind)
    }

    /// Whether any timer is armed.
    pub fn has_active(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Armed timers, in a stable order.
    pub fn active(&self) -> Vec<TimerKind> {
        let mut kinds: Vec<_> = self.slots.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Due time of the next live firing.
    pub fn next_due_ms(&mut self) -> Option<u64> {
        self.discard_stale();
        self.heap.peek().map(|Reverse(f)| f.due_ms)
    }

    /// Pops the next live firing if it is due at or before `until_ms`
    /// (or unconditionally when `until_ms` is `None`), advances the
    /// clock to it and re-arms the timer for its next period.
    pub fn pop_due(&mut self, until_ms: Option<u64>) -> Option<TimerEvent> {
        let due = self.next_due_ms()?;
        if until_ms.is_some_and(|limit| due > limit) {
            return None;
        }

        let Reverse(firing) = self.heap.pop()?;
        self.now_ms = self.now_ms.max(firing.due_ms);

        if let Some(slot) = self.slots.get(&firing.kind).copied() {
            self.push(firing.kind, firing.due_ms + slot.period_ms, slot.generation);
        }

        Some(TimerEvent {
            kind: firing.kind,
            at_ms: firing.due_ms,
        })
    }

    /// Moves the clock forward without firing anything.
    pub fn advance_to(&mut self, at_ms: u64) {
        self.now_ms = self.now_ms.max(at_ms);
    }

    fn push(&mut self, kind: TimerKind, due_ms: u64, generation: u64) {
        self.seq += 1;
        self.heap.push(Reverse(Firing {
            due_ms,
            seq: self.seq,
            kind,
            generation,
        }));
    }

    fn discard_stale(&mut self) {
        while let Some(Reverse(top)) = self.heap.peek() {
            let live = self
                .slots
                .get(&top.kind)
                .is_some_and(|slot| slot.generation == top.generation);
            if live {
                break;
            }
            self.heap.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(timers: &mut TimerQueue, until_ms: u64) -> Vec<(TimerKind, u64)> {
        let mut fired = Vec::new();
        while let Some(event) = timers.pop_due(Some(until_ms)) {
            fired.push((event.kind, event.at_ms));
        }
        fired
    }

    #[test]
    fn test_periodic_firing() {
        let mut timers = TimerQueue::new();
        timers.start(TimerKind::Aging, 20);
        let fired = drain(&mut timers, 65);
        assert_eq!(
            fired,
            vec![
                (TimerKind::Aging, 20),
                (TimerKind::Aging, 40),
                (TimerKind::Aging, 60)
            ]
        );
        assert_eq!(timers.now_ms(), 60);
        assert_eq!(timers.next_due_ms(), Some(80));
    }

    #[test]
    fn test_same_instant_fires_in_arming_order() {
        let mut timers = TimerQueue::new();
        timers.start(TimerKind::Arrival, 40);
        timers.start(TimerKind::Aging, 20);
        let fired = drain(&mut timers, 40);
        // Arrival@40 was armed before Aging@40 (re-armed at t=20).
        assert_eq!(
            fired,
            vec![
                (TimerKind::Aging, 20),
                (TimerKind::Arrival, 40),
                (TimerKind::Aging, 40)
            ]
        );
    }

    #[test]
    fn test_cancel_prevents_future_firings() {
        let mut timers = TimerQueue::new();
        timers.start(TimerKind::Progress, 20);
        assert!(timers.pop_due(None).is_some());
        assert!(timers.cancel(TimerKind::Progress));
        assert!(!timers.cancel(TimerKind::Progress));
        assert!(!timers.has_active());
        assert_eq!(timers.pop_due(None), None);
        assert_eq!(timers.next_due_ms(), None);
    }

    #[test]
    fn test_restart_drops_previous_incarnation() {
        let mut timers = TimerQueue::new();
        timers.start(TimerKind::Progress, 20);
        timers.advance_to(10);
        timers.start(TimerKind::Progress, 20);
        // The t=20 firing of the first arming is stale.
        assert_eq!(
            timers.pop_due(None),
            Some(TimerEvent {
                kind: TimerKind::Progress,
                at_ms: 30
            })
        );
    }

    #[test]
    fn test_reset_rewinds_and_disarms() {
        let mut timers = TimerQueue::new();
        timers.start(TimerKind::Arrival, 800);
        timers.start(TimerKind::Aging, 20);
        drain(&mut timers, 1000);
        timers.reset();
        assert_eq!(timers.now_ms(), 0);
        assert!(timers.active().is_empty());
        assert_eq!(timers.pop_due(None), None);
    }

    #[test]
    fn test_active_listing() {
        let mut timers = TimerQueue::new();
        timers.start(TimerKind::Progress, 20);
        timers.start(TimerKind::Arrival, 800);
        assert_eq!(timers.active(), vec![TimerKind::Arrival, TimerKind::Progress]);
        assert!(timers.is_active(TimerKind::Arrival));
        assert!(!timers.is_active(TimerKind::Aging));
    }
}
