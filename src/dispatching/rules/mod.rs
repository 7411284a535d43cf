//! Built-in selection rules.
//!
//! - **SJF**: key = remaining burst
//! - **Aged SJF**: key = remaining burst minus one unit per
//!   `aging_wait_per_unit_ms` waited, floored at 1
//!
//! # Key Convention
//! All rules return lower keys for processes that should run first.

use super::{EffectiveKey, SelectionContext, SelectionRule};
use crate::models::Process;

/// Smallest key any rule may return.
pub const MIN_EFFECTIVE_KEY: EffectiveKey = 1;

/// Shortest Job First.
///
/// Prioritizes processes with the least remaining work. Since execution
/// is non-preemptive, remaining work equals the full burst.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestJob;

impl SelectionRule for ShortestJob {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn effective_key(&self, process: &Process, _context: &SelectionContext) -> EffectiveKey {
        process.remaining_ms
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}

/// Shortest Job First with aging.
///
/// `key = max(remaining - floor(wait / aging_wait_per_unit_ms), 1)`.
/// Long waits lower the key until a long job eventually wins; the floor
/// keeps keys strictly positive however long a process waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgedShortestJob;

impl SelectionRule for AgedShortestJob {
    fn name(&self) -> &'static str {
        "SJF+AGING"
    }

    fn effective_key(&self, process: &Process, context: &SelectionContext) -> EffectiveKey {
        let boost = process.wait_ms / context.aging_wait_per_unit_ms.max(1);
        process
            .remaining_ms
            .saturating_sub(boost)
            .max(MIN_EFFECTIVE_KEY)
    }

    fn description(&self) -> &'static str {
        "Shortest Job First with aging"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sjf_uses_remaining() {
        let ctx = SelectionContext::plain();
        let p = Process::new(0, 250).with_wait(10_000);
        assert_eq!(ShortestJob.effective_key(&p, &ctx), 250);
    }

    #[test]
    fn test_aged_key_formula() {
        let ctx = SelectionContext::aged();
        let a = Process::new(0, 100);
        let b = Process::new(1, 90).with_wait(600);
        assert_eq!(AgedShortestJob.effective_key(&a, &ctx), 100);
        // 90 - floor(600 / 50) = 78
        assert_eq!(AgedShortestJob.effective_key(&b, &ctx), 78);
    }

    #[test]
    fn test_aged_key_floors_partial_units() {
        let ctx = SelectionContext::aged();
        let p = Process::new(0, 100).with_wait(99);
        assert_eq!(AgedShortestJob.effective_key(&p, &ctx), 99);
    }

    #[test]
    fn test_aged_key_never_below_one() {
        let ctx = SelectionContext::aged();
        for wait in [4_950, 5_000, 1_000_000, u64::MAX] {
            let p = Process::new(0, 100).with_wait(wait);
            assert_eq!(AgedShortestJob.effective_key(&p, &ctx), MIN_EFFECTIVE_KEY);
        }
    }

    #[test]
    fn test_aged_key_respects_custom_rate() {
        let ctx = SelectionContext {
            aging_enabled: true,
            aging_wait_per_unit_ms: 10,
        };
        let p = Process::new(0, 100).with_wait(200);
        assert_eq!(AgedShortestJob.effective_key(&p, &ctx), 80);
    }
}
