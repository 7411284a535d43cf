//! Burst-length sources.
//!
//! [`UniformBursts`] is the production source: uniformly distributed
//! integers over an inclusive range. [`ScriptedBursts`] replays a fixed
//! list, which makes a recorded workload repeatable.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::BurstRange;

/// Produces burst lengths for newly arriving processes.
pub trait BurstSource {
    /// Next burst length (ms) for the given bounds.
    fn next_burst(&mut self, range: &BurstRange) -> u64;
}

/// Uniform random bursts over `[min_ms, max_ms]`.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use sjf_sim::arrival::{BurstSource, UniformBursts};
/// use sjf_sim::config::BurstRange;
///
/// let mut bursts = UniformBursts::new(SmallRng::seed_from_u64(1));
/// let range = BurstRange::new(100, 200);
/// assert!(range.contains(bursts.next_burst(&range)));
/// ```
#[derive(Debug, Clone)]
pub struct UniformBursts<R = SmallRng> {
    rng: R,
}

impl<R: Rng> UniformBursts<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl UniformBursts<SmallRng> {
    /// Source seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(SmallRng::from_os_rng())
    }
}

impl Default for UniformBursts<SmallRng> {
    fn default() -> Self {
        Self::from_os_rng()
    }
}

impl<R: Rng> BurstSource for UniformBursts<R> {
    fn next_burst(&mut self, range: &BurstRange) -> u64 {
        if range.min_ms >= range.max_ms {
            return range.min_ms;
        }
        self.rng.random_range(range.min_ms..=range.max_ms)
    }
}

/// Replays a fixed list of bursts, cycling when it runs out.
///
/// Bursts are used as recorded; the configured range is ignored.
#[derive(Debug, Clone)]
pub struct ScriptedBursts {
    script: VecDeque<u64>,
}

impl ScriptedBursts {
    /// Creates a source from a list of bursts. Zero entries are dropped.
    pub fn new(bursts: impl IntoIterator<Item = u64>) -> Self {
        Self {
            script: bursts.into_iter().filter(|&b| b > 0).collect(),
        }
    }

    /// Number of distinct entries before the script repeats.
    pub fn len(&self) -> usize {
        self.script.len()
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }
}

impl BurstSource for ScriptedBursts {
    fn next_burst(&mut self, range: &BurstRange) -> u64 {
        match self.script.pop_front() {
            Some(burst) => {
                self.script.push_back(burst);
                burst
            }
            None => range.min_ms,
        }
    }
}

impl<S: BurstSource + ?Sized> BurstSource for Box<S> {
    fn next_burst(&mut self, range: &BurstRange) -> u64 {
        (**self).next_burst(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_within_bounds() {
        let mut bursts = UniformBursts::new(SmallRng::seed_from_u64(42));
        let range = BurstRange::new(5, 9);
        let mut seen = [false; 5];
        for _ in 0..500 {
            let b = bursts.next_burst(&range);
            assert!(range.contains(b));
            seen[(b - 5) as usize] = true;
        }
        // Both endpoints are reachable.
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_uniform_degenerate_range() {
        let mut bursts = UniformBursts::new(SmallRng::seed_from_u64(0));
        assert_eq!(bursts.next_burst(&BurstRange::new(7, 7)), 7);
    }

    #[test]
    fn test_scripted_cycles() {
        let mut bursts = ScriptedBursts::new([30, 0, 10]);
        let range = BurstRange::new(1, 100);
        assert_eq!(bursts.len(), 2);
        let drawn: Vec<_> = (0..5).map(|_| bursts.next_burst(&range)).collect();
        assert_eq!(drawn, vec![30, 10, 30, 10, 30]);
    }

    #[test]
    fn test_scripted_empty_falls_back_to_min() {
        let mut bursts = ScriptedBursts::new(Vec::new());
        assert!(bursts.is_empty());
        assert_eq!(bursts.next_burst(&BurstRange::new(12, 40)), 12);
    }

    #[test]
    fn test_boxed_source() {
        let mut bursts: Box<dyn BurstSource> = Box::new(ScriptedBursts::new([8]));
        assert_eq!(bursts.next_burst(&BurstRange::new(1, 2)), 8);
    }
}
