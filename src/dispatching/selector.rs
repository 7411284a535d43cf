//! Selector: ranks the ready queue and picks the next process.
//!
//! Holds one rule for plain dispatch and one for aged dispatch and
//! switches between them per decision on `context.aging_enabled`.

use std::sync::Arc;

use super::rules::{AgedShortestJob, ShortestJob};
use super::{EffectiveKey, SelectionContext, SelectionRule};
use crate::models::Process;

/// Picks the ready process with the smallest effective key.
///
/// Ordering is a stable ascending sort on the key, so processes with
/// equal keys keep their relative queue order. Selection never mutates
/// the queue.
///
/// # Example
/// ```
/// use sjf_sim::dispatching::{SelectionContext, Selector};
/// use sjf_sim::models::Process;
///
/// let a = Process::new(0, 100);
/// let b = Process::new(1, 90).with_wait(600);
/// let selector = Selector::new();
/// assert_eq!(selector.select_best(&[&a, &b], &SelectionContext::aged()), Some(1));
/// ```
#[derive(Clone)]
pub struct Selector {
    plain: Arc<dyn SelectionRule>,
    aged: Arc<dyn SelectionRule>,
}

impl Selector {
    /// Creates the SJF / aged-SJF selector.
    pub fn new() -> Self {
        Self {
            plain: Arc::new(ShortestJob),
            aged: Arc::new(AgedShortestJob),
        }
    }

    /// Replaces the rule used while aging is off.
    pub fn with_plain_rule<R: SelectionRule + 'static>(mut self, rule: R) -> Self {
        self.plain = Arc::new(rule);
        self
    }

    /// Replaces the rule used while aging is on.
    pub fn with_aged_rule<R: SelectionRule + 'static>(mut self, rule: R) -> Self {
        self.aged = Arc::new(rule);
        self
    }

    /// Rule in effect for the given context.
    pub fn rule(&self, context: &SelectionContext) -> &dyn SelectionRule {
        if context.aging_enabled {
            self.aged.as_ref()
        } else {
            self.plain.as_ref()
        }
    }

    /// Effective key of a single process.
    pub fn effective_key(&self, process: &Process, context: &SelectionContext) -> EffectiveKey {
        self.rule(context).effective_key(process, context)
    }

    /// Sorts candidates by effective key (dispatch order).
    ///
    /// Returns indices into `candidates`. Equal keys keep input order.
    pub fn sort_indices(&self, candidates: &[&Process], context: &SelectionContext) -> Vec<usize> {
        if candidates.is_empty() {
            return Vec::new();
        }

        let rule = self.rule(context);
        let keys: Vec<EffectiveKey> = candidates
            .iter()
            .map(|p| rule.effective_key(p, context))
            .collect();

        let mut indices: Vec<usize> = (0..candidates.len()).collect();
        // `sort_by_key` is stable.
        indices.sort_by_key(|&i| keys[i]);
        indices
    }

    /// Index of the process to dispatch next, or `None` for an empty queue.
    pub fn select_best(&self, candidates: &[&Process], context: &SelectionContext) -> Option<usize> {
        self.sort_indices(candidates, context).first().copied()
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selector")
            .field("plain", &self.plain.name())
            .field("aged", &self.aged.name())
            .finish()
    }
}
