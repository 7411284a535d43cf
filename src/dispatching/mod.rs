//! Selection rules and the SJF selector.
//!
//! Provides the effective-key rules (plain SJF and aged SJF) and the
//! [`Selector`] that ranks the ready queue with them.
//!
//! # Usage
//!
//! ```
//! use sjf_sim::dispatching::{SelectionContext, Selector};
//! use sjf_sim::models::Process;
//!
//! let queue = vec![Process::new(0, 10), Process::new(1, 3), Process::new(2, 7)];
//! let refs: Vec<&Process> = queue.iter().collect();
//!
//! let selector = Selector::new();
//! let best = selector.select_best(&refs, &SelectionContext::plain());
//! assert_eq!(best, Some(1));
//! ```

mod context;
pub mod rules;
mod selector;

pub use context::SelectionContext;
pub use selector::Selector;

use crate::models::Process;
use std::fmt::Debug;

/// Key returned by a selection rule.
///
/// Lower keys = dispatched first.
pub type EffectiveKey = u64;

/// A rule that maps a ready process to its effective key.
///
/// # Key Convention
/// **Lower key = higher priority.** The selector dispatches the process
/// with the smallest key; equal keys keep queue order.
pub trait SelectionRule: Send + Sync + Debug {
    /// Rule name (e.g., "SJF").
    fn name(&self) -> &'static str;

    /// Effective key of a process under the given context.
    fn effective_key(&self, process: &Process, context: &SelectionContext) -> EffectiveKey;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
