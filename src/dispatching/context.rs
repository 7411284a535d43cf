//! Selection context for rule evaluation.

use crate::config::{TimingConfig, DEFAULT_AGING_WAIT_PER_UNIT_MS};

/// Runtime parameters the selector reads on every decision.
///
/// The aging flag lives here rather than being queried from anywhere
/// else, so toggling it affects the very next selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionContext {
    /// Whether the aged key is used.
    pub aging_enabled: bool,
    /// Waited time that buys one unit of key reduction (ms).
    pub aging_wait_per_unit_ms: u64,
}

impl SelectionContext {
    /// Context with aging disabled.
    pub fn plain() -> Self {
        Self {
            aging_enabled: false,
            aging_wait_per_unit_ms: DEFAULT_AGING_WAIT_PER_UNIT_MS,
        }
    }

    /// Context with aging enabled at the default rate.
    pub fn aged() -> Self {
        Self {
            aging_enabled: true,
            ..Self::plain()
        }
    }

    /// Context derived from run timing and the live aging flag.
    pub fn from_timing(timing: &TimingConfig, aging_enabled: bool) -> Self {
        Self {
            aging_enabled,
            aging_wait_per_unit_ms: timing.aging_wait_per_unit_ms,
        }
    }
}

impl Default for SelectionContext {
    fn default() -> Self {
        Self::plain()
    }
}
