//! Simulation domain models.
//!
//! # Lifecycle
//!
//! | Status | Collection | Entered by |
//! |--------|------------|------------|
//! | Ready | ready queue | arrival |
//! | Running | running slot | dispatch |
//! | Completed | completed list | burst elapsed |
//!
//! A process is never re-queued once dispatched.

mod color;
mod process;

pub use color::ColorTag;
pub use process::{Process, ProcessId, ProcessStatus};
