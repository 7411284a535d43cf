//! Process arrivals.
//!
//! - [`BurstSource`]: where burst lengths come from
//! - [`ArrivalScheduler`]: turns arrival ticks into new processes

mod burst;
mod scheduler;

pub use burst::{BurstSource, ScriptedBursts, UniformBursts};
pub use scheduler::{ArrivalScheduler, ArrivalTick};
