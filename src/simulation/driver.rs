//! Wall-clock pacing for a controller.
//!
//! The controller runs on virtual time and never sleeps. [`RealtimeDriver`]
//! replays it at wall-clock pace (optionally sped up) for presentation
//! layers that want to animate a run, handing every event to a callback
//! that may also steer the run (toggle aging, stop, restart).

use std::thread;
use std::time::{Duration, Instant};

use crate::arrival::BurstSource;
use crate::error::SimulationError;

use super::controller::SimulationController;
use super::events::SimulationEvent;
use super::report::SimulationReport;

/// Sleeps between firings so virtual time tracks the wall clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealtimeDriver {
    speed: f64,
}

impl Default for RealtimeDriver {
    fn default() -> Self {
        Self { speed: 1.0 }
    }
}

impl RealtimeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual milliseconds per wall-clock millisecond.
    ///
    /// Non-positive or non-finite values fall back to 1.0.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = if speed.is_finite() && speed > 0.0 {
            speed
        } else {
            1.0
        };
        self
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Drives `controller` until no timer is armed.
    ///
    /// Events already buffered are delivered first. A callback that
    /// restarts the run rebases the pacing on the new clock.
    pub fn run<B, F>(
        &self,
        controller: &mut SimulationController<B>,
        mut on_event: F,
    ) -> Result<SimulationReport, SimulationError>
    where
        B: BurstSource,
        F: FnMut(&mut SimulationController<B>, SimulationEvent),
    {
        let mut epoch = Instant::now();
        let mut base_ms = controller.now_ms();
        Self::deliver(controller, &mut on_event);

        while let Some(due_ms) = controller.next_due_ms() {
            if controller.now_ms() < base_ms {
                epoch = Instant::now();
                base_ms = controller.now_ms();
            }

            let target = self.wall_offset(due_ms.saturating_sub(base_ms));
            let elapsed = epoch.elapsed();
            if target > elapsed {
                thread::sleep(target - elapsed);
            }

            controller.step()?;
            Self::deliver(controller, &mut on_event);
        }

        log::debug!("realtime driver done at t={}ms", controller.now_ms());
        Ok(controller.report())
    }

    fn wall_offset(&self, virtual_ms: u64) -> Duration {
        Duration::from_secs_f64(virtual_ms as f64 / 1000.0 / self.speed)
    }

    fn deliver<B, F>(controller: &mut SimulationController<B>, on_event: &mut F)
    where
        B: BurstSource,
        F: FnMut(&mut SimulationController<B>, SimulationEvent),
    {
        for event in controller.drain_events() {
            on_event(controller, event);
        }
    }
}
