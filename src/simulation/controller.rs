//! Simulation controller.
//!
//! # Algorithm
//!
//! 1. `start` validates, resets state, arms the arrival and aging timers.
//! 2. The event loop pops one due timer firing at a time:
//!    - **Arrival**: create a process, queue it, dispatch if the CPU is idle.
//!    - **Aging**: credit wait to every queued process (if aging is on).
//!    - **Progress**: report progress; retire the process once its burst
//!      has elapsed and dispatch the next one.
//! 3. The run finishes when the queue is empty and arrivals are exhausted.
//!
//! Firings never interleave, so ready-queue mutations (aging) and
//! running-process mutations (progress) cannot race.

use crate::aging::AgingTracker;
use crate::arrival::{ArrivalScheduler, ArrivalTick, BurstSource, UniformBursts};
use crate::config::SimulationConfig;
use crate::dispatching::{EffectiveKey, SelectionContext, Selector};
use crate::error::SimulationError;
use crate::execution::ExecutionDriver;
use crate::models::{Process, ProcessId};
use crate::validation::join_messages;

use super::events::SimulationEvent;
use super::report::SimulationReport;
use super::state::SimulationState;
use super::timer::{TimerEvent, TimerKind, TimerQueue};

/// Where a run is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationPhase {
    /// `start` has not been accepted yet.
    #[default]
    NotStarted,
    /// Timers are armed and events are being processed.
    Running,
    /// Queue empty and arrivals exhausted; every timer is stopped.
    Finished,
    /// Stopped explicitly; every timer is stopped.
    Stopped,
}

/// Owns the state of a run and drives it.
///
/// # Example
///
/// ```
/// use sjf_sim::arrival::ScriptedBursts;
/// use sjf_sim::config::SimulationConfig;
/// use sjf_sim::simulation::{SimulationController, SimulationPhase};
///
/// let mut sim = SimulationController::new(ScriptedBursts::new([2000, 900, 300]));
/// sim.start(SimulationConfig::new(3, 100, 3000)).unwrap();
///
/// let report = sim.run_to_completion().unwrap();
/// assert_eq!(sim.phase(), SimulationPhase::Finished);
/// assert_eq!(report.completion_order, vec!["P00", "P02", "P01"]);
/// ```
#[derive(Debug)]
pub struct SimulationController<B = UniformBursts> {
    config: SimulationConfig,
    aging_enabled: bool,
    phase: SimulationPhase,
    state: SimulationState,
    timers: TimerQueue,
    arrivals: ArrivalScheduler,
    aging: AgingTracker,
    execution: ExecutionDriver,
    selector: Selector,
    bursts: B,
    events: Vec<SimulationEvent>,
}

impl SimulationController<UniformBursts> {
    /// Controller with uniformly random bursts seeded from the OS.
    pub fn with_random_bursts() -> Self {
        Self::new(UniformBursts::from_os_rng())
    }
}

impl Default for SimulationController<UniformBursts> {
    fn default() -> Self {
        Self::with_random_bursts()
    }
}

impl<B: BurstSource> SimulationController<B> {
    /// Creates an idle controller drawing bursts from `bursts`.
    pub fn new(bursts: B) -> Self {
        let config = SimulationConfig::default();
        Self {
            aging_enabled: config.aging_enabled,
            phase: SimulationPhase::NotStarted,
            state: SimulationState::new(),
            timers: TimerQueue::new(),
            arrivals: ArrivalScheduler::new(0, config.burst_range()),
            aging: AgingTracker::new(config.timing.aging_tick_ms),
            execution: ExecutionDriver::new(),
            selector: Selector::new(),
            bursts,
            events: Vec::new(),
            config,
        }
    }

    /// Replaces the selector.
    pub fn with_selector(mut self, selector: Selector) -> Self {
        self.selector = selector;
        self
    }

    // ======================== Lifecycle ========================

    /// Starts a new run.
    ///
    /// The configuration is validated before anything is touched; on
    /// failure a `ValidationFailed` event is emitted and the previous run
    /// (if any) carries on untouched. On success every timer of the
    /// previous run is cancelled, all collections are emptied and the
    /// clock restarts at 0.
    pub fn start(&mut self, config: SimulationConfig) -> Result<(), SimulationError> {
        if let Err(errors) = config.validate() {
            let message = join_messages(&errors);
            log::warn!("rejected configuration: {message}");
            self.events.push(SimulationEvent::ValidationFailed { message });
            return Err(SimulationError::Validation(errors));
        }

        self.timers.reset();
        self.state.reset();
        self.execution.reset();
        self.arrivals = ArrivalScheduler::new(config.total_processes, config.burst_range());
        self.aging = AgingTracker::new(config.timing.aging_tick_ms);
        self.aging_enabled = config.aging_enabled;
        self.phase = SimulationPhase::Running;

        self.emit_ready_queue();
        self.emit_completed_list();
        self.events.push(SimulationEvent::idle());

        self.timers.start(TimerKind::Aging, config.timing.aging_tick_ms);
        self.timers
            .start(TimerKind::Arrival, config.timing.arrival_interval_ms);

        log::info!(
            "simulation started: {} processes, bursts {}..={}ms, aging {}",
            config.total_processes,
            config.min_burst_ms,
            config.max_burst_ms,
            if config.aging_enabled { "on" } else { "off" }
        );
        self.config = config;
        Ok(())
    }

    /// Stops the run, cancelling every timer.
    ///
    /// A process on the CPU stays in the running slot, frozen. Returns
    /// `false` if the run had already finished or stopped.
    pub fn stop(&mut self) -> bool {
        match self.phase {
            SimulationPhase::Finished | SimulationPhase::Stopped => false,
            SimulationPhase::NotStarted | SimulationPhase::Running => {
                self.timers.cancel_all();
                self.phase = SimulationPhase::Stopped;
                let at_ms = self.timers.now_ms();
                self.events.push(SimulationEvent::SimulationStopped { at_ms });
                log::info!("simulation stopped at t={at_ms}ms");
                true
            }
        }
    }

    /// Toggles aging. Takes effect on the next aging tick and selection.
    pub fn set_aging_enabled(&mut self, enabled: bool) {
        if self.aging_enabled != enabled {
            log::debug!("aging {}", if enabled { "enabled" } else { "disabled" });
        }
        self.aging_enabled = enabled;
    }

    // ======================== Event loop ========================

    /// Processes the next timer firing.
    ///
    /// Returns `None` once nothing is armed (or the run is not active).
    pub fn step(&mut self) -> Result<Option<TimerEvent>, SimulationError> {
        if self.phase != SimulationPhase::Running {
            return Ok(None);
        }
        let Some(event) = self.timers.pop_due(None) else {
            return Ok(None);
        };
        self.handle(event)?;
        Ok(Some(event))
    }

    /// Processes every firing due at or before `until_ms`, then moves the
    /// clock to `until_ms`. Returns the number of firings processed.
    pub fn run_until(&mut self, until_ms: u64) -> Result<usize, SimulationError> {
        let mut processed = 0;
        while self.phase == SimulationPhase::Running {
            let Some(event) = self.timers.pop_due(Some(until_ms)) else {
                break;
            };
            self.handle(event)?;
            processed += 1;
        }
        if self.phase == SimulationPhase::Running {
            self.timers.advance_to(until_ms);
        }
        Ok(processed)
    }

    /// Runs until no timer is armed and returns the report.
    pub fn run_to_completion(&mut self) -> Result<SimulationReport, SimulationError> {
        while self.step()?.is_some() {}
        Ok(self.report())
    }

    fn handle(&mut self, event: TimerEvent) -> Result<(), SimulationError> {
        match event.kind {
            TimerKind::Arrival => self.on_arrival_tick(event.at_ms),
            TimerKind::Aging => {
                self.on_aging_tick();
                Ok(())
            }
            TimerKind::Progress => self.on_progress_tick(event.at_ms),
        }
    }

    fn on_arrival_tick(&mut self, now_ms: u64) -> Result<(), SimulationError> {
        match self.arrivals.tick(&mut self.bursts, now_ms) {
            ArrivalTick::Exhausted => {
                self.timers.cancel(TimerKind::Arrival);
                Ok(())
            }
            ArrivalTick::Arrived { process, last } => {
                self.state.admit(process)?;
                if last {
                    self.timers.cancel(TimerKind::Arrival);
                }
                self.emit_ready_queue();
                if self.state.is_cpu_idle() {
                    self.schedule_next()?;
                }
                Ok(())
            }
        }
    }

    fn on_aging_tick(&mut self) {
        if self.state.is_queue_empty() {
            return;
        }
        let aged = self.aging.tick(self.state.ready_mut(), self.aging_enabled);
        if aged > 0 {
            self.emit_ready_queue();
        }
    }

    fn on_progress_tick(&mut self, now_ms: u64) -> Result<(), SimulationError> {
        let tick = self.execution.tick(now_ms)?;
        let name = match self.state.running() {
            Some(process) if process.id == tick.pid => process.name.clone(),
            _ => {
                return Err(SimulationError::invariant(format!(
                    "progress tick for P{:02} which is not in the running slot",
                    tick.pid
                )))
            }
        };

        log::trace!("{name} {}% at t={now_ms}ms", tick.percent);
        self.events
            .push(SimulationEvent::progress(name, tick.percent));

        if tick.finished {
            self.complete_running(now_ms)?;
        }
        Ok(())
    }

    fn complete_running(&mut self, now_ms: u64) -> Result<(), SimulationError> {
        self.timers.cancel(TimerKind::Progress);
        let pid = self.execution.finish()?;
        let process = self.state.complete(pid, now_ms)?;
        log::debug!(
            "complete {} at t={}ms (turnaround {}ms)",
            process.name,
            now_ms,
            process.turnaround_ms().unwrap_or(0)
        );

        self.emit_completed_list();
        self.events.push(SimulationEvent::idle());
        self.schedule_next()?;
        Ok(())
    }

    // ======================== Dispatch ========================

    /// Dispatches the next process if the CPU is free.
    ///
    /// - CPU busy: no-op.
    /// - Queue empty and arrivals exhausted: finishes the run.
    /// - Otherwise: dispatches the selector's pick.
    ///
    /// Returns the dispatched process id.
    pub fn schedule_next(&mut self) -> Result<Option<ProcessId>, SimulationError> {
        if self.phase != SimulationPhase::Running || !self.execution.is_idle() {
            return Ok(None);
        }

        if self.state.is_queue_empty() {
            if self.arrivals.is_exhausted() {
                self.finish();
            }
            return Ok(None);
        }

        let pid = {
            let ready = self.state.ready();
            let context = self.selection_context();
            match self.selector.select_best(&ready, &context) {
                Some(index) => ready[index].id,
                None => return Ok(None),
            }
        };

        self.dispatch(pid)?;
        Ok(Some(pid))
    }

    fn dispatch(&mut self, pid: ProcessId) -> Result<(), SimulationError> {
        let now_ms = self.timers.now_ms();
        let process = self.state.dispatch(pid, now_ms)?;
        self.execution.begin(process, now_ms)?;
        let name = process.name.clone();

        self.timers
            .start(TimerKind::Progress, self.config.timing.progress_tick_ms);
        self.emit_ready_queue();
        self.events.push(SimulationEvent::progress(name, 0));
        Ok(())
    }

    fn finish(&mut self) {
        self.timers.cancel_all();
        self.phase = SimulationPhase::Finished;
        let at_ms = self.timers.now_ms();
        let completed = self.state.completed_ids().len();
        self.events
            .push(SimulationEvent::SimulationFinished { at_ms, completed });
        log::info!("simulation finished at t={at_ms}ms: {completed} processes completed");
    }

    fn selection_context(&self) -> SelectionContext {
        SelectionContext::from_timing(&self.config.timing, self.aging_enabled)
    }

    // ======================== Events ========================

    fn emit_ready_queue(&mut self) {
        let queue = self.state.ready_snapshot();
        self.events
            .push(SimulationEvent::ReadyQueueChanged { queue });
    }

    fn emit_completed_list(&mut self) {
        let completed = self.state.completed_snapshot();
        self.events
            .push(SimulationEvent::CompletedListChanged { completed });
    }

    /// Takes every buffered event, oldest first.
    pub fn drain_events(&mut self) -> Vec<SimulationEvent> {
        std::mem::take(&mut self.events)
    }

    /// Buffered events not yet drained.
    pub fn pending_events(&self) -> &[SimulationEvent] {
        &self.events
    }

    // ======================== Queries ========================

    pub fn phase(&self) -> SimulationPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SimulationPhase::Running
    }

    pub fn aging_enabled(&self) -> bool {
        self.aging_enabled
    }

    /// Configuration of the current run.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Current virtual time (ms).
    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// Due time of the next firing, if the run is active.
    pub fn next_due_ms(&mut self) -> Option<u64> {
        if self.phase != SimulationPhase::Running {
            return None;
        }
        self.timers.next_due_ms()
    }

    /// Armed timers.
    pub fn active_timers(&self) -> Vec<TimerKind> {
        self.timers.active()
    }

    pub fn running(&self) -> Option<&Process> {
        self.state.running()
    }

    /// Processes still to arrive.
    pub fn pending_arrivals(&self) -> usize {
        self.arrivals.pending()
    }

    /// Names of queued processes in dispatch order under the current
    /// aging flag.
    pub fn upcoming(&self) -> Vec<String> {
        let ready = self.state.ready();
        let context = self.selection_context();
        self.selector
            .sort_indices(&ready, &context)
            .into_iter()
            .map(|i| ready[i].name.clone())
            .collect()
    }

    /// Effective key of a queued process under the current aging flag.
    pub fn effective_key(&self, pid: ProcessId) -> Option<EffectiveKey> {
        let context = self.selection_context();
        self.state
            .process(pid)
            .map(|p| self.selector.effective_key(p, &context))
    }

    /// Metrics for the run so far.
    pub fn report(&self) -> SimulationReport {
        SimulationReport::from_state(&self.state)
    }

    /// Verifies state, CPU slot and progress timer agree.
    pub fn check_invariants(&self) -> Result<(), SimulationError> {
        self.state.check_invariants()?;

        let slot = self.state.running().map(|p| p.id);
        if slot != self.execution.running() {
            return Err(SimulationError::invariant(format!(
                "running slot {slot:?} disagrees with CPU {:?}",
                self.execution.running()
            )));
        }

        if self.phase == SimulationPhase::Running
            && self.timers.is_active(TimerKind::Progress) != slot.is_some()
        {
            return Err(SimulationError::invariant(
                "progress timer armed without a running process (or vice versa)",
            ));
        }
        Ok(())
    }
}
