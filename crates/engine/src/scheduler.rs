//! Frame scheduler: one render per tick, at most one simulation step.
//!
//! The host calls [`FrameScheduler::tick`] once per display frame. Every tick
//! renders the current lattice first; then, if the scheduler is running and
//! at least `min_step_interval_ms` passed since the previous step, the engine
//! advances exactly once. Missed steps are never caught up.

use tracing::{debug, info};

use crate::core::{LatticeView, SimulationEngine};

/// Whether ticks may advance the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Milliseconds since the previous step, `None` before the first one.
    pub elapsed_ms: Option<u64>,
    /// The engine advanced during this tick.
    pub advanced: bool,
}

#[derive(Debug, Clone)]
pub struct FrameScheduler {
    min_step_interval_ms: u64,
    state: RunState,
    last_advance_ms: Option<u64>,
    ticks: u64,
}

impl FrameScheduler {
    /// A stopped scheduler with the given minimum step interval.
    pub fn new(min_step_interval_ms: u64) -> Self {
        Self {
            min_step_interval_ms,
            state: RunState::Stopped,
            last_advance_ms: None,
            ticks: 0,
        }
    }

    pub fn min_step_interval_ms(&self) -> u64 {
        self.min_step_interval_ms
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Ticks processed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn start(&mut self) {
        if self.state != RunState::Running {
            info!("scheduler running");
        }
        self.state = RunState::Running;
    }

    /// Takes effect on the next tick; an in-progress render is never cut short.
    pub fn stop(&mut self) {
        if self.state != RunState::Stopped {
            info!("scheduler stopped");
        }
        self.state = RunState::Stopped;
    }

    pub fn toggle(&mut self) -> RunState {
        match self.state {
            RunState::Running => self.stop(),
            RunState::Stopped => self.start(),
        }
        self.state
    }

    /// Milliseconds since the last step as of `now_ms`.
    pub fn elapsed_since_advance(&self, now_ms: u64) -> Option<u64> {
        self.last_advance_ms.map(|t| now_ms.saturating_sub(t))
    }

    /// Forget the step baseline, e.g. after swapping in a new engine.
    pub fn reset_baseline(&mut self) {
        self.last_advance_ms = None;
    }

    /// Run one frame: render, then maybe advance.
    ///
    /// `render` receives a view borrowed for the duration of the call only.
    /// A render error aborts the tick before any step is taken.
    pub fn tick<E, R, X>(&mut self, now_ms: u64, engine: &mut E, render: R) -> Result<TickOutcome, X>
    where
        E: SimulationEngine + ?Sized,
        R: FnOnce(LatticeView<'_>) -> Result<(), X>,
    {
        self.ticks += 1;
        let elapsed_ms = self.elapsed_since_advance(now_ms);

        render(engine.lattice_view())?;

        let due = elapsed_ms.map_or(true, |e| e >= self.min_step_interval_ms);
        let advanced = self.is_running() && due;
        if advanced {
            engine.advance();
            self.last_advance_ms = Some(now_ms);
            debug!(tick = self.ticks, step = engine.step_count(), "tick advanced");
        }

        Ok(TickOutcome {
            elapsed_ms,
            advanced,
        })
    }

    /// Advance exactly once while stopped. Ignored while running.
    pub fn step_once<E>(&mut self, now_ms: u64, engine: &mut E) -> bool
    where
        E: SimulationEngine + ?Sized,
    {
        if self.is_running() {
            return false;
        }
        engine.advance();
        self.last_advance_ms = Some(now_ms);
        true
    }
}
