//! One running simulation plus the host state around it.
//!
//! Both binaries drive a `Session`: the interactive host with a wall clock and
//! keyboard actions, the headless runner with a manual clock.

use serde::Serialize;
use tracing::info;

use crate::config::{AppConfig, ConfigError};
use crate::core::{LatticeError, MetropolisEngine, SimParams, SimulationEngine};
use crate::engine::{FrameScheduler, TickOutcome};
use crate::term::{fingerprint, Raster, SpinRenderer, StatusView, SurfaceTooLarge};
use crate::types::ControlAction;

/// Whether the host loop should keep going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Per-tick statistics emitted by the headless runner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickRecord {
    pub tick: u64,
    pub step: u64,
    pub magnetization: f64,
    pub energy_per_spin: f64,
    pub advanced: bool,
}

pub struct Session {
    params: SimParams,
    flips_per_step: u32,
    engine: MetropolisEngine,
    scheduler: FrameScheduler,
    spin_renderer: SpinRenderer,
    raster: Raster,
    /// Status matching the lattice currently in `raster`.
    status: StatusView,
    frame_fingerprint: u64,
}

impl Session {
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        let params = config.sim_params()?;
        let spin_renderer = SpinRenderer::new(config.render_target()?);
        // Reject an oversized raster before allocating the lattice.
        spin_renderer.surface_size(params.dimensions())?;
        let engine =
            MetropolisEngine::new(params, config.seed)?.with_flips_per_step(config.flips_per_step);

        let status = StatusView {
            running: false,
            step: engine.step_count(),
            magnetization: engine.magnetization(),
            energy_per_spin: engine.energy_per_spin(),
            coupling: params.coupling(),
            field: params.field(),
            dims: params.dimensions(),
            seed: engine.seed(),
        };
        let raster = spin_renderer.render(&engine.lattice_view())?;

        Ok(Self {
            params,
            flips_per_step: config.flips_per_step,
            engine,
            scheduler: FrameScheduler::new(config.step_ms),
            spin_renderer,
            raster,
            status,
            frame_fingerprint: 0,
        })
    }

    pub fn engine(&self) -> &MetropolisEngine {
        &self.engine
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Raster painted by the most recent tick.
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Status for the lattice in [`Session::raster`].
    pub fn status(&self) -> StatusView {
        self.status
    }

    /// Changes whenever the rendered lattice or status would.
    pub fn frame_fingerprint(&self) -> u64 {
        self.frame_fingerprint
    }

    /// Run one frame: render the current lattice into the raster, then let
    /// the scheduler decide whether to advance.
    ///
    /// A session built by [`Session::new`] has a surface that fits, so the
    /// error only surfaces if that check is bypassed.
    pub fn tick(&mut self, now_ms: u64) -> Result<TickOutcome, SurfaceTooLarge> {
        let running = self.scheduler.is_running();
        let step = self.engine.step_count();
        let seed = self.engine.seed();
        let params = self.params;
        let renderer = &self.spin_renderer;
        let raster = &mut self.raster;
        let status = &mut self.status;
        let frame_fingerprint = &mut self.frame_fingerprint;

        self.scheduler.tick(now_ms, &mut self.engine, |view| -> Result<(), SurfaceTooLarge> {
            renderer.render_into(&view, raster)?;
            *status = StatusView {
                running,
                step,
                magnetization: view.magnetization(),
                energy_per_spin: view.energy_per_spin(params.coupling(), params.field()),
                coupling: params.coupling(),
                field: params.field(),
                dims: view.dimensions(),
                seed,
            };
            *frame_fingerprint = fingerprint(view.as_bytes(), (step << 1) | running as u64);
            Ok(())
        })
    }

    pub fn apply(&mut self, action: ControlAction, now_ms: u64) -> Result<Flow, LatticeError> {
        match action {
            ControlAction::ToggleRun => {
                self.scheduler.toggle();
            }
            ControlAction::StepOnce => {
                self.scheduler.step_once(now_ms, &mut self.engine);
            }
            ControlAction::Reseed => self.reseed()?,
            ControlAction::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Replace the engine with a fresh random lattice.
    ///
    /// The next seed comes from the current engine's generator. Run state is
    /// kept; the step baseline is cleared so a running session advances on
    /// the next tick.
    pub fn reseed(&mut self) -> Result<(), LatticeError> {
        let seed = self.engine.next_seed();
        self.engine =
            MetropolisEngine::new(self.params, seed)?.with_flips_per_step(self.flips_per_step);
        self.scheduler.reset_baseline();
        info!(seed, "session reseeded");
        Ok(())
    }

    /// Statistics after tick number `tick` produced `outcome`.
    pub fn record(&self, tick: u64, outcome: TickOutcome) -> TickRecord {
        TickRecord {
            tick,
            step: self.engine.step_count(),
            magnetization: self.engine.magnetization(),
            energy_per_spin: self.engine.energy_per_spin(),
            advanced: outcome.advanced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> AppConfig {
        AppConfig {
            width: 8,
            height: 4,
            step_ms: 50,
            flips_per_step: 16,
            ..AppConfig::default()
        }
    }

    #[test]
    fn starts_stopped_with_rendered_lattice() {
        let s = Session::new(&small()).unwrap();
        assert!(!s.is_running());
        assert_eq!((s.raster().width(), s.raster().height()), (17, 9));
        assert_eq!(s.status().step, 0);
    }

    #[test]
    fn stopped_ticks_render_without_advancing() {
        let mut s = Session::new(&small()).unwrap();
        for t in 0..5 {
            assert!(!s.tick(t * 100).unwrap().advanced);
        }
        assert_eq!(s.engine().step_count(), 0);
    }

    #[test]
    fn status_describes_the_rendered_lattice() {
        let mut s = Session::new(&small()).unwrap();
        s.apply(ControlAction::ToggleRun, 0).unwrap();

        let first = s.tick(0).unwrap();
        assert!(first.advanced);
        // Rendered before the advance.
        assert_eq!(s.status().step, 0);
        assert!(s.status().running);
        assert_eq!(s.engine().step_count(), 1);

        s.tick(50).unwrap();
        assert_eq!(s.status().step, 1);
    }

    #[test]
    fn fingerprint_changes_with_run_state() {
        let mut s = Session::new(&small()).unwrap();
        s.tick(0).unwrap();
        let stopped = s.frame_fingerprint();
        s.tick(10).unwrap();
        assert_eq!(s.frame_fingerprint(), stopped);

        s.apply(ControlAction::ToggleRun, 20).unwrap();
        s.tick(20).unwrap();
        assert_ne!(s.frame_fingerprint(), stopped);
    }

    #[test]
    fn step_once_only_while_stopped() {
        let mut s = Session::new(&small()).unwrap();
        s.apply(ControlAction::StepOnce, 0).unwrap();
        assert_eq!(s.engine().step_count(), 1);

        s.apply(ControlAction::ToggleRun, 0).unwrap();
        s.apply(ControlAction::StepOnce, 0).unwrap();
        assert_eq!(s.engine().step_count(), 1);
    }

    #[test]
    fn reseed_builds_a_fresh_engine() {
        let mut s = Session::new(&small()).unwrap();
        s.apply(ControlAction::StepOnce, 0).unwrap();
        let expected_seed = s.engine().next_seed();

        assert_eq!(s.apply(ControlAction::Reseed, 0).unwrap(), Flow::Continue);
        assert_eq!(s.engine().seed(), expected_seed);
        assert_eq!(s.engine().step_count(), 0);
        assert_eq!(s.engine().flips_per_step(), 16);
    }

    #[test]
    fn quit_ends_the_loop() {
        let mut s = Session::new(&small()).unwrap();
        assert_eq!(s.apply(ControlAction::Quit, 0).unwrap(), Flow::Quit);
    }

    #[test]
    fn oversized_surface_fails_construction() {
        let config = AppConfig {
            cell_width: u32::MAX,
            ..small()
        };
        assert!(matches!(
            Session::new(&config),
            Err(ConfigError::Surface(_))
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = AppConfig {
            height: 0,
            ..small()
        };
        assert!(Session::new(&config).is_err());
    }
}
