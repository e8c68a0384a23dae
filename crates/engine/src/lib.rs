//! Frame scheduling engine.
//!
//! Decouples the simulation step rate from the display refresh rate. The
//! host ticks the [`FrameScheduler`] once per frame with a timestamp from a
//! [`Clock`]; the scheduler always renders and advances the simulation at
//! most once, no more often than its minimum step interval.
//!
//! ```
//! use std::convert::Infallible;
//! use tui_ising_core::{MetropolisEngine, SimulationEngine};
//! use tui_ising_engine::{Clock, FrameScheduler, ManualClock};
//!
//! let mut engine = MetropolisEngine::create(16, 16, 1.0, 0.0).unwrap();
//! let mut scheduler = FrameScheduler::new(50);
//! let mut clock = ManualClock::default();
//! scheduler.start();
//!
//! for _ in 0..10 {
//!     scheduler
//!         .tick(clock.now_ms(), &mut engine, |_view| Ok::<(), Infallible>(()))
//!         .unwrap();
//!     clock.advance(25);
//! }
//!
//! // One step every other frame.
//! assert_eq!(engine.step_count(), 5);
//! ```

pub mod clock;
pub mod scheduler;

pub use tui_ising_core as core;
pub use tui_ising_types as types;

pub use clock::{Clock, FrameClock, ManualClock};
pub use scheduler::{FrameScheduler, RunState, TickOutcome};
