//! Core lattice module - pure, deterministic, and testable
//!
//! This crate holds the spin state and everything that reads or mutates it.
//! It has **no dependencies** on terminal I/O or timing, making it:
//!
//! - **Deterministic**: Same seed produces identical trajectories
//! - **Testable**: Decoding and dynamics are plain functions over bytes
//! - **Compact**: One bit per spin, row-major, fixed dimensions
//!
//! # Module Structure
//!
//! - [`lattice`]: bit-packed buffer, borrowed views, and the decoder
//! - [`params`]: immutable simulation parameters
//! - [`engine`]: the [`SimulationEngine`] contract and [`MetropolisEngine`]
//! - [`rng`]: seeded LCG used by the engine
//! - [`error`]: [`LatticeError`]
//!
//! # Bit Layout
//!
//! Spin `i` (row `i / width`, column `i % width`) lives in bit `i % 8` of
//! byte `i / 8`. A set bit is spin up.
//!
//! # Example
//!
//! ```
//! use tui_ising_core::{MetropolisEngine, SimulationEngine};
//!
//! let mut engine = MetropolisEngine::create(32, 16, 1.0, 0.0)
//!     .unwrap()
//!     .with_flips_per_step(1_000);
//!
//! let before = engine.lattice_view().magnetization();
//! engine.advance();
//! let view = engine.lattice_view();
//!
//! assert_eq!(engine.step_count(), 1);
//! assert_eq!(view.as_bytes().len(), 64);
//! assert!((-1.0..=1.0).contains(&before));
//! ```

pub mod engine;
pub mod error;
pub mod lattice;
pub mod params;
pub mod rng;

pub use tui_ising_types as types;

// Re-export commonly used types for convenience
pub use engine::{MetropolisEngine, SimulationEngine};
pub use error::LatticeError;
pub use lattice::{decode, encode, LatticeBuffer, LatticeView};
pub use params::SimParams;
pub use rng::SimpleRng;
