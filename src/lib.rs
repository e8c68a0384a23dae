//! 2D Ising lattice viewer (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `tui_ising::{core,engine,input,term,types}` and adds the
//! host pieces shared by both binaries.

pub use tui_ising_core as core;
pub use tui_ising_engine as engine;
pub use tui_ising_input as input;
pub use tui_ising_term as term;
pub use tui_ising_types as types;

pub mod config;
pub mod logging;
pub mod session;

pub use config::{AppConfig, ConfigError};
pub use session::{Flow, Session, TickRecord};
