//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::ControlAction`]. The host
//! turns those into scheduler and engine calls; nothing here touches the
//! simulation.

pub mod map;

pub use tui_ising_types as types;

pub use map::{handle_key_event, should_quit};
