//! Terminal rendering for the spin lattice.
//!
//! Rendering happens in stages, each one testable without a terminal:
//!
//! 1. [`SpinRenderer`] paints a lattice view into a pixel [`Raster`]
//! 2. [`ScreenView`] packs the raster into terminal cells (two pixel rows per
//!    cell, half blocks) and adds the status panel
//! 3. [`TerminalRenderer`] diffs against the previous frame and flushes
//!
//! [`RenderThrottle`] decides whether stage 3 runs for frames that did not
//! change while the simulation is stopped.

pub mod fb;
pub mod raster;
pub mod render_throttle;
pub mod renderer;
pub mod screen;
pub mod spin_view;

pub use tui_ising_core as core;
pub use tui_ising_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb, HALF_BLOCK};
pub use raster::Raster;
pub use render_throttle::{fingerprint, RenderThrottle};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use screen::{AnchorY, ScreenView, StatusView, Viewport};
pub use spin_view::{
    RenderTarget, SpinColors, SpinRenderer, SurfaceTooLarge, MAX_SURFACE_PIXELS,
};
