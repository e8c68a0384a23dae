//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (lattice storage, scheduling, terminal rendering).
//!
//! # Lattice Dimensions
//!
//! Default lattice size when nothing is configured:
//!
//! - **Width**: 96 columns
//! - **Height**: 48 rows
//!
//! Lattice dimensions are logical spin counts. They are unrelated to the
//! on-screen size, which is derived from the render cell size.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Host frame interval (~60 FPS) |
//! | `DEFAULT_STEP_MS` | 50 | Minimum wall time between simulation steps |
//! | `STATIC_REDRAW_MS` | 250 | Terminal flush interval while nothing changes |
//!
//! # Simulation Defaults
//!
//! - `DEFAULT_COUPLING`: 1.0 (ferromagnetic)
//! - `DEFAULT_FIELD`: 0.0
//! - `DEFAULT_FLIPS_PER_STEP`: 10000 single-spin trials per step
//! - `SPIN_DOWN_PROBABILITY`: 0.3 chance a spin starts down
//!
//! # Examples
//!
//! ```
//! use tui_ising_types::{ControlAction, Dimensions, Spin};
//!
//! // Spins convert from the packed boolean representation
//! assert_eq!(Spin::from(true), Spin::Up);
//! assert_eq!(f64::from(Spin::Down), -1.0);
//!
//! // 3x2 lattice packs into a single byte
//! let dims = Dimensions::new(3, 2);
//! assert_eq!(dims.spin_count(), 6);
//! assert_eq!(dims.byte_len(), 1);
//!
//! // Parse a control action
//! assert_eq!(ControlAction::from_str("toggle"), Some(ControlAction::ToggleRun));
//! ```

/// Default lattice width in spins
pub const DEFAULT_WIDTH: u32 = 96;

/// Default lattice height in spins
pub const DEFAULT_HEIGHT: u32 = 48;

/// Default coupling constant J
pub const DEFAULT_COUPLING: f64 = 1.0;

/// Default external field h
pub const DEFAULT_FIELD: f64 = 0.0;

/// Host frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u64 = 16;

/// Default minimum interval between two simulation steps
pub const DEFAULT_STEP_MS: u64 = 50;

/// Minimum interval between terminal flushes of an unchanged frame
pub const STATIC_REDRAW_MS: u64 = 250;

/// Default number of single-spin trials per simulation step
pub const DEFAULT_FLIPS_PER_STEP: u32 = 10_000;

/// Probability that a spin starts in the down state
pub const SPIN_DOWN_PROBABILITY: f64 = 0.3;

/// Orientation of a single magnetic moment.
///
/// In the packed lattice a set bit is [`Spin::Up`] and a clear bit is
/// [`Spin::Down`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spin {
    Up,
    Down,
}

impl Spin {
    /// The opposite orientation
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_ising_types::Spin;
    ///
    /// assert_eq!(Spin::Up.flip(), Spin::Down);
    /// assert_eq!(Spin::Down.flip(), Spin::Up);
    /// ```
    pub fn flip(self) -> Self {
        match self {
            Spin::Up => Spin::Down,
            Spin::Down => Spin::Up,
        }
    }

    pub fn is_up(self) -> bool {
        self == Spin::Up
    }

    /// Signed value used by the energy terms (+1 / -1)
    pub fn sign(self) -> i32 {
        match self {
            Spin::Up => 1,
            Spin::Down => -1,
        }
    }
}

impl From<bool> for Spin {
    fn from(bit: bool) -> Self {
        if bit {
            Spin::Up
        } else {
            Spin::Down
        }
    }
}

impl From<&bool> for Spin {
    fn from(bit: &bool) -> Self {
        Spin::from(*bit)
    }
}

impl From<Spin> for bool {
    fn from(spin: Spin) -> Self {
        spin.is_up()
    }
}

impl From<Spin> for i32 {
    fn from(spin: Spin) -> Self {
        spin.sign()
    }
}

impl From<Spin> for f64 {
    fn from(spin: Spin) -> Self {
        spin.sign() as f64
    }
}

/// Lattice dimensions in spins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of spins (`width * height`)
    pub fn spin_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Packed storage length: `ceil(width * height / 8)` bytes
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_ising_types::Dimensions;
    ///
    /// assert_eq!(Dimensions::new(8, 1).byte_len(), 1);
    /// assert_eq!(Dimensions::new(3, 3).byte_len(), 2);
    /// assert_eq!(Dimensions::new(10, 10).byte_len(), 13);
    /// ```
    pub fn byte_len(&self) -> usize {
        self.spin_count().div_ceil(8)
    }

    /// Both dimensions are non-zero
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

/// A site on the lattice: `x` is the column, `y` is the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Host-level controls around the simulation
///
/// These come from the keyboard in the terminal host and never reach the
/// simulation engine directly; the host turns them into scheduler calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// Start when stopped, stop when running
    ToggleRun,
    /// Advance exactly one step (only honored while stopped)
    StepOnce,
    /// Rebuild the engine with the same parameters and a new seed
    Reseed,
    /// Leave the host loop
    Quit,
}

impl ControlAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_ising_types::ControlAction;
    ///
    /// assert_eq!(ControlAction::from_str("Step"), Some(ControlAction::StepOnce));
    /// assert_eq!(ControlAction::from_str("reseed"), Some(ControlAction::Reseed));
    /// assert_eq!(ControlAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "toggle" | "togglerun" => Some(ControlAction::ToggleRun),
            "step" | "steponce" => Some(ControlAction::StepOnce),
            "reseed" => Some(ControlAction::Reseed),
            "quit" => Some(ControlAction::Quit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlAction::ToggleRun => "toggle",
            ControlAction::StepOnce => "step",
            ControlAction::Reseed => "reseed",
            ControlAction::Quit => "quit",
        }
    }
}
