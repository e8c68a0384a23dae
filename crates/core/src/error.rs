//! Lattice error types.

use thiserror::Error;

/// Errors raised by lattice construction and decoding.
///
/// None of these are retried. Dimension and length errors reject a
/// configuration up front; index and position errors are contract
/// violations by the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    /// Width or height is zero.
    #[error("invalid lattice dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: u32, height: u32 },

    /// A byte view is too short to hold `width * height` bits.
    #[error("lattice view too short: need {required} bytes, got {actual}")]
    ViewTooShort { required: usize, actual: usize },

    /// Flat index outside `[0, width * height)`.
    #[error("spin index {index} out of range for {len} spins")]
    IndexOutOfRange { index: usize, len: usize },

    /// Grid position outside the lattice.
    #[error("position ({x}, {y}) outside {width}x{height} lattice")]
    PositionOutOfRange {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Coupling or field is NaN or infinite.
    #[error("simulation parameter `{name}` must be finite, got {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },
}
