//! Simulation parameters, fixed for the lifetime of an engine.

use crate::error::LatticeError;
use crate::types::{Dimensions, DEFAULT_COUPLING, DEFAULT_FIELD};

/// Lattice size and Hamiltonian parameters.
///
/// Validated once by [`SimParams::new`]. Changing any value means building a
/// new engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimParams {
    dims: Dimensions,
    coupling: f64,
    field: f64,
}

impl SimParams {
    pub fn new(width: u32, height: u32, coupling: f64, field: f64) -> Result<Self, LatticeError> {
        let dims = Dimensions::new(width, height);
        if !dims.is_valid() {
            return Err(LatticeError::InvalidDimensions { width, height });
        }
        if !coupling.is_finite() {
            return Err(LatticeError::NonFiniteParameter {
                name: "coupling",
                value: coupling,
            });
        }
        if !field.is_finite() {
            return Err(LatticeError::NonFiniteParameter {
                name: "field",
                value: field,
            });
        }
        Ok(Self {
            dims,
            coupling,
            field,
        })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn width(&self) -> u32 {
        self.dims.width
    }

    pub fn height(&self) -> u32 {
        self.dims.height
    }

    /// Interaction strength J
    pub fn coupling(&self) -> f64 {
        self.coupling
    }

    /// External field h
    pub fn field(&self) -> f64 {
        self.field
    }
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            dims: Dimensions::default(),
            coupling: DEFAULT_COUPLING,
            field: DEFAULT_FIELD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        assert_eq!(
            SimParams::new(0, 10, 1.0, 0.0),
            Err(LatticeError::InvalidDimensions {
                width: 0,
                height: 10
            })
        );
        assert!(SimParams::new(10, 0, 1.0, 0.0).is_err());
    }

    #[test]
    fn rejects_non_finite_coupling_and_field() {
        assert!(matches!(
            SimParams::new(4, 4, f64::NAN, 0.0),
            Err(LatticeError::NonFiniteParameter { name: "coupling", .. })
        ));
        assert!(matches!(
            SimParams::new(4, 4, 1.0, f64::INFINITY),
            Err(LatticeError::NonFiniteParameter { name: "field", .. })
        ));
    }

    #[test]
    fn accepts_negative_coupling() {
        let p = SimParams::new(2, 3, -1.0, 0.25).unwrap();
        assert_eq!(p.coupling(), -1.0);
        assert_eq!(p.field(), 0.25);
        assert_eq!(p.dimensions(), Dimensions::new(2, 3));
    }
}
