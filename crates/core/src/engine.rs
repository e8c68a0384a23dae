//! Simulation engine contract and the Metropolis implementation.
//!
//! The frame scheduler only sees [`SimulationEngine`]. The engine owns the
//! lattice; callers borrow a [`LatticeView`] that cannot be held across
//! [`SimulationEngine::advance`] because advancing needs `&mut self`.

use tracing::{debug, info};

use crate::error::LatticeError;
use crate::lattice::{LatticeBuffer, LatticeView};
use crate::params::SimParams;
use crate::rng::SimpleRng;
use crate::types::{Position, DEFAULT_FLIPS_PER_STEP, SPIN_DOWN_PROBABILITY};

/// A stepped simulation over a packed spin lattice.
pub trait SimulationEngine {
    /// Parameters the engine was built with.
    fn params(&self) -> &SimParams;

    /// Mutate the lattice in place by exactly one simulation step.
    fn advance(&mut self);

    /// Read-only view of the current lattice.
    fn lattice_view(&self) -> LatticeView<'_>;

    /// Completed `advance()` calls since construction.
    fn step_count(&self) -> u64;
}

/// Single-spin-flip Metropolis dynamics with periodic boundaries.
///
/// One step runs `flips_per_step` trials. Each trial picks a random site and
/// flips it when `ΔE = 2·s·(J·Σneighbors + h)` is negative, or with
/// probability `exp(-ΔE)` otherwise.
#[derive(Debug, Clone)]
pub struct MetropolisEngine {
    params: SimParams,
    lattice: LatticeBuffer,
    rng: SimpleRng,
    seed: u32,
    flips_per_step: u32,
    steps: u64,
}

impl MetropolisEngine {
    /// Build an engine with a randomized initial lattice.
    ///
    /// Each spin starts up with probability `1 - SPIN_DOWN_PROBABILITY`.
    pub fn new(params: SimParams, seed: u32) -> Result<Self, LatticeError> {
        let mut lattice = LatticeBuffer::new(params.dimensions())?;
        let mut rng = SimpleRng::new(seed);
        for i in 0..lattice.len() {
            if !rng.chance(SPIN_DOWN_PROBABILITY) {
                lattice.toggle_unchecked(i);
            }
        }

        info!(
            width = params.width(),
            height = params.height(),
            coupling = params.coupling(),
            field = params.field(),
            seed,
            "metropolis engine created"
        );

        Ok(Self {
            params,
            lattice,
            rng,
            seed,
            flips_per_step: DEFAULT_FLIPS_PER_STEP,
            steps: 0,
        })
    }

    /// Validate raw parameters and build an engine with seed 1.
    pub fn create(width: u32, height: u32, coupling: f64, field: f64) -> Result<Self, LatticeError> {
        Self::new(SimParams::new(width, height, coupling, field)?, 1)
    }

    /// Override the number of single-spin trials per step.
    pub fn with_flips_per_step(mut self, flips_per_step: u32) -> Self {
        self.flips_per_step = flips_per_step;
        self
    }

    pub fn flips_per_step(&self) -> u32 {
        self.flips_per_step
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// A seed derived from the current RNG state, for reseeding.
    pub fn next_seed(&self) -> u32 {
        self.rng.state()
    }

    pub fn magnetization(&self) -> f64 {
        self.lattice.magnetization()
    }

    pub fn energy_per_spin(&self) -> f64 {
        self.lattice
            .view()
            .energy_per_spin(self.params.coupling(), self.params.field())
    }

    fn trial(&mut self) {
        let dims = self.params.dimensions();
        let pos = Position::new(
            self.rng.next_range(dims.width),
            self.rng.next_range(dims.height),
        );
        let index = (pos.y as usize) * (dims.width as usize) + (pos.x as usize);

        let view = self.lattice.view();
        let s = view.sign_unchecked(pos) as f64;
        let neighbors = view.neighbor_sum_unchecked(pos) as f64;
        let delta_energy = 2.0 * s * (self.params.coupling() * neighbors + self.params.field());

        if delta_energy < 0.0 || (-delta_energy).exp() > self.rng.next_f64() {
            self.lattice.toggle_unchecked(index);
        }
    }
}

impl SimulationEngine for MetropolisEngine {
    fn params(&self) -> &SimParams {
        &self.params
    }

    fn advance(&mut self) {
        for _ in 0..self.flips_per_step {
            self.trial();
        }
        self.steps += 1;
        debug!(step = self.steps, "simulation advanced");
    }

    fn lattice_view(&self) -> LatticeView<'_> {
        self.lattice.view()
    }

    fn step_count(&self) -> u64 {
        self.steps
    }
}
