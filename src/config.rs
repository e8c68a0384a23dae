//! Host configuration read from `ISING_*` environment variables.

use serde::Serialize;
use thiserror::Error;

use crate::core::{LatticeError, SimParams};
use crate::term::{RenderTarget, SpinRenderer, SurfaceTooLarge};
use crate::types::{
    DEFAULT_COUPLING, DEFAULT_FIELD, DEFAULT_FLIPS_PER_STEP, DEFAULT_HEIGHT, DEFAULT_STEP_MS,
    DEFAULT_WIDTH,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error(transparent)]
    Lattice(#[from] LatticeError),

    #[error("render cell size must be at least 1x1, got {width}x{height}")]
    ZeroCellSize { width: u32, height: u32 },

    #[error(transparent)]
    Surface(#[from] SurfaceTooLarge),
}

/// Everything the host needs to build a session.
///
/// Values are consumed once at construction; changing them means starting a
/// new session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppConfig {
    pub width: u32,
    pub height: u32,
    pub coupling: f64,
    pub field: f64,
    pub seed: u32,
    pub step_ms: u64,
    pub flips_per_step: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub log_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            coupling: DEFAULT_COUPLING,
            field: DEFAULT_FIELD,
            seed: 1,
            step_ms: DEFAULT_STEP_MS,
            flips_per_step: DEFAULT_FLIPS_PER_STEP,
            cell_width: 1,
            cell_height: 1,
            log_path: None,
        }
    }
}

impl AppConfig {
    /// Create from environment variables.
    ///
    /// Unset or unparseable values fall back to defaults; use
    /// [`AppConfig::validate`] to reject out-of-range ones.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
            default: T,
        ) -> T {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        }

        let d = Self::default();
        let log_path = lookup("ISING_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            width: parsed(&lookup, "ISING_WIDTH", d.width),
            height: parsed(&lookup, "ISING_HEIGHT", d.height),
            coupling: parsed(&lookup, "ISING_COUPLING", d.coupling),
            field: parsed(&lookup, "ISING_FIELD", d.field),
            seed: parsed(&lookup, "ISING_SEED", d.seed),
            step_ms: parsed(&lookup, "ISING_STEP_MS", d.step_ms),
            flips_per_step: parsed(&lookup, "ISING_FLIPS_PER_STEP", d.flips_per_step),
            cell_width: parsed(&lookup, "ISING_CELL_W", d.cell_width),
            cell_height: parsed(&lookup, "ISING_CELL_H", d.cell_height),
            log_path,
        }
    }

    /// Simulation parameters, validated.
    pub fn sim_params(&self) -> Result<SimParams, ConfigError> {
        Ok(SimParams::new(
            self.width,
            self.height,
            self.coupling,
            self.field,
        )?)
    }

    pub fn render_target(&self) -> Result<RenderTarget, ConfigError> {
        if self.cell_width == 0 || self.cell_height == 0 {
            return Err(ConfigError::ZeroCellSize {
                width: self.cell_width,
                height: self.cell_height,
            });
        }
        Ok(RenderTarget {
            cell_width: self.cell_width,
            cell_height: self.cell_height,
            ..RenderTarget::default()
        })
    }

    /// Check every value the session will use, including that the rendered
    /// raster fits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let params = self.sim_params()?;
        SpinRenderer::new(self.render_target()?).surface_size(params.dimensions())?;
        Ok(())
    }
}
