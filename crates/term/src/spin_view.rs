//! SpinRenderer: paints a lattice view into a pixel raster.
//!
//! This module is pure (no I/O). Each spin becomes a `cell_width` by
//! `cell_height` rectangle at
//! `(col * (cell_width + 1) + 1, row * (cell_height + 1) + 1)`; the one-pixel
//! gaps left between and around cells form the grid gutter.

use thiserror::Error;

use crate::core::LatticeView;
use crate::fb::Rgb;
use crate::raster::Raster;
use crate::types::{Dimensions, Spin};

/// Largest raster, in pixels, a renderer will size.
pub const MAX_SURFACE_PIXELS: u64 = 1 << 26;

/// The raster for a lattice does not fit the pixel coordinate space.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error(
    "raster for a {width}x{height} lattice at {cell_width}x{cell_height} pixels per spin exceeds {max} pixels",
    max = MAX_SURFACE_PIXELS
)]
pub struct SurfaceTooLarge {
    pub width: u32,
    pub height: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

/// Colors for the two spin states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinColors {
    pub up: Rgb,
    pub down: Rgb,
}

impl SpinColors {
    pub fn for_spin(&self, spin: Spin) -> Rgb {
        match spin {
            Spin::Up => self.up,
            Spin::Down => self.down,
        }
    }
}

impl Default for SpinColors {
    fn default() -> Self {
        Self {
            up: Rgb::new(235, 235, 235),
            down: Rgb::new(20, 20, 30),
        }
    }
}

/// Render target configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTarget {
    /// Pixels per spin horizontally, at least 1.
    pub cell_width: u32,
    /// Pixels per spin vertically, at least 1.
    pub cell_height: u32,
    pub colors: SpinColors,
    /// Gutter color between cells.
    pub gutter: Rgb,
}

impl Default for RenderTarget {
    fn default() -> Self {
        Self {
            cell_width: 1,
            cell_height: 1,
            colors: SpinColors::default(),
            gutter: Rgb::new(60, 60, 70),
        }
    }
}

pub struct SpinRenderer {
    target: RenderTarget,
}

impl Default for SpinRenderer {
    fn default() -> Self {
        Self::new(RenderTarget::default())
    }
}

impl SpinRenderer {
    /// Cell sizes below 1 are raised to 1.
    pub fn new(target: RenderTarget) -> Self {
        Self {
            target: RenderTarget {
                cell_width: target.cell_width.max(1),
                cell_height: target.cell_height.max(1),
                ..target
            },
        }
    }

    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    /// Raster size for a lattice of `dims`, gutters included.
    ///
    /// Fails when either side overflows `u32` or the pixel count exceeds
    /// [`MAX_SURFACE_PIXELS`].
    pub fn surface_size(&self, dims: Dimensions) -> Result<(u32, u32), SurfaceTooLarge> {
        let too_large = SurfaceTooLarge {
            width: dims.width,
            height: dims.height,
            cell_width: self.target.cell_width,
            cell_height: self.target.cell_height,
        };
        let side = |cells: u32, cell: u32| {
            cell.checked_add(1)
                .and_then(|pitch| cells.checked_mul(pitch))
                .and_then(|span| span.checked_add(1))
        };
        let (w, h) = side(dims.width, self.target.cell_width)
            .zip(side(dims.height, self.target.cell_height))
            .ok_or(too_large)?;
        if (w as u64) * (h as u64) > MAX_SURFACE_PIXELS {
            return Err(too_large);
        }
        Ok((w, h))
    }

    /// Raster origin of the cell at `(col, row)`.
    ///
    /// Exact for every cell of a lattice whose [`Self::surface_size`] is
    /// `Ok`; saturates past that.
    pub fn cell_origin(&self, col: u32, row: u32) -> (u32, u32) {
        let origin = |i: u32, cell: u32| i.saturating_mul(cell.saturating_add(1)).saturating_add(1);
        (
            origin(col, self.target.cell_width),
            origin(row, self.target.cell_height),
        )
    }

    /// Paint every spin of `view` into `raster`.
    ///
    /// This is the allocation-free hot path. The raster is resized to
    /// [`Self::surface_size`] first; reuse the same raster across frames. An
    /// oversized surface leaves `raster` untouched.
    pub fn render_into(
        &self,
        view: &LatticeView<'_>,
        raster: &mut Raster,
    ) -> Result<(), SurfaceTooLarge> {
        let (w, h) = self.surface_size(view.dimensions())?;
        raster.resize(w, h, self.target.gutter);
        raster.fill(self.target.gutter);

        for (pos, spin) in view.iter() {
            let (px, py) = self.cell_origin(pos.x, pos.y);
            raster.fill_rect(
                px,
                py,
                self.target.cell_width,
                self.target.cell_height,
                self.target.colors.for_spin(spin),
            );
        }
        Ok(())
    }

    /// Convenience helper that allocates a new raster.
    pub fn render(&self, view: &LatticeView<'_>) -> Result<Raster, SurfaceTooLarge> {
        let (w, h) = self.surface_size(view.dimensions())?;
        let mut raster = Raster::new(w, h, self.target.gutter);
        self.render_into(view, &mut raster)?;
        Ok(raster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_includes_gutters() {
        let r = SpinRenderer::new(RenderTarget {
            cell_width: 2,
            cell_height: 3,
            ..RenderTarget::default()
        });
        assert_eq!(r.surface_size(Dimensions::new(4, 2)), Ok((13, 9)));
        assert_eq!(r.cell_origin(0, 0), (1, 1));
        assert_eq!(r.cell_origin(3, 1), (10, 5));
    }

    #[test]
    fn zero_cell_size_is_raised_to_one() {
        let r = SpinRenderer::new(RenderTarget {
            cell_width: 0,
            cell_height: 0,
            ..RenderTarget::default()
        });
        assert_eq!(r.target().cell_width, 1);
        assert_eq!(r.surface_size(Dimensions::new(3, 3)), Ok((7, 7)));
    }

    #[test]
    fn paints_cells_and_gutters() {
        let target = RenderTarget::default();
        let r = SpinRenderer::new(target);
        let view = LatticeView::new(&[0b0000_0001], Dimensions::new(2, 1)).unwrap();
        let raster = r.render(&view).unwrap();

        assert_eq!((raster.width(), raster.height()), (5, 3));
        assert_eq!(raster.get(0, 0), Some(target.gutter));
        assert_eq!(raster.get(1, 1), Some(target.colors.up));
        assert_eq!(raster.get(2, 1), Some(target.gutter));
        assert_eq!(raster.get(3, 1), Some(target.colors.down));
        assert_eq!(raster.get(4, 1), Some(target.gutter));
    }

    #[test]
    fn overflowing_cell_size_is_rejected() {
        let r = SpinRenderer::new(RenderTarget {
            cell_width: u32::MAX,
            ..RenderTarget::default()
        });
        let dims = Dimensions::new(8, 4);
        assert_eq!(
            r.surface_size(dims),
            Err(SurfaceTooLarge {
                width: 8,
                height: 4,
                cell_width: u32::MAX,
                cell_height: 1,
            })
        );
        assert_eq!(r.cell_origin(7, 3), (u32::MAX, 7));

        let view = LatticeView::new(&[0u8; 4], dims).unwrap();
        let mut raster = Raster::new(2, 2, Rgb::default());
        assert!(r.render_into(&view, &mut raster).is_err());
        assert_eq!((raster.width(), raster.height()), (2, 2));
    }

    #[test]
    fn wide_lattice_with_moderate_cells_is_rejected() {
        let r = SpinRenderer::new(RenderTarget {
            cell_width: 4,
            cell_height: 4,
            ..RenderTarget::default()
        });
        // 5 * 1_000_000 + 1 fits in u32, the pixel count does not fit the cap.
        assert!(r.surface_size(Dimensions::new(1_000_000, 4)).is_err());
        assert!(r.surface_size(Dimensions::new(u32::MAX, 1)).is_err());
        assert_eq!(r.surface_size(Dimensions::new(96, 48)), Ok((481, 241)));
    }
}
