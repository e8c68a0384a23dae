//! ScreenView: lays out the lattice raster and the status panel.
//!
//! Pure (no I/O), like the spin renderer. The raster is packed two pixel rows
//! per terminal row with half blocks.

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::raster::Raster;
use crate::types::Dimensions;

/// Width reserved for the status panel, including its left margin.
const PANEL_W: u16 = 20;

/// Rows used by the status panel.
const PANEL_H: u16 = 12;

const HELP: &str = "space start/stop  n step  r reseed  q quit";

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Values shown in the status panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusView {
    pub running: bool,
    pub step: u64,
    pub magnetization: f64,
    pub energy_per_spin: f64,
    pub coupling: f64,
    pub field: f64,
    pub dims: Dimensions,
    pub seed: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

pub struct ScreenView {
    anchor_y: AnchorY,
    background: Rgb,
}

impl Default for ScreenView {
    fn default() -> Self {
        Self {
            anchor_y: AnchorY::Center,
            background: Rgb::new(0, 0, 0),
        }
    }
}

impl ScreenView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Terminal cells covered by `raster`.
    pub fn image_size(raster: &Raster) -> (u16, u16) {
        let w = u16::try_from(raster.width()).unwrap_or(u16::MAX);
        let h = u16::try_from(raster.height().div_ceil(2)).unwrap_or(u16::MAX);
        (w, h)
    }

    /// Compose the frame into an existing framebuffer.
    ///
    /// Allocation-free once `fb` has the viewport size.
    pub fn compose_into(
        &self,
        raster: &Raster,
        status: &StatusView,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell {
            ch: ' ',
            style: CellStyle::new(Rgb::new(200, 200, 200), self.background),
        });

        // Leave the last row for the key help.
        let usable_h = viewport.height.saturating_sub(1);
        let (img_w, img_h) = Self::image_size(raster);
        let total_w = img_w.saturating_add(PANEL_W);

        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => usable_h.saturating_sub(img_h) / 2,
            AnchorY::Top => 0,
        };

        fb.blit_half_blocks(start_x, start_y, raster, self.background);

        let panel_x = start_x.saturating_add(img_w).saturating_add(2);
        if panel_x.saturating_add(PANEL_W - 2) <= viewport.width {
            let panel_y = start_y.min(usable_h.saturating_sub(PANEL_H));
            self.draw_panel(fb, status, panel_x, panel_y);
        }

        if viewport.height > 0 {
            let help = CellStyle::new(Rgb::new(120, 120, 130), self.background);
            fb.put_str(0, viewport.height - 1, HELP, help);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn compose(&self, raster: &Raster, status: &StatusView, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.compose_into(raster, status, viewport, &mut fb);
        fb
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, status: &StatusView, x: u16, y: u16) {
        let label = CellStyle::new(Rgb::new(220, 220, 220), self.background).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), self.background);

        let mut y = y;
        fb.put_str(x, y, "ISING 2D", label);
        y = y.saturating_add(2);

        let (state, color) = if status.running {
            ("RUNNING", Rgb::new(100, 220, 120))
        } else {
            ("STOPPED", Rgb::new(220, 80, 80))
        };
        fb.put_str(x, y, state, CellStyle::new(color, self.background).bold());
        y = y.saturating_add(2);

        fb.put_str(x, y, "STEP", label);
        fb.put_u64(x + 6, y, status.step, value);
        y = y.saturating_add(1);

        fb.put_str(x, y, "M", label);
        fb.put_f64(x + 6, y, status.magnetization, 4, value);
        y = y.saturating_add(1);

        fb.put_str(x, y, "E/N", label);
        fb.put_f64(x + 6, y, status.energy_per_spin, 4, value);
        y = y.saturating_add(2);

        fb.put_str(x, y, "J", label);
        fb.put_f64(x + 6, y, status.coupling, 3, value);
        y = y.saturating_add(1);

        fb.put_str(x, y, "h", label);
        fb.put_f64(x + 6, y, status.field, 3, value);
        y = y.saturating_add(1);

        fb.put_str(x, y, "SIZE", label);
        fb.put_u64(x + 6, y, status.dims.width as u64, value);
        let w_digits = digits(status.dims.width as u64);
        fb.put_char(x + 6 + w_digits, y, 'x', value);
        fb.put_u64(x + 7 + w_digits, y, status.dims.height as u64, value);
        y = y.saturating_add(1);

        fb.put_str(x, y, "SEED", label);
        fb.put_u64(x + 6, y, status.seed as u64, value);
    }
}

fn digits(mut v: u64) -> u16 {
    let mut n = 1;
    while v >= 10 {
        v /= 10;
        n += 1;
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> StatusView {
        StatusView {
            running: false,
            step: 42,
            magnetization: 0.25,
            energy_per_spin: -1.5,
            coupling: 1.0,
            field: 0.0,
            dims: Dimensions::new(96, 48),
            seed: 7,
        }
    }

    fn text(fb: &FrameBuffer) -> String {
        let mut all = String::new();
        for y in 0..fb.height() {
            for x in 0..fb.width() {
                all.push(fb.get(x, y).unwrap().ch);
            }
            all.push('\n');
        }
        all
    }

    #[test]
    fn digits_counts_decimal_width() {
        assert_eq!(digits(0), 1);
        assert_eq!(digits(9), 1);
        assert_eq!(digits(10), 2);
        assert_eq!(digits(96), 2);
        assert_eq!(digits(1000), 4);
    }

    #[test]
    fn panel_shows_state_and_size() {
        let raster = Raster::new(10, 6, Rgb::new(5, 5, 5));
        let fb = ScreenView::default().compose(&raster, &status(), Viewport::new(60, 20));
        let all = text(&fb);
        assert!(all.contains("STOPPED"));
        assert!(all.contains("96x48"));
        assert!(all.contains("+0.2500"));
        assert!(all.contains("q quit"));
    }

    #[test]
    fn panel_is_skipped_when_narrow() {
        let raster = Raster::new(10, 6, Rgb::new(5, 5, 5));
        let fb = ScreenView::default().compose(&raster, &status(), Viewport::new(14, 10));
        assert!(!text(&fb).contains("STEP"));
    }

    #[test]
    fn top_anchor_places_image_at_row_zero() {
        let raster = Raster::new(4, 4, Rgb::new(5, 5, 5));
        let fb = ScreenView::default()
            .with_anchor_y(AnchorY::Top)
            .compose(&raster, &status(), Viewport::new(30, 12));
        // (30 - (4 + 20)) / 2 = 3
        assert_eq!(fb.get(3, 0).unwrap().ch, crate::fb::HALF_BLOCK);
        assert_eq!(fb.get(3, 2).unwrap().ch, ' ');
    }
}
