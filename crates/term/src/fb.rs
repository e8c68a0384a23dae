//! Framebuffer and style types for terminal rendering.

use std::fmt::Write as _;

use arrayvec::ArrayString;

use crate::raster::Raster;

/// Upper half block: foreground paints the top pixel, background the bottom.
pub const HALF_BLOCK: char = '▀';

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    /// Writes outside the buffer are clipped.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.put_char(cx, y, ch, style);
            cx += 1;
        }
    }

    /// Write a number without allocating.
    pub fn put_u64(&mut self, x: u16, y: u16, value: u64, style: CellStyle) {
        let mut s = ArrayString::<24>::new();
        let _ = write!(s, "{value}");
        self.put_str(x, y, &s, style);
    }

    /// Write a signed float with fixed precision without allocating.
    pub fn put_f64(&mut self, x: u16, y: u16, value: f64, precision: usize, style: CellStyle) {
        let mut s = ArrayString::<32>::new();
        if write!(s, "{value:+.precision$}").is_err() {
            s.clear();
            s.push('?');
        }
        self.put_str(x, y, &s, style);
    }

    /// Copy `raster` at terminal cell `(x, y)`, two pixel rows per cell.
    ///
    /// An odd last pixel row is paired with `pad`.
    pub fn blit_half_blocks(&mut self, x: u16, y: u16, raster: &Raster, pad: Rgb) {
        let rows = raster.height().div_ceil(2);
        for ty in 0..rows {
            let cy = match u16::try_from(ty).ok().and_then(|t| y.checked_add(t)) {
                Some(cy) if cy < self.height => cy,
                _ => break,
            };
            for px in 0..raster.width() {
                let cx = match u16::try_from(px).ok().and_then(|p| x.checked_add(p)) {
                    Some(cx) if cx < self.width => cx,
                    _ => break,
                };
                let top = raster.get(px, ty * 2).unwrap_or(pad);
                let bottom = raster.get(px, ty * 2 + 1).unwrap_or(pad);
                self.put_char(cx, cy, HALF_BLOCK, CellStyle::new(top, bottom));
            }
        }
    }
}
