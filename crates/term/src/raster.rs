//! Raster: the pixel surface the spin renderer paints into.

use crate::fb::Rgb;

/// Row-major RGB pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Raster {
    pub fn new(width: u32, height: u32, fill: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Resize, keeping the allocation when the size is unchanged.
    pub fn resize(&mut self, width: u32, height: u32, fill: Rgb) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels
            .resize((width as usize) * (height as usize), fill);
    }

    #[inline(always)]
    fn idx(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        self.idx(x, y).map(|i| self.pixels[i])
    }

    pub fn set(&mut self, x: u32, y: u32, color: Rgb) {
        if let Some(i) = self.idx(x, y) {
            self.pixels[i] = color;
        }
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Fill a rectangle, clipped to the raster.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        if x >= x_end {
            return;
        }
        let width = self.width as usize;
        for row in y..y_end {
            let start = (row as usize) * width;
            self.pixels[start + x as usize..start + x_end as usize].fill(color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rect_is_clipped() {
        let c = Rgb::new(9, 9, 9);
        let mut r = Raster::new(4, 3, Rgb::default());
        r.fill_rect(2, 1, 10, 10, c);
        assert_eq!(r.get(1, 1), Some(Rgb::default()));
        assert_eq!(r.get(2, 1), Some(c));
        assert_eq!(r.get(3, 2), Some(c));
        assert_eq!(r.get(2, 0), Some(Rgb::default()));
    }

    #[test]
    fn fill_rect_outside_is_a_no_op() {
        let mut r = Raster::new(2, 2, Rgb::default());
        r.fill_rect(5, 0, 1, 1, Rgb::new(1, 1, 1));
        r.fill_rect(0, 5, 1, 1, Rgb::new(1, 1, 1));
        assert!(r.pixels().iter().all(|p| *p == Rgb::default()));
    }
}
