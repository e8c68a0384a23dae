//! Lattice module - bit-packed spin storage and decoding
//!
//! The lattice is `width * height` spins packed 8 per byte, row-major.
//! Flat index `i` is row `i / width`, column `i % width`, stored in bit
//! `i % 8` (LSB first) of byte `i / 8`. Rows are not byte aligned unless the
//! width is a multiple of 8, so every access goes through the flat index.
//!
//! Trailing bits of the last byte are padding and never read back as spins.

use crate::error::LatticeError;
use crate::types::{Dimensions, Position, Spin};

/// Decode the spin at flat `index` from a packed byte view.
///
/// Fails if the dimensions are empty, if `bytes` is shorter than
/// `dims.byte_len()`, or if `index >= dims.spin_count()`.
///
/// # Examples
///
/// ```
/// use tui_ising_core::lattice::decode;
/// use tui_ising_core::types::{Dimensions, Spin};
///
/// let dims = Dimensions::new(8, 1);
/// assert_eq!(decode(&[0b0000_0101], dims, 0), Ok(Spin::Up));
/// assert_eq!(decode(&[0b0000_0101], dims, 1), Ok(Spin::Down));
/// assert!(decode(&[0b0000_0101], dims, 8).is_err());
/// ```
pub fn decode(bytes: &[u8], dims: Dimensions, index: usize) -> Result<Spin, LatticeError> {
    check_view(bytes.len(), dims)?;
    check_index(index, dims)?;
    Ok(Spin::from(bit(bytes, index)))
}

/// Encode `spin` at flat `index` into a packed byte buffer.
pub fn encode(
    bytes: &mut [u8],
    dims: Dimensions,
    index: usize,
    spin: Spin,
) -> Result<(), LatticeError> {
    check_view(bytes.len(), dims)?;
    check_index(index, dims)?;
    write_bit(bytes, index, spin.is_up());
    Ok(())
}

/// Packed byte length for `dims`.
pub fn byte_len(dims: Dimensions) -> usize {
    dims.byte_len()
}

fn check_dims(dims: Dimensions) -> Result<(), LatticeError> {
    if dims.is_valid() {
        Ok(())
    } else {
        Err(LatticeError::InvalidDimensions {
            width: dims.width,
            height: dims.height,
        })
    }
}

fn check_view(len: usize, dims: Dimensions) -> Result<(), LatticeError> {
    check_dims(dims)?;
    let required = dims.byte_len();
    if len < required {
        return Err(LatticeError::ViewTooShort {
            required,
            actual: len,
        });
    }
    Ok(())
}

fn check_index(index: usize, dims: Dimensions) -> Result<(), LatticeError> {
    let len = dims.spin_count();
    if index >= len {
        return Err(LatticeError::IndexOutOfRange { index, len });
    }
    Ok(())
}

#[inline(always)]
fn bit(bytes: &[u8], index: usize) -> bool {
    (bytes[index >> 3] >> (index & 7)) & 1 == 1
}

#[inline(always)]
fn write_bit(bytes: &mut [u8], index: usize, value: bool) {
    let mask = 1u8 << (index & 7);
    if value {
        bytes[index >> 3] |= mask;
    } else {
        bytes[index >> 3] &= !mask;
    }
}

/// Flat index of `pos` for the given dimensions.
pub fn index_of(dims: Dimensions, pos: Position) -> Result<usize, LatticeError> {
    if !dims.contains(pos) {
        return Err(LatticeError::PositionOutOfRange {
            x: pos.x,
            y: pos.y,
            width: dims.width,
            height: dims.height,
        });
    }
    Ok((pos.y as usize) * (dims.width as usize) + (pos.x as usize))
}

/// Borrowed, read-only view over a packed lattice.
///
/// A view borrows its owner, so it cannot outlive the next mutation of the
/// lattice. Reacquire it after every step.
#[derive(Debug, Clone, Copy)]
pub struct LatticeView<'a> {
    dims: Dimensions,
    bytes: &'a [u8],
}

impl<'a> LatticeView<'a> {
    /// Wrap a byte slice, validating dimensions and length.
    pub fn new(bytes: &'a [u8], dims: Dimensions) -> Result<Self, LatticeError> {
        check_view(bytes.len(), dims)?;
        Ok(Self { dims, bytes })
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

    pub fn len(&self) -> usize {
        self.dims.spin_count()
    }

    /// Always false: a view is never constructed over an empty lattice.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The packed bytes, `ceil(width * height / 8)` long.
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.bytes[..self.dims.byte_len()]
    }

    /// Spin at flat index.
    pub fn spin(&self, index: usize) -> Result<Spin, LatticeError> {
        check_index(index, self.dims)?;
        Ok(Spin::from(bit(self.bytes, index)))
    }

    /// Spin at grid position.
    pub fn spin_at(&self, pos: Position) -> Result<Spin, LatticeError> {
        let index = index_of(self.dims, pos)?;
        Ok(Spin::from(bit(self.bytes, index)))
    }

    /// Row-major iterator over every spin with its position.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Spin)> + 'a {
        let bytes = self.bytes;
        let width = self.dims.width as usize;
        (0..self.dims.spin_count()).map(move |i| {
            let pos = Position::new((i % width) as u32, (i / width) as u32);
            (pos, Spin::from(bit(bytes, i)))
        })
    }

    /// Number of up spins, ignoring padding bits.
    pub fn count_up(&self) -> usize {
        let n = self.dims.spin_count();
        let full = n / 8;
        let mut count: usize = self.bytes[..full]
            .iter()
            .map(|b| b.count_ones() as usize)
            .sum();
        let rem = n % 8;
        if rem != 0 {
            let mask = (1u8 << rem) - 1;
            count += (self.bytes[full] & mask).count_ones() as usize;
        }
        count
    }

    /// Average spin, `2 * up / N - 1`, in `[-1, 1]`.
    pub fn magnetization(&self) -> f64 {
        let n = self.dims.spin_count() as f64;
        (2.0 * self.count_up() as f64) / n - 1.0
    }

    /// Sum of the four nearest neighbors (+1 / -1) with periodic wrap.
    pub fn sum_neighbors(&self, pos: Position) -> Result<i32, LatticeError> {
        index_of(self.dims, pos)?;
        Ok(self.neighbor_sum_unchecked(pos))
    }

    pub(crate) fn neighbor_sum_unchecked(&self, pos: Position) -> i32 {
        let w = self.dims.width;
        let h = self.dims.height;
        let up = Position::new(pos.x, (pos.y + h - 1) % h);
        let down = Position::new(pos.x, (pos.y + 1) % h);
        let left = Position::new((pos.x + w - 1) % w, pos.y);
        let right = Position::new((pos.x + 1) % w, pos.y);
        [up, down, left, right]
            .iter()
            .map(|p| self.sign_unchecked(*p))
            .sum()
    }

    #[inline(always)]
    pub(crate) fn sign_unchecked(&self, pos: Position) -> i32 {
        let i = (pos.y as usize) * (self.dims.width as usize) + (pos.x as usize);
        Spin::from(bit(self.bytes, i)).sign()
    }

    /// Energy per spin, `-(J * Σ s_i s_j + h * Σ s_i) / N`.
    ///
    /// Each bond is counted once (right and down neighbor, periodic).
    pub fn energy_per_spin(&self, coupling: f64, field: f64) -> f64 {
        let w = self.dims.width;
        let h = self.dims.height;
        let mut bonds: i64 = 0;
        let mut total: i64 = 0;
        for y in 0..h {
            for x in 0..w {
                let s = self.sign_unchecked(Position::new(x, y)) as i64;
                let right = self.sign_unchecked(Position::new((x + 1) % w, y)) as i64;
                let down = self.sign_unchecked(Position::new(x, (y + 1) % h)) as i64;
                bonds += s * (right + down);
                total += s;
            }
        }
        let n = self.dims.spin_count() as f64;
        -(coupling * bonds as f64 + field * total as f64) / n
    }
}

/// Owned, fixed-size packed lattice.
///
/// Sized once at construction and never resized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatticeBuffer {
    dims: Dimensions,
    bytes: Vec<u8>,
}

impl LatticeBuffer {
    /// All-down lattice.
    pub fn new(dims: Dimensions) -> Result<Self, LatticeError> {
        check_dims(dims)?;
        Ok(Self {
            dims,
            bytes: vec![0u8; dims.byte_len()],
        })
    }

    /// Take ownership of packed bytes. Extra trailing bytes are dropped.
    pub fn from_bytes(dims: Dimensions, mut bytes: Vec<u8>) -> Result<Self, LatticeError> {
        check_view(bytes.len(), dims)?;
        bytes.truncate(dims.byte_len());
        Ok(Self { dims, bytes })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn len(&self) -> usize {
        self.dims.spin_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Read-only view; valid until the next mutation.
    pub fn view(&self) -> LatticeView<'_> {
        LatticeView {
            dims: self.dims,
            bytes: &self.bytes,
        }
    }

    pub fn spin(&self, index: usize) -> Result<Spin, LatticeError> {
        self.view().spin(index)
    }

    pub fn spin_at(&self, pos: Position) -> Result<Spin, LatticeError> {
        self.view().spin_at(pos)
    }

    pub fn set(&mut self, index: usize, spin: Spin) -> Result<(), LatticeError> {
        check_index(index, self.dims)?;
        write_bit(&mut self.bytes, index, spin.is_up());
        Ok(())
    }

    /// Flip the spin at flat index.
    pub fn toggle(&mut self, index: usize) -> Result<(), LatticeError> {
        check_index(index, self.dims)?;
        self.bytes[index >> 3] ^= 1u8 << (index & 7);
        Ok(())
    }

    /// Flip the spin at grid position.
    pub fn flip(&mut self, pos: Position) -> Result<(), LatticeError> {
        let index = index_of(self.dims, pos)?;
        self.bytes[index >> 3] ^= 1u8 << (index & 7);
        Ok(())
    }

    #[inline(always)]
    pub(crate) fn toggle_unchecked(&mut self, index: usize) {
        self.bytes[index >> 3] ^= 1u8 << (index & 7);
    }

    /// Set every spin. Padding bits stay clear.
    pub fn fill(&mut self, spin: Spin) {
        let value = if spin.is_up() { 0xFF } else { 0x00 };
        self.bytes.fill(value);
        let rem = self.dims.spin_count() % 8;
        if rem != 0 {
            if let Some(last) = self.bytes.last_mut() {
                *last &= (1u8 << rem) - 1;
            }
        }
    }

    pub fn count_up(&self) -> usize {
        self.view().count_up()
    }

    pub fn magnetization(&self) -> f64 {
        self.view().magnetization()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_single_byte_row_lsb_first() {
        let dims = Dimensions::new(8, 1);
        let bytes = [0b0000_0101u8];
        let spins: Vec<Spin> = (0..8).map(|i| decode(&bytes, dims, i).unwrap()).collect();
        assert_eq!(
            spins,
            vec![
                Spin::Up,
                Spin::Down,
                Spin::Up,
                Spin::Down,
                Spin::Down,
                Spin::Down,
                Spin::Down,
                Spin::Down
            ]
        );
    }

    #[test]
    fn decode_rows_straddle_byte_boundary() {
        // 3x3 = 9 bits: row 2 col 2 is bit 0 of byte 1.
        let dims = Dimensions::new(3, 3);
        let bytes = [0b0000_0000u8, 0b0000_0001];
        let view = LatticeView::new(&bytes, dims).unwrap();
        assert_eq!(view.spin_at(Position::new(2, 2)), Ok(Spin::Up));
        assert_eq!(view.spin_at(Position::new(1, 2)), Ok(Spin::Down));
        assert_eq!(view.count_up(), 1);
    }

    #[test]
    fn decode_rejects_short_view() {
        let dims = Dimensions::new(3, 3);
        assert_eq!(
            decode(&[0u8], dims, 0),
            Err(LatticeError::ViewTooShort {
                required: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn decode_rejects_index_past_end_even_inside_padding() {
        let dims = Dimensions::new(3, 2);
        assert_eq!(
            decode(&[0xFF], dims, 6),
            Err(LatticeError::IndexOutOfRange { index: 6, len: 6 })
        );
    }

    #[test]
    fn decode_rejects_zero_dimensions() {
        assert!(matches!(
            decode(&[0u8], Dimensions::new(0, 1), 0),
            Err(LatticeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn encode_then_decode() {
        let dims = Dimensions::new(5, 3);
        let mut bytes = vec![0u8; dims.byte_len()];
        encode(&mut bytes, dims, 9, Spin::Up).unwrap();
        assert_eq!(decode(&bytes, dims, 9), Ok(Spin::Up));
        assert_eq!(bytes, vec![0u8, 0b0000_0010]);
        encode(&mut bytes, dims, 9, Spin::Down).unwrap();
        assert_eq!(bytes, vec![0u8, 0u8]);
    }

    #[test]
    fn count_up_ignores_padding_bits() {
        let dims = Dimensions::new(3, 2);
        let view = LatticeView::new(&[0xFF], dims).unwrap();
        assert_eq!(view.count_up(), 6);
        assert_eq!(view.magnetization(), 1.0);
    }

    #[test]
    fn fill_keeps_padding_clear() {
        let mut lattice = LatticeBuffer::new(Dimensions::new(3, 2)).unwrap();
        lattice.fill(Spin::Up);
        assert_eq!(lattice.as_bytes(), &[0b0011_1111]);
        lattice.fill(Spin::Down);
        assert_eq!(lattice.as_bytes(), &[0]);
    }

    #[test]
    fn toggle_and_flip_address_the_same_bit() {
        let mut lattice = LatticeBuffer::new(Dimensions::new(4, 4)).unwrap();
        lattice.toggle(6).unwrap();
        assert_eq!(lattice.spin_at(Position::new(2, 1)), Ok(Spin::Up));
        lattice.flip(Position::new(2, 1)).unwrap();
        assert_eq!(lattice.spin(6), Ok(Spin::Down));
    }

    #[test]
    fn flip_outside_lattice_is_an_error() {
        let mut lattice = LatticeBuffer::new(Dimensions::new(4, 4)).unwrap();
        assert!(matches!(
            lattice.flip(Position::new(4, 0)),
            Err(LatticeError::PositionOutOfRange { .. })
        ));
    }

    #[test]
    fn neighbor_sum_wraps_periodically() {
        let mut lattice = LatticeBuffer::new(Dimensions::new(4, 4)).unwrap();
        // Corner (0,0): neighbors are (0,3), (0,1), (3,0), (1,0).
        lattice.flip(Position::new(3, 0)).unwrap();
        lattice.flip(Position::new(0, 3)).unwrap();
        let view = lattice.view();
        assert_eq!(view.sum_neighbors(Position::new(0, 0)), Ok(0));
        assert_eq!(view.sum_neighbors(Position::new(2, 2)), Ok(-4));
    }

    #[test]
    fn energy_of_uniform_lattice() {
        let mut lattice = LatticeBuffer::new(Dimensions::new(4, 4)).unwrap();
        lattice.fill(Spin::Up);
        let view = lattice.view();
        // Two bonds per spin, all aligned.
        assert_eq!(view.energy_per_spin(1.0, 0.0), -2.0);
        assert_eq!(view.energy_per_spin(1.0, 0.5), -2.5);
    }

    #[test]
    fn iter_is_row_major() {
        let dims = Dimensions::new(3, 2);
        let view = LatticeView::new(&[0b0010_0101], dims).unwrap();
        let ups: Vec<Position> = view
            .iter()
            .filter(|(_, s)| s.is_up())
            .map(|(p, _)| p)
            .collect();
        assert_eq!(
            ups,
            vec![Position::new(0, 0), Position::new(2, 0), Position::new(2, 1)]
        );
    }
}
