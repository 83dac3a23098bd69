//! Boolean pixel grids derived from a seed hash.

use crate::hashing::{bit_at, sha256_hex};
use crate::seed::SeedIdentity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMatrix {
    side: usize,
    cells: Vec<bool>,
}

impl PixelMatrix {
    pub fn new(seed: &SeedIdentity, side: usize, symmetric: bool) -> Self {
        if symmetric {
            Self::symmetric(seed, side)
        } else {
            Self::scattered(seed, side)
        }
    }

    /// Left half (plus the middle column for odd sides) read row by row
    /// from the seed hash and mirrored onto the right half.
    pub fn symmetric(seed: &SeedIdentity, side: usize) -> Self {
        let mut cells = vec![false; side * side];
        let half = side.div_ceil(2);
        for y in 0..side {
            for x in 0..half {
                let on = bit_at(seed.hash(), y * side + x);
                cells[y * side + x] = on;
                cells[y * side + (side - 1 - x)] = on;
            }
        }
        Self { side, cells }
    }

    /// Independent cells, column-major, read from a SHA-256 of the seed hash.
    pub fn scattered(seed: &SeedIdentity, side: usize) -> Self {
        let source = sha256_hex(seed.hash().as_bytes());
        let mut cells = vec![false; side * side];
        for i in 0..side * side {
            let (row, col) = (i % side, i / side);
            cells[row * side + col] = bit_at(&source, i);
        }
        Self { side, cells }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.side && y < self.side && self.cells[y * self.side + x]
    }

    /// Coordinates of filled cells, row by row.
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(move |(i, _)| (i % self.side, i / self.side))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_is_mirrored() {
        for side in [1, 2, 5, 6, 9] {
            let m = PixelMatrix::symmetric(&SeedIdentity::new("test-seed"), side);
            for y in 0..side {
                for x in 0..side {
                    assert_eq!(m.get(x, y), m.get(side - 1 - x, y), "side {side} ({x},{y})");
                }
            }
        }
    }

    #[test]
    fn test_symmetric_reads_hash_digits() {
        let seed = SeedIdentity::new("test-seed");
        let m = PixelMatrix::symmetric(&seed, 5);
        let expected = crate::hashing::hex_digit_bit(seed.hash().chars().next().unwrap());
        assert_eq!(m.get(0, 0), expected);
        assert_eq!(m.get(4, 0), expected);
    }

    #[test]
    fn test_scattered_differs_from_symmetric() {
        let seed = SeedIdentity::new("test-seed");
        assert_ne!(PixelMatrix::symmetric(&seed, 8), PixelMatrix::scattered(&seed, 8));
    }

    #[test]
    fn test_deterministic() {
        let a = PixelMatrix::new(&SeedIdentity::new("abc"), 7, false);
        let b = PixelMatrix::new(&SeedIdentity::new("abc"), 7, false);
        assert_eq!(a, b);
    }

    #[test]
    fn test_filled_matches_get() {
        let m = PixelMatrix::symmetric(&SeedIdentity::new("seed1"), 5);
        let filled: Vec<_> = m.filled().collect();
        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(filled.contains(&(x, y)), m.get(x, y));
            }
        }
        assert!(!m.get(5, 0));
    }
}
