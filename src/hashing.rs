//! Hashing System - Digests and Value-From-Hash
//!
//! Every visual parameter is read out of a hex digest. Nothing here may
//! touch time, randomness or global state: same input, same bits.

use md5::Md5;
use sha2::{Digest, Sha256};

/// Width of the hex windows read by [`value_from_hash`].
const VALUE_WINDOW: usize = 4;

/// Maximum value representable in a [`VALUE_WINDOW`]-digit window.
const VALUE_WINDOW_MAX: f64 = 65535.0;

/// Compute MD5 hash of bytes, return lowercase hex string
pub fn md5_hex(data: &[u8]) -> String {
    hex::encode(Md5::digest(data))
}

/// Compute SHA-256 hash of bytes, return lowercase hex string
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Read `width` hex digits of `hash` starting at `offset` as an integer.
///
/// Windows that run past the end of the hash, or that contain non-hex
/// characters, read as zero.
pub fn hex_window(hash: &str, offset: usize, width: usize) -> u64 {
    hash.get(offset..offset + width)
        .and_then(|window| u64::from_str_radix(window, 16).ok())
        .unwrap_or(0)
}

/// Map a single hex digit to a pixel bit.
///
/// The digit value is divided by ten and rounded half-up: `0..=4` yields
/// `false`, `5..=f` yields `true`.
pub fn hex_digit_bit(c: char) -> bool {
    let value = c.to_digit(16).unwrap_or(0);
    (f64::from(value) / 10.0).round() != 0.0
}

/// Bit for the hash character at `index`, wrapping around the hash.
pub fn bit_at(hash: &str, index: usize) -> bool {
    let bytes = hash.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    hex_digit_bit(char::from(bytes[index % bytes.len()]))
}

/// Deterministically derive a float in `[min, max]` from `hash` at `index`.
///
/// Two 16-bit windows at prime-strided offsets are XOR-mixed so that
/// neighbouring indices do not read overlapping digits.
pub fn value_from_hash(hash: &str, index: usize, min: f64, max: f64) -> f64 {
    let usable = hash.len().saturating_sub(VALUE_WINDOW).max(1);
    let offset1 = index.wrapping_mul(11) % usable;
    let offset2 = index.wrapping_mul(17).wrapping_add(7) % usable;

    let value = hex_window(hash, offset1, VALUE_WINDOW) ^ hex_window(hash, offset2, VALUE_WINDOW);
    let normalized = (value as f64 / VALUE_WINDOW_MAX).clamp(0.0, 1.0);

    min + normalized * (max - min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_known_vectors() {
        assert_eq!(md5_hex(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(md5_hex(b"abc"), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hash_deterministic() {
        let data = b"test data";
        assert_eq!(md5_hex(data), md5_hex(data));
        assert_eq!(sha256_hex(data), sha256_hex(data));
    }

    #[test]
    fn test_hex_digit_bit_rounds_half_up() {
        for c in ['0', '1', '2', '3', '4'] {
            assert!(!hex_digit_bit(c), "{c} should be off");
        }
        for c in ['5', '6', '9', 'a', 'e', 'f'] {
            assert!(hex_digit_bit(c), "{c} should be on");
        }
    }

    #[test]
    fn test_hex_window_out_of_range_is_zero() {
        assert_eq!(hex_window("ff", 0, 2), 255);
        assert_eq!(hex_window("ff", 1, 2), 0);
        assert_eq!(hex_window("zz", 0, 2), 0);
    }

    #[test]
    fn test_value_from_hash_in_range_and_stable() {
        let hash = md5_hex(b"test-seed");
        for index in 0..64 {
            let v = value_from_hash(&hash, index, 10.0, 20.0);
            assert!((10.0..=20.0).contains(&v));
            assert_eq!(v.to_bits(), value_from_hash(&hash, index, 10.0, 20.0).to_bits());
        }
    }

    #[test]
    fn test_value_from_hash_known_values() {
        let hash = md5_hex(b"test-seed");
        assert_eq!(hash, "bfe71b97a2d8a474b15445d05efa6c45");

        // Index 3 XORs the windows at offsets 5 and 2: 0xb97a ^ 0xe71b = 0x5e61.
        assert_eq!(value_from_hash(&hash, 3, 0.0, 1.0), 24161.0 / 65535.0);
        assert_eq!(value_from_hash(&hash, 3, 0.0, 1.0), 0.36867322804608227);
        assert_eq!(value_from_hash(&hash, 0, 10.0, 20.0), 17.726253147173267);
        assert_eq!(value_from_hash(&hash, 7, 0.0, 1.0), 0.162905317769131);
    }

    #[test]
    fn test_value_from_hash_varies_with_index() {
        let hash = md5_hex(b"test-seed");
        let values: Vec<u64> = (0..16)
            .map(|i| value_from_hash(&hash, i, 0.0, 1.0).to_bits())
            .collect();
        let mut distinct = values.clone();
        distinct.sort_unstable();
        distinct.dedup();
        assert!(distinct.len() > 8);
    }

    #[test]
    fn test_value_from_hash_short_hash_does_not_panic() {
        assert_eq!(value_from_hash("", 3, 1.0, 2.0), 1.0);
        let v = value_from_hash("abc", 3, 0.0, 1.0);
        assert!((0.0..=1.0).contains(&v));
    }
}
