//! Seed identity
//!
//! Wraps the raw seed or display name together with its digest. Every
//! colour and initial an engine draws comes from here.

use crate::color::{Hsl, Rgb};
use crate::hashing::md5_hex;

/// Number of hex digits read for a base colour.
const COLOR_DIGITS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedIdentity {
    raw: String,
    hash: String,
    name_parts: Vec<String>,
}

impl SeedIdentity {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let hash = md5_hex(raw.as_bytes());
        let name_parts = raw.split_whitespace().map(str::to_owned).collect();
        Self { raw, hash, name_parts }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// 32-character lowercase hex digest of the raw input.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn name_parts(&self) -> &[String] {
        &self.name_parts
    }

    /// First character of every name part, upper-cased.
    ///
    /// Operates on Unicode scalars, so `"Müller Öztürk"` yields `"MÖ"`.
    pub fn initials(&self) -> String {
        self.name_parts
            .iter()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Base colour read from six hash digits at `offset`.
    ///
    /// Offsets past the last full window are clamped to it.
    pub fn base_color(&self, offset: usize) -> Rgb {
        let offset = offset.min(self.hash.len() - COLOR_DIGITS);
        self.hash
            .get(offset..offset + COLOR_DIGITS)
            .and_then(Rgb::from_hex)
            .unwrap_or(Rgb::new(0, 0, 0))
    }

    /// [`base_color`](Self::base_color) at offset zero, in HSL.
    pub fn base_hsl(&self) -> Hsl {
        self.base_color(0).to_hsl()
    }
}
