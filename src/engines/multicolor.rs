//! Identicon grid painted from an analogous palette.

use std::f64::consts::PI;

use super::matrix::PixelMatrix;
use super::pixel::{cell_rect, DEFAULT_PIXELS};
use super::{Engine, EngineResult, GenerationRequest, Outcome};
use crate::color::Hsl;
use crate::hashing::{hex_window, md5_hex};
use crate::seed::SeedIdentity;
use crate::svg::SvgDocument;
use crate::validation::{MAX_COLORS, MAX_PIXELS};

pub const DEFAULT_NUM_COLORS: u32 = 5;

#[derive(Debug, Clone, Copy, Default)]
pub struct MultiColorPixelEngine;

impl Engine for MultiColorPixelEngine {
    fn name(&self) -> &str {
        "multicolor-pixel"
    }

    fn generate(&self, request: &GenerationRequest<'_>) -> EngineResult {
        let options = request.options;
        let seed = SeedIdentity::new(request.seed);
        let pixels = options.pixels.unwrap_or(DEFAULT_PIXELS).clamp(1, MAX_PIXELS) as usize;
        let num_colors = options
            .num_colors
            .unwrap_or(DEFAULT_NUM_COLORS)
            .clamp(1, MAX_COLORS);

        let palette: Vec<String> = palette(seed.base_hsl(), num_colors)
            .into_iter()
            .map(Hsl::to_hex)
            .collect();
        let cell = f64::from(request.size) / pixels as f64;
        let mut doc = SvgDocument::new(request.size);

        let mut paint = |x: usize, y: usize| {
            let color = &palette[color_index(seed.hash(), x, y, palette.len())];
            doc.push(&cell_rect(x, y, cell).style("fill", color));
        };

        if options.fill_all.unwrap_or(true) {
            for y in 0..pixels {
                for x in 0..pixels {
                    paint(x, y);
                }
            }
        } else {
            let matrix = PixelMatrix::new(&seed, pixels, options.symmetry.unwrap_or(true));
            for (x, y) in matrix.filled() {
                paint(x, y);
            }
        }

        Ok(Outcome::Rendered(doc.finish()))
    }
}

/// `count` colours spread over ±30° of the base hue, lightness ramping
/// from 0.35 to 0.70 and saturation peaking mid-palette.
pub fn palette(base: Hsl, count: u32) -> Vec<Hsl> {
    let span = f64::from(count.saturating_sub(1).max(1));
    (0..count)
        .map(|i| {
            let factor = f64::from(i) / span;
            base.shifted(factor * 60.0 - 30.0)
                .with_lightness(0.35 + factor * 0.35)
                .with_saturation(0.6 + (factor * PI).sin() * 0.2)
        })
        .collect()
}

/// Palette slot for a grid position, from `md5(hash + (x * 100 + y))`.
pub fn color_index(hash: &str, x: usize, y: usize, count: usize) -> usize {
    let position = x * 100 + y;
    let digest = md5_hex(format!("{hash}{position}").as_bytes());
    (hex_window(&digest, 0, 8) % count.max(1) as u64) as usize
}
