//! Single-colour identicon grid.

use tracing::instrument;

use super::matrix::PixelMatrix;
use super::{Engine, EngineResult, GenerationRequest, Outcome};
use crate::seed::SeedIdentity;
use crate::svg::{num, Element, SvgDocument};
use crate::validation::MAX_PIXELS;

pub const DEFAULT_PIXELS: u32 = 5;
pub const DEFAULT_FOREGROUND_LIGHTNESS: f64 = 0.5;
pub const DEFAULT_BACKGROUND_LIGHTNESS: f64 = 0.9;

#[derive(Debug, Clone, Copy, Default)]
pub struct PixelEngine;

impl Engine for PixelEngine {
    fn name(&self) -> &str {
        "pixel"
    }

    #[instrument(level = "trace", skip_all, fields(size = request.size))]
    fn generate(&self, request: &GenerationRequest<'_>) -> EngineResult {
        let options = request.options;
        let seed = SeedIdentity::new(request.seed);
        let pixels = options
            .pixels
            .unwrap_or(DEFAULT_PIXELS)
            .clamp(1, MAX_PIXELS);
        let symmetric = options.symmetry.unwrap_or(true);
        let base = seed.base_hsl();

        let matrix = PixelMatrix::new(&seed, pixels as usize, symmetric);
        let mut doc = SvgDocument::new(request.size);

        if options.background.unwrap_or(true) {
            let lightness = options
                .background_lightness
                .unwrap_or(DEFAULT_BACKGROUND_LIGHTNESS);
            doc.push(
                &Element::new("rect")
                    .attr("x", 0)
                    .attr("y", 0)
                    .attr("width", request.size)
                    .attr("height", request.size)
                    .style("fill", base.with_lightness(lightness)),
            );
        }

        let fill = base
            .with_lightness(
                options
                    .foreground_lightness
                    .unwrap_or(DEFAULT_FOREGROUND_LIGHTNESS),
            )
            .to_hex();
        let cell = f64::from(request.size) / f64::from(pixels);

        for (x, y) in matrix.filled() {
            doc.push(&cell_rect(x, y, cell).style("fill", &fill));
        }

        Ok(Outcome::Rendered(doc.finish()))
    }
}

/// Square grid cell at `(x, y)`; the origin is truncated to whole pixels.
pub(crate) fn cell_rect(x: usize, y: usize, cell: f64) -> Element {
    Element::new("rect")
        .attr("x", (x as f64 * cell) as i64)
        .attr("y", (y as f64 * cell) as i64)
        .attr("width", num(cell))
        .attr("height", num(cell))
}
