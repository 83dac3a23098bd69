//! Initials on a tinted silhouette.

use super::{Engine, EngineResult, GenerationRequest, Outcome};
use crate::seed::SeedIdentity;
use crate::svg::{silhouette, Element, SvgDocument};

pub const DEFAULT_FOREGROUND_LIGHTNESS: f64 = 0.35;
pub const DEFAULT_BACKGROUND_LIGHTNESS: f64 = 0.8;
pub const DEFAULT_FONT_WEIGHT: &str = "normal";
pub const DEFAULT_FONT_FAMILY: &str = "Segoe UI, Helvetica, sans-serif";

#[derive(Debug, Clone, Copy, Default)]
pub struct InitialsEngine;

impl Engine for InitialsEngine {
    fn name(&self) -> &str {
        "initials"
    }

    fn generate(&self, request: &GenerationRequest<'_>) -> EngineResult {
        let options = request.options;
        let identity = SeedIdentity::new(request.name.unwrap_or(request.seed));
        let initials = identity.initials();
        if initials.is_empty() {
            return Ok(Outcome::Declined);
        }

        let base = identity.base_hsl();
        let background = base.with_lightness(
            options
                .background_lightness
                .unwrap_or(DEFAULT_BACKGROUND_LIGHTNESS),
        );
        let foreground = base.with_lightness(
            options
                .foreground_lightness
                .unwrap_or(DEFAULT_FOREGROUND_LIGHTNESS),
        );
        let font_size = options
            .font_size
            .unwrap_or_else(|| font_size(request.size, &initials));

        let mut doc = SvgDocument::new(request.size);
        doc.push(
            &silhouette(
                options.shape.unwrap_or_default(),
                request.size,
                options.rotation.unwrap_or(0),
            )
            .style("fill", background),
        );
        doc.push(
            &Element::new("text")
                .attr("x", "50%")
                .attr("y", "55%")
                .style("fill", foreground)
                .style("text-anchor", "middle")
                .style("dominant-baseline", "middle")
                .style(
                    "font-weight",
                    options.font_weight.as_deref().unwrap_or(DEFAULT_FONT_WEIGHT),
                )
                .style(
                    "font-family",
                    options.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY),
                )
                .style("font-size", format!("{font_size}px"))
                .text(&initials),
        );
        Ok(Outcome::Rendered(doc.finish()))
    }
}

/// Font size that shrinks as the number of letters grows.
pub fn font_size(size: u32, initials: &str) -> u32 {
    let len = initials.chars().count() as f64;
    (f64::from(size) * (0.5 - (0.5 * len - 1.0).sin() / 5.0)) as u32
}
