//! Bauhaus-style geometric composition.
//!
//! The composition is a tinted background, a rotated bar, a circle and a long
//! diagonal stroke. Extra shapes beyond the core four are triangles,
//! hexagons, small circles or small squares. Shape `k` reads its parameters
//! from value-from-hash indices `5k..5k+5`.

use super::{Engine, EngineResult, GenerationRequest, Outcome};
use crate::hashing::{hex_window, value_from_hash};
use crate::seed::SeedIdentity;
use crate::svg::{num, Element, SvgDocument};
use crate::validation::MAX_SHAPES;

pub const DEFAULT_NUM_SHAPES: u32 = 4;

/// Background, bar, circle and line.
const CORE_SHAPES: u32 = 4;

/// Value-from-hash indices consumed per shape.
const BLOCK: usize = 5;

const PALETTES: [[&str; 5]; 4] = [
    // warm
    ["#e63946", "#f4a261", "#e9c46a", "#264653", "#2a9d8f"],
    // cool
    ["#1d3557", "#457b9d", "#a8dadc", "#e76f51", "#06d6a0"],
    // primary
    ["#d62828", "#003049", "#fcbf49", "#f77f00", "#1b1b1e"],
    // earth
    ["#606c38", "#283618", "#dda15e", "#bc6c25", "#9b2226"],
];

const EXTRA_OPACITY: f64 = 0.85;

#[derive(Debug, Clone, Copy, Default)]
pub struct BauhausEngine;

impl Engine for BauhausEngine {
    fn name(&self) -> &str {
        "bauhaus"
    }

    fn generate(&self, request: &GenerationRequest<'_>) -> EngineResult {
        let seed = SeedIdentity::new(request.seed);
        let num_shapes = request
            .options
            .num_shapes
            .unwrap_or(DEFAULT_NUM_SHAPES)
            .min(MAX_SHAPES);
        let composer = Composer::new(&seed, request.size);

        let base = seed.base_hsl();
        let background = base
            .with_saturation(base.saturation.min(0.35))
            .with_lightness(0.92);

        let mut group = String::new();
        Element::new("rect")
            .attr("x", 0)
            .attr("y", 0)
            .attr("width", request.size)
            .attr("height", request.size)
            .style("fill", background)
            .render_into(&mut group);

        composer.bar(0).render_into(&mut group);
        composer.circle(1).render_into(&mut group);
        composer.line(2).render_into(&mut group);
        for k in 0..num_shapes.saturating_sub(CORE_SHAPES) as usize {
            composer.extra(3 + k).render_into(&mut group);
        }

        let mut doc = SvgDocument::new(request.size);
        doc.push(&Element::new("g").children(group));
        Ok(Outcome::Rendered(doc.finish()))
    }
}

/// Palette chosen by the first hash byte.
pub fn palette_for(hash: &str) -> &'static [&'static str; 5] {
    &PALETTES[(hex_window(hash, 0, 2) % PALETTES.len() as u64) as usize]
}

/// Parameters of one shape, read from a contiguous block of hash indices.
#[derive(Debug, Clone, Copy)]
struct Block {
    base: usize,
}

struct Composer<'a> {
    hash: &'a str,
    size: f64,
    palette: &'static [&'static str; 5],
}

impl<'a> Composer<'a> {
    fn new(seed: &'a SeedIdentity, size: u32) -> Self {
        Self {
            hash: seed.hash(),
            size: f64::from(size),
            palette: palette_for(seed.hash()),
        }
    }

    fn block(&self, k: usize) -> Block {
        Block { base: k * BLOCK }
    }

    /// Value `slot` (0..5) of a block, scaled into `[min, max]` of the canvas.
    fn value(&self, block: Block, slot: usize, min: f64, max: f64) -> f64 {
        round2(value_from_hash(self.hash, block.base + slot, min, max))
    }

    fn color(&self, k: usize) -> &'static str {
        self.palette[k % self.palette.len()]
    }

    fn center(&self) -> f64 {
        self.size / 2.0
    }

    /// `translate(..) rotate(.. cx cy)` around the canvas centre.
    fn centred_transform(&self, block: Block, rotation: f64) -> String {
        let shift = self.size * 0.2;
        let tx = self.value(block, 2, -shift, shift);
        let ty = self.value(block, 3, -shift, shift);
        let c = num(self.center());
        format!("translate({} {}) rotate({} {c} {c})", num(tx), num(ty), num(rotation))
    }

    fn bar(&self, k: usize) -> Element {
        let block = self.block(k);
        let width = self.value(block, 0, self.size * 0.45, self.size * 0.85);
        let height = self.value(block, 1, self.size * 0.08, self.size * 0.22);
        let rotation = self.value(block, 4, 0.0, 360.0);
        Element::new("rect")
            .attr("x", num(round2(self.center() - width / 2.0)))
            .attr("y", num(round2(self.center() - height / 2.0)))
            .attr("width", num(width))
            .attr("height", num(height))
            .attr("transform", self.centred_transform(block, rotation))
            .style("fill", self.color(k))
    }

    fn circle(&self, k: usize) -> Element {
        let block = self.block(k);
        let radius = self.value(block, 0, self.size * 0.12, self.size * 0.3);
        let rotation = self.value(block, 4, 0.0, 360.0);
        let c = num(self.center());
        Element::new("circle")
            .attr("cx", &c)
            .attr("cy", &c)
            .attr("r", num(radius))
            .attr("transform", self.centred_transform(block, rotation))
            .style("fill", self.color(k))
    }

    fn line(&self, k: usize) -> Element {
        let block = self.block(k);
        let stroke = self.value(block, 0, self.size * 0.03, self.size * 0.08);
        let length = self.value(block, 1, self.size * 0.9, self.size * 1.4);
        // Diagonal: 30..60 or 120..150 degrees.
        let tilt = self.value(block, 4, 0.0, 60.0);
        let rotation = round2(if tilt < 30.0 { 30.0 + tilt } else { 90.0 + tilt });
        let c = self.center();
        Element::new("line")
            .attr("x1", num(round2(c - length / 2.0)))
            .attr("y1", num(c))
            .attr("x2", num(round2(c + length / 2.0)))
            .attr("y2", num(c))
            .attr("transform", self.centred_transform(block, rotation))
            .style("stroke", self.color(k))
            .style("stroke-width", num(stroke))
            .style("stroke-linecap", "round")
    }

    /// Small shape drawn around the origin and translated into place.
    fn extra(&self, k: usize) -> Element {
        let block = self.block(k);
        let kind = (value_from_hash(self.hash, block.base, 0.0, 4.0) as usize).min(3);
        let radius = self.value(block, 1, self.size * 0.06, self.size * 0.18);
        let x = self.value(block, 2, self.size * 0.1, self.size * 0.9);
        let y = self.value(block, 3, self.size * 0.1, self.size * 0.9);
        let rotation = self.value(block, 4, 0.0, 360.0);

        let element = match kind {
            0 => Element::new("polygon").attr("points", polygon_points(3, radius)),
            1 => Element::new("polygon").attr("points", polygon_points(6, radius)),
            2 => Element::new("circle")
                .attr("cx", 0)
                .attr("cy", 0)
                .attr("r", num(round2(radius * 0.6))),
            _ => Element::new("rect")
                .attr("x", num(round2(-radius / 2.0)))
                .attr("y", num(round2(-radius / 2.0)))
                .attr("width", num(radius))
                .attr("height", num(radius)),
        };

        element
            .attr(
                "transform",
                format!("translate({} {}) rotate({})", num(x), num(y), num(rotation)),
            )
            .style("fill", self.color(k))
            .style("fill-opacity", EXTRA_OPACITY)
    }
}

/// Regular polygon with `sides` vertices on a circle of `radius` around the origin.
fn polygon_points(sides: u32, radius: f64) -> String {
    (0..sides)
        .map(|i| {
            let angle = std::f64::consts::TAU * f64::from(i) / f64::from(sides)
                - std::f64::consts::FRAC_PI_2;
            format!(
                "{},{}",
                num(round2(radius * angle.cos())),
                num(round2(radius * angle.sin()))
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::EngineOptions;

    fn render(seed: &str, size: u32, num_shapes: Option<u32>) -> String {
        let options = EngineOptions {
            num_shapes,
            ..Default::default()
        };
        BauhausEngine
            .generate(&GenerationRequest::new(seed, None, size, &options))
            .unwrap()
            .into_content()
            .unwrap()
    }

    #[test]
    fn test_core_ensemble() {
        let svg = render("test-seed", 200, None);
        assert!(svg.contains(r#"width="200""#));
        assert!(svg.contains(r#"height="200""#));
        assert!(svg.contains("<rect"));
        assert!(svg.contains("<circle"));
        assert!(svg.contains("<line"));
        assert!(svg.contains("stroke-width"));
    }

    #[test]
    fn test_unvalidated_shape_count_is_capped() {
        assert_eq!(
            render("test-seed", 200, Some(u32::MAX)),
            render("test-seed", 200, Some(MAX_SHAPES))
        );
        assert_eq!(render("test-seed", 200, Some(0)), render("test-seed", 200, Some(4)));
    }

    #[test]
    fn test_single_group_wraps_composition() {
        let svg = render("test-seed", 200, Some(10));
        assert_eq!(svg.matches("<g>").count(), 1);
        assert!(svg.contains("><g><rect"));
        assert!(svg.ends_with("</g></svg>"));
    }

    #[test]
    fn test_shapes_are_transformed() {
        let svg = render("test-seed", 200, None);
        assert!(svg.contains("transform="));
        assert!(svg.contains("rotate("));
        assert!(svg.contains("translate("));
    }

    #[test]
    fn test_extra_shapes() {
        let core = render("test-seed", 200, Some(4));
        let many = render("test-seed", 200, Some(10));
        assert_ne!(core, many);
        assert_eq!(core, render("test-seed", 200, None));
        assert_eq!(many.matches("transform=").count(), 3 + 6);

        let shapes = many.matches("<polygon").count()
            + many.matches("<circle").count()
            + many.matches("<rect").count();
        assert!(shapes > 5);
    }

    #[test]
    fn test_fewer_than_core_still_renders_core() {
        let svg = render("test-seed", 200, Some(1));
        assert!(svg.contains("<circle"));
        assert!(svg.contains("<line"));
    }

    #[test]
    fn test_palette_colors_used() {
        let seed = SeedIdentity::new("test-seed");
        let palette = palette_for(seed.hash());
        let svg = render("test-seed", 200, None);
        assert!(svg.contains(palette[0]));
        assert!(svg.contains(palette[1]));
        assert!(svg.contains(palette[2]));
    }

    #[test]
    fn test_deterministic_and_seed_sensitive() {
        assert_eq!(render("test-seed", 200, None), render("test-seed", 200, None));
        assert_ne!(render("seed1", 200, None), render("seed2", 200, None));
    }

    #[test]
    fn test_scales_with_size() {
        let svg = render("test-seed", 400, None);
        assert!(svg.contains(r#"width="400""#));
        assert!(svg.contains("rotate("));
        assert!(svg.contains(" 200 200)"));
    }

    #[test]
    fn test_polygon_points() {
        assert_eq!(polygon_points(3, 10.0).split(' ').count(), 3);
        assert!(polygon_points(3, 10.0).starts_with("0,-10"));
        assert_eq!(polygon_points(6, 10.0).split(' ').count(), 6);
    }
}
