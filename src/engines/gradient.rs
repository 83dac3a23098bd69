//! Gradient-filled silhouettes and the marble variant.

use super::{Engine, EngineResult, GenerationRequest, Outcome};
use crate::color::Hsl;
use crate::hashing::{hex_window, md5_hex};
use crate::options::{GradientType, Silhouette};
use crate::seed::SeedIdentity;
use crate::svg::{num, silhouette, Element, SvgDocument};
use crate::validation::MAX_COLOR_STOPS;

pub const DEFAULT_COLOR_STOPS: u32 = 3;
pub const DEFAULT_MARBLE_BLUR: u32 = 7;

/// Marble artwork is drawn on a fixed 80x80 canvas and scaled by the viewBox.
const MARBLE_CANVAS: u32 = 80;
const MARBLE_PATHS: [&str; 2] = [
    "M32.414 59.35L50.376 70.5H72.5v-71H33.728L26.5 13.381l19.057 27.08L32.414 59.35z",
    "M22.216 24L0 46.75l14.108 38.129L78 86l-3.081-59.276-22.378 4.005 12.972 20.186-23.35 27.395L22.215 24z",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct GradientEngine;

impl Engine for GradientEngine {
    fn name(&self) -> &str {
        "gradient"
    }

    fn generate(&self, request: &GenerationRequest<'_>) -> EngineResult {
        let options = request.options;
        let seed = SeedIdentity::new(request.seed);
        let shape = options.shape.unwrap_or_default();
        let kind = options.gradient_type.unwrap_or_default();

        if kind == GradientType::Marble {
            let blur = options.marble_blur.unwrap_or(DEFAULT_MARBLE_BLUR);
            return Ok(Outcome::Rendered(marble(&seed, request.size, shape, blur)));
        }

        let count = options
            .color_stops
            .unwrap_or(DEFAULT_COLOR_STOPS)
            .clamp(1, MAX_COLOR_STOPS);
        let stops = gradient_stops(seed.base_hsl(), count);
        let id = gradient_id(request.seed, kind);

        let mut doc = SvgDocument::new(request.size).with_prolog();
        doc.push(&Element::new("defs").children(gradient(kind, &id, &stops).render()));
        doc.push(
            &silhouette(shape, request.size, options.rotation.unwrap_or(0))
                .attr("fill", format!("url(#{id})")),
        );
        Ok(Outcome::Rendered(doc.finish()))
    }
}

/// A colour stop; `offset` is a percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub offset: f64,
    pub color: String,
}

/// `count` stops sweeping ±30° around the base hue, dark to light.
pub fn gradient_stops(base: Hsl, count: u32) -> Vec<Stop> {
    let span = f64::from(count.saturating_sub(1).max(1));
    (0..count)
        .map(|i| {
            let factor = f64::from(i) / span;
            let color = base
                .shifted(factor * 60.0 - 30.0)
                .with_lightness(0.3 + factor * 0.5)
                .with_saturation(0.6 + factor * 0.3);
            Stop {
                offset: factor * 100.0,
                color: color.to_hex(),
            }
        })
        .collect()
}

/// Insert a midpoint before every stop after the first, in that stop's colour.
pub fn wavy_stops(stops: &[Stop]) -> Vec<Stop> {
    let mut out = Vec::with_capacity(stops.len() * 2);
    for (i, stop) in stops.iter().enumerate() {
        if let Some(prev) = i.checked_sub(1).map(|p| &stops[p]) {
            out.push(Stop {
                offset: (prev.offset + stop.offset) / 2.0,
                color: stop.color.clone(),
            });
        }
        out.push(stop.clone());
    }
    out
}

pub fn gradient_id(seed: &str, kind: GradientType) -> String {
    let digest = md5_hex(format!("{seed}{}", kind.as_str()).as_bytes());
    format!("gradient-{}", &digest[..8])
}

fn gradient(kind: GradientType, id: &str, stops: &[Stop]) -> Element {
    match kind {
        GradientType::Vertical => linear(id, stops, (0, 0, 0, 100)),
        GradientType::Diagonal => linear(id, stops, (0, 0, 100, 100)),
        GradientType::Radial => Element::new("radialGradient")
            .attr("id", id)
            .attr("cx", "50%")
            .attr("cy", "50%")
            .attr("r", "50%")
            .children(render_stops(stops)),
        GradientType::Wavy => linear(id, &wavy_stops(stops), (0, 0, 100, 100)),
        GradientType::Horizontal | GradientType::Marble => linear(id, stops, (0, 0, 100, 0)),
    }
}

fn linear(id: &str, stops: &[Stop], (x1, y1, x2, y2): (u32, u32, u32, u32)) -> Element {
    Element::new("linearGradient")
        .attr("id", id)
        .attr("x1", format!("{x1}%"))
        .attr("y1", format!("{y1}%"))
        .attr("x2", format!("{x2}%"))
        .attr("y2", format!("{y2}%"))
        .children(render_stops(stops))
}

fn render_stops(stops: &[Stop]) -> String {
    let mut out = String::new();
    for stop in stops {
        Element::new("stop")
            .attr("offset", format!("{}%", num(stop.offset)))
            .attr("stop-color", &stop.color)
            .render_into(&mut out);
    }
    out
}

/// Placement of one marble path, read from raw hash windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MarbleTransform {
    dx: i64,
    dy: i64,
    rotate: u64,
    /// Scale in hundredths, 120..=149.
    scale: u64,
}

impl MarbleTransform {
    fn read(hash: &str, offsets: [usize; 4]) -> Self {
        let shift = |offset| (hex_window(hash, offset, 2) % 15) as i64 - 7;
        Self {
            dx: shift(offsets[0]),
            dy: shift(offsets[1]),
            rotate: hex_window(hash, offsets[2], 3) % 360,
            scale: 120 + hex_window(hash, offsets[3], 2) % 30,
        }
    }

    fn render(&self) -> String {
        let c = MARBLE_CANVAS / 2;
        format!(
            "translate({} {}) rotate({} {c} {c}) scale({})",
            self.dx,
            self.dy,
            self.rotate,
            one_decimal(self.scale)
        )
    }
}

/// Hundredths printed to one decimal place, rounding half up.
fn one_decimal(hundredths: u64) -> String {
    let tenths = (hundredths + 5) / 10;
    format!("{}.{}", tenths / 10, tenths % 10)
}

fn marble_colors(base: Hsl) -> [String; 3] {
    [
        base.to_hex(),
        base.shifted(90.0).with_saturation(0.7).with_lightness(0.5).to_hex(),
        base.shifted(180.0).with_saturation(0.75).with_lightness(0.6).to_hex(),
    ]
}

fn marble(seed: &SeedIdentity, size: u32, shape: Silhouette, blur: u32) -> String {
    let hash = seed.hash();
    let mask_id = format!("mask-{}", &hash[..8]);
    let filter_id = format!("filter-{}", &hash[..8]);
    let colors = marble_colors(seed.base_hsl());
    let transforms = [
        MarbleTransform::read(hash, [0, 2, 4, 7]),
        MarbleTransform::read(hash, [9, 11, 13, 16]),
    ];
    let rx = match shape {
        Silhouette::Circle => 160,
        Silhouette::Square => 0,
        Silhouette::Hexagon => 8,
    };

    let mut doc = SvgDocument::new(size)
        .view_box(format!("0 0 {MARBLE_CANVAS} {MARBLE_CANVAS}"))
        .with_prolog()
        .attr("fill", "none")
        .attr("role", "img");

    doc.push(
        &Element::new("mask")
            .attr("id", &mask_id)
            .attr("maskUnits", "userSpaceOnUse")
            .attr("x", 0)
            .attr("y", 0)
            .attr("width", MARBLE_CANVAS)
            .attr("height", MARBLE_CANVAS)
            .children(
                Element::new("rect")
                    .attr("width", MARBLE_CANVAS)
                    .attr("height", MARBLE_CANVAS)
                    .attr("rx", rx)
                    .attr("fill", "#FFFFFF")
                    .render(),
            ),
    );

    let mut layers = Element::new("rect")
        .attr("width", MARBLE_CANVAS)
        .attr("height", MARBLE_CANVAS)
        .attr("fill", &colors[0])
        .render();
    for (i, (path, transform)) in MARBLE_PATHS.iter().zip(&transforms).enumerate() {
        let mut element = Element::new("path").attr("filter", format!("url(#{filter_id})"));
        if i == 1 {
            element = element.style("mix-blend-mode", "overlay");
        }
        element
            .attr("d", path)
            .attr("fill", &colors[i + 1])
            .attr("transform", transform.render())
            .render_into(&mut layers);
    }
    doc.push(
        &Element::new("g")
            .attr("mask", format!("url(#{mask_id})"))
            .children(layers),
    );

    let filter = Element::new("filter")
        .attr("id", &filter_id)
        .attr("filterUnits", "userSpaceOnUse")
        .attr("color-interpolation-filters", "sRGB")
        .children(
            [
                Element::new("feFlood")
                    .attr("flood-opacity", 0)
                    .attr("result", "BackgroundImageFix"),
                Element::new("feBlend")
                    .attr("in", "SourceGraphic")
                    .attr("in2", "BackgroundImageFix")
                    .attr("result", "shape"),
                Element::new("feGaussianBlur")
                    .attr("stdDeviation", blur)
                    .attr("result", "effect1_foregroundBlur"),
            ]
            .iter()
            .map(Element::render)
            .collect(),
        );
    doc.push(&Element::new("defs").children(filter.render()));
    doc.finish()
}
