//! Raster Conversion - SVG To PNG, JPEG And WebP
//!
//! Rasterizing is a collaborator behind [`RasterConverter`]. With the
//! `raster` feature enabled, [`ResvgConverter`] renders through `resvg` and
//! encodes with `tiny-skia` (PNG) or `image` (JPEG, WebP).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("content is not SVG markup")]
    NotSvg,

    #[error("failed to decode data URI: {0}")]
    Decode(String),

    #[error("failed to parse SVG: {0}")]
    Parse(String),

    #[error("failed to render SVG: {0}")]
    Render(String),

    #[error("failed to encode {format}: {message}")]
    Encode { format: RasterFormat, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterFormat {
    Png,
    Jpeg,
    Webp,
}

impl RasterFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Webp => "webp",
        }
    }

    /// PNG compression level 9, otherwise quality 90.
    pub fn default_quality(self) -> u8 {
        match self {
            Self::Png => 9,
            Self::Jpeg | Self::Webp => 90,
        }
    }
}

impl FromStr for RasterFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "webp" => Ok(Self::Webp),
            _ => Err(ValidationError::UnknownVariant {
                field: "format",
                value: s.to_string(),
                expected: "png, jpeg, webp",
            }),
        }
    }
}

impl fmt::Display for RasterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Turns SVG markup into encoded raster bytes.
pub trait RasterConverter {
    fn convert(
        &self,
        svg: &str,
        format: RasterFormat,
        width: u32,
        height: u32,
        quality: u8,
    ) -> Result<Vec<u8>, ConvertError>;
}

#[cfg(feature = "raster")]
pub use self::resvg_backend::ResvgConverter;

#[cfg(feature = "raster")]
mod resvg_backend {
    use std::io::Cursor;

    use image::codecs::jpeg::JpegEncoder;
    use image::codecs::webp::WebPEncoder;
    use image::{ExtendedColorType, ImageEncoder};
    use resvg::tiny_skia::{Pixmap, Transform};
    use resvg::usvg;

    use super::{ConvertError, RasterConverter, RasterFormat};

    /// Renders with `resvg`, system fonts loaded once at construction.
    pub struct ResvgConverter {
        options: usvg::Options<'static>,
    }

    impl ResvgConverter {
        pub fn new() -> Self {
            let mut options = usvg::Options::default();
            options.fontdb_mut().load_system_fonts();
            tracing::debug!(faces = options.fontdb.len(), "loaded system fonts for rasterizing");
            Self { options }
        }

        fn render(&self, svg: &str, width: u32, height: u32) -> Result<Pixmap, ConvertError> {
            if width == 0 || height == 0 {
                return Err(ConvertError::Render(format!(
                    "image dimensions must be at least 1x1 pixels, got {width}x{height}"
                )));
            }
            let tree = usvg::Tree::from_str(svg, &self.options)
                .map_err(|e| ConvertError::Parse(e.to_string()))?;
            let mut pixmap = Pixmap::new(width, height)
                .ok_or_else(|| ConvertError::Render("failed to allocate pixmap".into()))?;

            let sx = width as f32 / tree.size().width();
            let sy = height as f32 / tree.size().height();
            resvg::render(&tree, Transform::from_scale(sx, sy), &mut pixmap.as_mut());
            Ok(pixmap)
        }
    }

    impl Default for ResvgConverter {
        fn default() -> Self {
            Self::new()
        }
    }

    impl std::fmt::Debug for ResvgConverter {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("ResvgConverter").finish_non_exhaustive()
        }
    }

    impl RasterConverter for ResvgConverter {
        fn convert(
            &self,
            svg: &str,
            format: RasterFormat,
            width: u32,
            height: u32,
            quality: u8,
        ) -> Result<Vec<u8>, ConvertError> {
            let pixmap = self.render(svg, width, height)?;
            let encode_err = |message: String| ConvertError::Encode { format, message };

            match format {
                RasterFormat::Png => pixmap.encode_png().map_err(|e| encode_err(e.to_string())),
                RasterFormat::Jpeg => {
                    // JPEG has no alpha; composite the premultiplied pixels over white.
                    let rgb: Vec<u8> = pixmap
                        .data()
                        .chunks_exact(4)
                        .flat_map(|px| {
                            let cover = 255 - px[3];
                            [
                                px[0].saturating_add(cover),
                                px[1].saturating_add(cover),
                                px[2].saturating_add(cover),
                            ]
                        })
                        .collect();
                    let mut out = Cursor::new(Vec::new());
                    JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
                        .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
                        .map_err(|e| encode_err(e.to_string()))?;
                    Ok(out.into_inner())
                }
                RasterFormat::Webp => {
                    let rgba: Vec<u8> = pixmap
                        .pixels()
                        .iter()
                        .flat_map(|px| {
                            let c = px.demultiply();
                            [c.red(), c.green(), c.blue(), c.alpha()]
                        })
                        .collect();
                    let mut out = Vec::new();
                    WebPEncoder::new_lossless(&mut out)
                        .write_image(&rgba, width, height, ExtendedColorType::Rgba8)
                        .map_err(|e| encode_err(e.to_string()))?;
                    Ok(out)
                }
            }
        }
    }
}
