//! Engine Options - Typed Configuration
//!
//! Every field is optional; `None` means "use the engine default". Records
//! deserialised from JSON go through [`EngineOptions::validate`] before use.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationError};

/// Outer shape an engine fills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Silhouette {
    #[default]
    Circle,
    Square,
    Hexagon,
}

impl Silhouette {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Square => "square",
            Self::Hexagon => "hexagon",
        }
    }
}

impl FromStr for Silhouette {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(Self::Circle),
            "square" => Ok(Self::Square),
            "hexagon" => Ok(Self::Hexagon),
            _ => Err(ValidationError::UnknownVariant {
                field: "shape",
                value: s.to_string(),
                expected: "circle, square, hexagon",
            }),
        }
    }
}

impl fmt::Display for Silhouette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientType {
    #[default]
    Horizontal,
    Vertical,
    Diagonal,
    Radial,
    Wavy,
    Marble,
}

impl GradientType {
    pub const ALL: [GradientType; 6] = [
        Self::Horizontal,
        Self::Vertical,
        Self::Diagonal,
        Self::Radial,
        Self::Wavy,
        Self::Marble,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Diagonal => "diagonal",
            Self::Radial => "radial",
            Self::Wavy => "wavy",
            Self::Marble => "marble",
        }
    }
}

impl FromStr for GradientType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| ValidationError::UnknownVariant {
                field: "gradientType",
                value: s.to_string(),
                expected: "horizontal, vertical, diagonal, radial, wavy, marble",
            })
    }
}

impl fmt::Display for GradientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-engine options. Engines ignore fields that do not apply to them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct EngineOptions {
    // pixel grids
    pub pixels: Option<u32>,
    pub symmetry: Option<bool>,
    pub background: Option<bool>,
    pub fill_all: Option<bool>,
    pub num_colors: Option<u32>,

    // shared lightness pair (pixel, initials)
    pub foreground_lightness: Option<f64>,
    pub background_lightness: Option<f64>,

    // bauhaus
    pub num_shapes: Option<u32>,

    // gradient
    pub gradient_type: Option<GradientType>,
    pub color_stops: Option<u32>,
    pub marble_blur: Option<u32>,

    // silhouettes (gradient, initials)
    pub shape: Option<Silhouette>,
    pub rotation: Option<i32>,

    // initials
    pub font_size: Option<u32>,
    pub font_weight: Option<String>,
    pub font_family: Option<String>,

    // dicebear
    pub style: Option<String>,
    pub background_color: Option<Vec<String>>,
    pub radius: Option<i32>,

    // gravatar
    pub default_image: Option<String>,
    pub rating: Option<String>,
}

impl EngineOptions {
    /// Apply the same range checks the builder setters enforce.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(v) = self.foreground_lightness {
            validation::lightness("foregroundLightness", v)?;
        }
        if let Some(v) = self.background_lightness {
            validation::lightness("backgroundLightness", v)?;
        }

        let counts = [
            ("pixels", self.pixels, validation::MAX_PIXELS),
            ("numColors", self.num_colors, validation::MAX_COLORS),
            ("numShapes", self.num_shapes, validation::MAX_SHAPES),
            ("colorStops", self.color_stops, validation::MAX_COLOR_STOPS),
        ];
        for (field, value, max) in counts {
            if let Some(v) = value {
                validation::count(field, v, max)?;
            }
        }
        if let Some(v) = self.font_size {
            validation::positive("fontSize", v)?;
        }

        if let Some(v) = self.radius {
            validation::non_negative("radius", v)?;
        }
        Ok(())
    }

    /// Parse and validate a JSON options record.
    pub fn from_json(json: &str) -> Result<Self, crate::AvatarError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }
}

fn default_size() -> u32 {
    200
}

/// Serializable description of a whole generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarConfig {
    pub engine: String,
    #[serde(default)]
    pub fallbacks: Vec<String>,
    #[serde(default)]
    pub seed: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub options: EngineOptions,
}

impl AvatarConfig {
    pub fn new(engine: impl Into<String>) -> Self {
        Self {
            engine: engine.into(),
            fallbacks: vec![],
            seed: None,
            name: None,
            size: default_size(),
            debug: false,
            options: EngineOptions::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, crate::AvatarError> {
        Ok(serde_json::from_str(json)?)
    }
}
