//! Generation Engines
//!
//! Each engine turns a [`GenerationRequest`] into markup (or a URL), or
//! declines. Engines are stateless apart from injected collaborators, so
//! the same request always yields the same bytes.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::fetch::RemoteFetch;
use crate::options::EngineOptions;
use crate::AvatarError;

pub mod bauhaus;
pub mod dicebear;
pub mod gradient;
pub mod gravatar;
pub mod initials;
pub mod matrix;
pub mod multicolor;
pub mod pixel;

pub use bauhaus::BauhausEngine;
pub use dicebear::DiceBearEngine;
pub use gradient::GradientEngine;
pub use gravatar::GravatarEngine;
pub use initials::InitialsEngine;
pub use multicolor::MultiColorPixelEngine;
pub use pixel::PixelEngine;

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// Everything an engine is allowed to look at.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub seed: &'a str,
    pub name: Option<&'a str>,
    pub size: u32,
    pub options: &'a EngineOptions,
}

impl<'a> GenerationRequest<'a> {
    pub fn new(seed: &'a str, name: Option<&'a str>, size: u32, options: &'a EngineOptions) -> Self {
        Self {
            seed,
            name,
            size,
            options,
        }
    }
}

/// Successful engine result. Hard failures travel as [`EngineError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Rendered(String),
    /// Not applicable to this input; the next fallback should run.
    Declined,
}

impl Outcome {
    pub fn into_content(self) -> Option<String> {
        match self {
            Self::Rendered(content) => Some(content),
            Self::Declined => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("remote response is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("invalid remote URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("render error: {0}")]
    Render(String),
}

impl EngineError {
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

pub type EngineResult = Result<Outcome, EngineError>;

/// A single avatar generation strategy.
pub trait Engine: Send + Sync {
    /// Identifier recorded in failure logs.
    fn name(&self) -> &str;

    fn content_type(&self) -> &'static str {
        SVG_CONTENT_TYPE
    }

    fn generate(&self, request: &GenerationRequest<'_>) -> EngineResult;
}

/// The closed set of built-in engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    Pixel,
    MultiColorPixel,
    Bauhaus,
    Gradient,
    Gravatar,
    DiceBear,
    Initials,
}

impl EngineKind {
    pub const ALL: [EngineKind; 7] = [
        Self::Pixel,
        Self::MultiColorPixel,
        Self::Bauhaus,
        Self::Gradient,
        Self::Gravatar,
        Self::DiceBear,
        Self::Initials,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Pixel => "pixel",
            Self::MultiColorPixel => "multicolor-pixel",
            Self::Bauhaus => "bauhaus",
            Self::Gradient => "gradient",
            Self::Gravatar => "gravatar",
            Self::DiceBear => "dicebear",
            Self::Initials => "initials",
        }
    }

    /// Instantiate the engine. Only DiceBear uses the fetcher.
    pub fn build(self, fetcher: &Arc<dyn RemoteFetch>) -> Box<dyn Engine> {
        match self {
            Self::Pixel => Box::new(PixelEngine),
            Self::MultiColorPixel => Box::new(MultiColorPixelEngine),
            Self::Bauhaus => Box::new(BauhausEngine),
            Self::Gradient => Box::new(GradientEngine),
            Self::Gravatar => Box::new(GravatarEngine),
            Self::DiceBear => Box::new(DiceBearEngine::new(Arc::clone(fetcher))),
            Self::Initials => Box::new(InitialsEngine),
        }
    }
}

impl FromStr for EngineKind {
    type Err = AvatarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| AvatarError::UnknownEngine(s.to_string()))
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
