//! Avatar Builder - Fluent Configuration And Fallback Chain
//!
//! The builder collects configuration, resolves engine names through
//! [`EngineKind`] and tries each engine in order. The first engine that
//! renders wins. Declines and failures are recorded in try order and are
//! surfaced only when every engine is exhausted, unless debug mode asks for
//! the first failure to be returned as is.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::engines::{Engine, EngineError, EngineKind, GenerationRequest, Outcome};
use crate::fetch::{default_fetcher, RemoteFetch};
use crate::options::{AvatarConfig, EngineOptions, GradientType, Silhouette};
use crate::output::RenderedImage;
use crate::validation::{self, ValidationError};

pub const DEFAULT_SIZE: u32 = 200;

#[derive(Debug, Error)]
pub enum AvatarError {
    #[error("Unknown engine: {0}")]
    UnknownEngine(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No engine specified. Use engine() or try_engine() to set an engine.")]
    NoEngine,

    #[error("Engine '{engine}' failed to generate avatar: {source}")]
    EngineFailed {
        engine: String,
        #[source]
        source: Arc<EngineError>,
    },

    #[error("All avatar engines failed to generate an avatar. Tried: {}", tried(.0))]
    AllEnginesFailed(Vec<AttemptFailure>),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

fn tried(failures: &[AttemptFailure]) -> String {
    failures
        .iter()
        .map(|f| f.engine.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl AvatarError {
    /// Attempt log carried by [`AvatarError::AllEnginesFailed`].
    pub fn failures(&self) -> &[AttemptFailure] {
        match self {
            Self::AllEnginesFailed(failures) => failures,
            _ => &[],
        }
    }

    /// Multi-line, one entry per engine.
    pub fn summary(&self) -> String {
        match self {
            Self::AllEnginesFailed(failures) => {
                let mut summary = String::from("Avatar generation failed for all engines:\n");
                for failure in failures {
                    summary.push_str(&format!("  - {}: {}\n", failure.engine, failure.reason));
                }
                summary
            }
            other => other.to_string(),
        }
    }

    /// True for errors raised while configuring, before any engine ran.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownEngine(_) | Self::Validation(_) | Self::NoEngine | Self::Config(_)
        )
    }
}

/// One entry of the attempt log.
#[derive(Debug, Clone)]
pub struct AttemptFailure {
    pub engine: String,
    pub reason: FailureReason,
}

#[derive(Debug, Clone)]
pub enum FailureReason {
    Declined,
    Failed {
        message: String,
        cause: Arc<EngineError>,
    },
}

impl FailureReason {
    pub fn is_declined(&self) -> bool {
        matches!(self, Self::Declined)
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declined => f.write_str("declined"),
            Self::Failed { message, .. } => f.write_str(message),
        }
    }
}

/// Something with an email and optionally a display name, such as a user record.
pub trait AvatarSubject {
    fn email(&self) -> &str;

    fn display_name(&self) -> Option<&str> {
        None
    }
}

enum Candidate {
    Builtin(EngineKind),
    Custom(Box<dyn Engine>),
}

impl Candidate {
    fn name(&self) -> String {
        match self {
            Self::Builtin(kind) => kind.name().to_string(),
            Self::Custom(engine) => engine.name().to_string(),
        }
    }
}

pub struct AvatarBuilder {
    primary: Option<Candidate>,
    fallbacks: Vec<Candidate>,
    options: EngineOptions,
    seed: Option<String>,
    name: Option<String>,
    size: u32,
    debug: bool,
    fetcher: Arc<dyn RemoteFetch>,
    last_errors: Vec<AttemptFailure>,
}

impl Default for AvatarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AvatarBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvatarBuilder")
            .field("engines", &self.engine_names())
            .field("seed", &self.seed)
            .field("name", &self.name)
            .field("size", &self.size)
            .field("debug", &self.debug)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl AvatarBuilder {
    pub fn new() -> Self {
        Self {
            primary: None,
            fallbacks: Vec::new(),
            options: EngineOptions::default(),
            seed: None,
            name: None,
            size: DEFAULT_SIZE,
            debug: false,
            fetcher: default_fetcher(),
            last_errors: Vec::new(),
        }
    }

    /// Seed from the subject's email, name from its display name.
    pub fn for_subject<S: AvatarSubject + ?Sized>(subject: &S) -> Self {
        let mut builder = Self::new().seed(subject.email());
        if let Some(name) = subject.display_name() {
            builder = builder.name(name);
        }
        builder
    }

    /// Build from a config record, applying the setter validation.
    pub fn from_config(config: &AvatarConfig) -> Result<Self, AvatarError> {
        let mut builder = Self::new()
            .engine(&config.engine)?
            .size(config.size)?
            .debug(config.debug)
            .options(config.options.clone())?;
        for fallback in &config.fallbacks {
            builder = builder.fallback_to(fallback)?;
        }
        if let Some(seed) = &config.seed {
            builder = builder.seed(seed);
        }
        if let Some(name) = &config.name {
            builder = builder.name(name);
        }
        Ok(builder)
    }

    // ----- engine selection -----

    /// Set (or replace) the primary engine.
    pub fn engine(mut self, name: &str) -> Result<Self, AvatarError> {
        self.primary = Some(Candidate::Builtin(name.parse()?));
        Ok(self)
    }

    /// Primary if none is set yet, otherwise the next fallback.
    pub fn try_engine(self, name: &str) -> Result<Self, AvatarError> {
        let kind: EngineKind = name.parse()?;
        Ok(self.push_candidate(Candidate::Builtin(kind)))
    }

    pub fn fallback_to(mut self, name: &str) -> Result<Self, AvatarError> {
        self.fallbacks.push(Candidate::Builtin(name.parse()?));
        Ok(self)
    }

    /// Like [`try_engine`](Self::try_engine) for engines outside the registry.
    pub fn with_engine(self, engine: Box<dyn Engine>) -> Self {
        self.push_candidate(Candidate::Custom(engine))
    }

    fn push_candidate(mut self, candidate: Candidate) -> Self {
        if self.primary.is_none() {
            self.primary = Some(candidate);
        } else {
            self.fallbacks.push(candidate);
        }
        self
    }

    /// Names of the configured engines in try order.
    pub fn engine_names(&self) -> Vec<String> {
        self.primary
            .iter()
            .chain(&self.fallbacks)
            .map(Candidate::name)
            .collect()
    }

    // ----- identity and general settings -----

    pub fn seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn size(mut self, size: u32) -> Result<Self, AvatarError> {
        self.size = validation::size(size)?;
        Ok(self)
    }

    /// Return the first engine error instead of falling through.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn fetcher(mut self, fetcher: Arc<dyn RemoteFetch>) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Replace all options at once after validating them.
    pub fn options(mut self, options: EngineOptions) -> Result<Self, AvatarError> {
        options.validate()?;
        self.options = options;
        Ok(self)
    }

    pub fn engine_options(&self) -> &EngineOptions {
        &self.options
    }

    // ----- validated engine options -----

    pub fn foreground_lightness(mut self, lightness: f64) -> Result<Self, AvatarError> {
        self.options.foreground_lightness =
            Some(validation::lightness("foregroundLightness", lightness)?);
        Ok(self)
    }

    pub fn background_lightness(mut self, lightness: f64) -> Result<Self, AvatarError> {
        self.options.background_lightness =
            Some(validation::lightness("backgroundLightness", lightness)?);
        Ok(self)
    }

    pub fn pixels(mut self, pixels: u32) -> Result<Self, AvatarError> {
        self.options.pixels = Some(validation::count(
            "pixels",
            pixels,
            validation::MAX_PIXELS,
        )?);
        Ok(self)
    }

    pub fn num_colors(mut self, count: u32) -> Result<Self, AvatarError> {
        self.options.num_colors = Some(validation::count(
            "numColors",
            count,
            validation::MAX_COLORS,
        )?);
        Ok(self)
    }

    pub fn num_shapes(mut self, count: u32) -> Result<Self, AvatarError> {
        self.options.num_shapes = Some(validation::count(
            "numShapes",
            count,
            validation::MAX_SHAPES,
        )?);
        Ok(self)
    }

    pub fn color_stops(mut self, count: u32) -> Result<Self, AvatarError> {
        self.options.color_stops = Some(validation::count(
            "colorStops",
            count,
            validation::MAX_COLOR_STOPS,
        )?);
        Ok(self)
    }

    pub fn font_size(mut self, size: u32) -> Result<Self, AvatarError> {
        self.options.font_size = Some(validation::positive("fontSize", size)?);
        Ok(self)
    }

    pub fn radius(mut self, radius: i32) -> Result<Self, AvatarError> {
        self.options.radius = Some(validation::non_negative("radius", radius)?);
        Ok(self)
    }

    pub fn shape_name(self, shape: &str) -> Result<Self, AvatarError> {
        Ok(self.shape(shape.parse::<Silhouette>()?))
    }

    pub fn gradient_type_name(self, kind: &str) -> Result<Self, AvatarError> {
        Ok(self.gradient_type(kind.parse::<GradientType>()?))
    }

    // ----- typed engine options -----

    pub fn shape(mut self, shape: Silhouette) -> Self {
        self.options.shape = Some(shape);
        self
    }

    pub fn gradient_type(mut self, kind: GradientType) -> Self {
        self.options.gradient_type = Some(kind);
        self
    }

    pub fn symmetry(mut self, symmetry: bool) -> Self {
        self.options.symmetry = Some(symmetry);
        self
    }

    pub fn fill_all(mut self, fill_all: bool) -> Self {
        self.options.fill_all = Some(fill_all);
        self
    }

    /// Toggle the pixel engine's background square.
    pub fn background(mut self, background: bool) -> Self {
        self.options.background = Some(background);
        self
    }

    pub fn rotation(mut self, degrees: i32) -> Self {
        self.options.rotation = Some(degrees);
        self
    }

    pub fn marble_blur(mut self, blur: u32) -> Self {
        self.options.marble_blur = Some(blur);
        self
    }

    pub fn font_weight(mut self, weight: impl Into<String>) -> Self {
        self.options.font_weight = Some(weight.into());
        self
    }

    /// Shorthand for a `bold` or `normal` font weight.
    pub fn bold(self, bold: bool) -> Self {
        self.font_weight(if bold { "bold" } else { "normal" })
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.options.font_family = Some(family.into());
        self
    }

    /// DiceBear style name.
    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.options.style = Some(style.into());
        self
    }

    pub fn background_color<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.background_color = Some(colors.into_iter().map(Into::into).collect());
        self
    }

    /// Gravatar fallback image (`d` parameter).
    pub fn default_image(mut self, image: impl Into<String>) -> Self {
        self.options.default_image = Some(image.into());
        self
    }

    pub fn rating(mut self, rating: impl Into<String>) -> Self {
        self.options.rating = Some(rating.into());
        self
    }

    // ----- generation -----

    /// Try every configured engine in order and wrap the first rendered result.
    pub fn generate(&mut self) -> Result<RenderedImage, AvatarError> {
        self.last_errors.clear();
        let Some(primary) = &self.primary else {
            return Err(AvatarError::NoEngine);
        };

        let seed = self
            .seed
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default();
        let request = GenerationRequest::new(seed, self.name.as_deref(), self.size, &self.options);

        for candidate in std::iter::once(primary).chain(&self.fallbacks) {
            let built;
            let engine: &dyn Engine = match candidate {
                Candidate::Builtin(kind) => {
                    built = kind.build(&self.fetcher);
                    built.as_ref()
                }
                Candidate::Custom(engine) => engine.as_ref(),
            };
            let engine_name = engine.name().to_string();

            match engine.generate(&request) {
                Ok(Outcome::Rendered(content)) => {
                    tracing::debug!(engine = %engine_name, size = self.size, "avatar generated");
                    let mut image = RenderedImage::new(content, engine.content_type(), self.size);
                    if let Some(name) = &self.name {
                        image = image.with_display_name(name);
                    }
                    return Ok(image);
                }
                Ok(Outcome::Declined) => {
                    tracing::debug!(engine = %engine_name, "engine declined, trying next");
                    self.last_errors.push(AttemptFailure {
                        engine: engine_name,
                        reason: FailureReason::Declined,
                    });
                }
                Err(err) => {
                    tracing::warn!(engine = %engine_name, error = %err, "engine failed");
                    let cause = Arc::new(err);
                    self.last_errors.push(AttemptFailure {
                        engine: engine_name.clone(),
                        reason: FailureReason::Failed {
                            message: cause.to_string(),
                            cause: Arc::clone(&cause),
                        },
                    });
                    if self.debug {
                        return Err(AvatarError::EngineFailed {
                            engine: engine_name,
                            source: cause,
                        });
                    }
                }
            }
        }

        Err(AvatarError::AllEnginesFailed(self.last_errors.clone()))
    }

    /// Attempt log from the most recent [`generate`](Self::generate).
    pub fn last_errors(&self) -> &[AttemptFailure] {
        &self.last_errors
    }
}
