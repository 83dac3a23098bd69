//! ForgeAvatars Core - Deterministic Avatar Compiler
//!
//! # The Rules
//! 1. Same Seed, Same Bytes
//! 2. Decline Is Not Failure
//! 3. Validation Happens At The Setter
//! 4. Fallbacks Run In Order
//! 5. The Network Is A Collaborator

pub mod builder;
pub mod color;
pub mod convert;
pub mod engines;
pub mod fetch;
pub mod hashing;
pub mod options;
pub mod output;
pub mod seed;
pub mod svg;
pub mod validation;

pub use builder::{AttemptFailure, AvatarBuilder, AvatarError, AvatarSubject, FailureReason};
pub use convert::{ConvertError, RasterConverter, RasterFormat};
pub use engines::{Engine, EngineError, EngineKind, GenerationRequest, Outcome};
pub use fetch::{default_fetcher, OfflineFetch, RemoteFetch};
pub use hashing::{md5_hex, value_from_hash};
pub use options::{AvatarConfig, EngineOptions, GradientType, Silhouette};
pub use output::{HttpResponse, RenderedImage};
pub use seed::SeedIdentity;
pub use validation::ValidationError;

#[cfg(feature = "raster")]
pub use convert::ResvgConverter;
#[cfg(feature = "http")]
pub use fetch::UreqFetch;

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
