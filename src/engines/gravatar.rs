//! Gravatar URL builder. The content is a link, not markup.

use url::Url;

use super::{Engine, EngineResult, GenerationRequest, Outcome};
use crate::hashing::md5_hex;

pub const GRAVATAR_BASE: &str = "https://www.gravatar.com/avatar/";
pub const URI_LIST_CONTENT_TYPE: &str = "text/uri-list";
pub const DEFAULT_IMAGE: &str = "mp";
pub const DEFAULT_RATING: &str = "g";

#[derive(Debug, Clone, Copy, Default)]
pub struct GravatarEngine;

impl Engine for GravatarEngine {
    fn name(&self) -> &str {
        "gravatar"
    }

    fn content_type(&self) -> &'static str {
        URI_LIST_CONTENT_TYPE
    }

    fn generate(&self, request: &GenerationRequest<'_>) -> EngineResult {
        let options = request.options;
        let email_hash = md5_hex(request.seed.trim().to_lowercase().as_bytes());

        let mut url = Url::parse(GRAVATAR_BASE)?.join(&email_hash)?;
        url.query_pairs_mut()
            .append_pair("d", options.default_image.as_deref().unwrap_or(DEFAULT_IMAGE))
            .append_pair("r", options.rating.as_deref().unwrap_or(DEFAULT_RATING))
            .append_pair("s", &request.size.to_string());

        Ok(Outcome::Rendered(url.into()))
    }
}
