//! DiceBear HTTP API delegate.

use std::fmt;
use std::sync::Arc;

use url::Url;

use super::{Engine, EngineResult, GenerationRequest, Outcome};
use crate::fetch::RemoteFetch;
use crate::options::EngineOptions;

pub const DICEBEAR_BASE: &str = "https://api.dicebear.com/9.x";
pub const DEFAULT_STYLE: &str = "avataaars";

pub struct DiceBearEngine {
    fetcher: Arc<dyn RemoteFetch>,
}

impl DiceBearEngine {
    pub fn new(fetcher: Arc<dyn RemoteFetch>) -> Self {
        Self { fetcher }
    }
}

impl fmt::Debug for DiceBearEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiceBearEngine").finish_non_exhaustive()
    }
}

/// `{base}/{style}/svg?seed=..&size=..[&backgroundColor=..][&radius=..]`
///
/// The style is always a single escaped path segment under the base.
pub fn request_url(seed: &str, size: u32, options: &EngineOptions) -> Result<Url, url::ParseError> {
    let style = options.style.as_deref().unwrap_or(DEFAULT_STYLE);
    let mut url = Url::parse(DICEBEAR_BASE)?;
    url.path_segments_mut()
        .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .push(style)
        .push("svg");
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("seed", seed)
            .append_pair("size", &size.to_string());
        if let Some(colors) = &options.background_color {
            let colors = colors
                .iter()
                .map(|c| c.trim_start_matches('#'))
                .collect::<Vec<_>>()
                .join(",");
            query.append_pair("backgroundColor", &colors);
        }
        if let Some(radius) = options.radius {
            query.append_pair("radius", &radius.to_string());
        }
    }
    Ok(url)
}

impl Engine for DiceBearEngine {
    fn name(&self) -> &str {
        "dicebear"
    }

    fn generate(&self, request: &GenerationRequest<'_>) -> EngineResult {
        let url = request_url(request.seed, request.size, request.options)?;
        match self.fetcher.fetch(&url) {
            Some(body) => Ok(Outcome::Rendered(String::from_utf8(body)?)),
            None => {
                tracing::debug!(%url, "dicebear fetch returned nothing");
                Ok(Outcome::Declined)
            }
        }
    }
}
