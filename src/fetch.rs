//! Remote Fetch - Pluggable HTTP GET for delegated engines
//!
//! Only the DiceBear engine talks to the network. It does so through
//! [`RemoteFetch`], so hosts can plug in their own client and tests can stay
//! offline. A fetch that fails for any reason yields `None`.

use std::sync::Arc;

use url::Url;

/// Blocking GET returning the response body, or `None` on any failure.
pub trait RemoteFetch: Send + Sync {
    fn fetch(&self, url: &Url) -> Option<Vec<u8>>;
}

/// Never reaches the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineFetch;

impl RemoteFetch for OfflineFetch {
    fn fetch(&self, url: &Url) -> Option<Vec<u8>> {
        tracing::trace!(%url, "offline fetcher skipping request");
        None
    }
}

#[cfg(feature = "http")]
pub use self::http::UreqFetch;

#[cfg(feature = "http")]
mod http {
    use std::io::Read;
    use std::time::Duration;

    use url::Url;

    use super::RemoteFetch;

    pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

    /// Upper bound on a delegated avatar body.
    const MAX_BODY_BYTES: u64 = 4 * 1024 * 1024;

    /// `ureq` agent with connect and read timeouts.
    pub struct UreqFetch {
        agent: ureq::Agent,
    }

    impl UreqFetch {
        pub fn new() -> Self {
            Self::with_timeout(FETCH_TIMEOUT)
        }

        pub fn with_timeout(timeout: Duration) -> Self {
            let agent = ureq::AgentBuilder::new()
                .timeout_connect(timeout)
                .timeout_read(timeout)
                .user_agent(&format!("forgeavatars/{}", env!("CARGO_PKG_VERSION")))
                .build();
            Self { agent }
        }
    }

    impl Default for UreqFetch {
        fn default() -> Self {
            Self::new()
        }
    }

    impl std::fmt::Debug for UreqFetch {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("UreqFetch").finish_non_exhaustive()
        }
    }

    impl RemoteFetch for UreqFetch {
        fn fetch(&self, url: &Url) -> Option<Vec<u8>> {
            let response = match self.agent.get(url.as_str()).call() {
                Ok(response) if (200..=299).contains(&response.status()) => response,
                Ok(response) => {
                    tracing::debug!(%url, status = response.status(), "remote fetch returned non-success status");
                    return None;
                }
                Err(ureq::Error::Status(code, _)) => {
                    tracing::debug!(%url, status = code, "remote fetch failed with http status");
                    return None;
                }
                Err(ureq::Error::Transport(err)) => {
                    tracing::debug!(%url, error = %err, "remote fetch transport error");
                    return None;
                }
            };

            let mut body = Vec::new();
            if let Err(err) = response
                .into_reader()
                .take(MAX_BODY_BYTES)
                .read_to_end(&mut body)
            {
                tracing::debug!(%url, error = %err, "remote fetch body read failed");
                return None;
            }
            Some(body)
        }
    }
}

/// The network-backed fetcher when the `http` feature is enabled, otherwise [`OfflineFetch`].
pub fn default_fetcher() -> Arc<dyn RemoteFetch> {
    #[cfg(feature = "http")]
    {
        Arc::new(UreqFetch::new())
    }
    #[cfg(not(feature = "http"))]
    {
        Arc::new(OfflineFetch)
    }
}
