//! Link configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::LinkError;

/// Settings for building and consuming links.
///
/// Defaults are usable as-is for local tools; applications override
/// `origin` with their public address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Scheme + host (+ optional port) that share links point at.
    pub origin: String,

    /// How long a pending deep link stays usable after it is stored.
    /// Older links are treated as absent.
    pub stale_after: Duration,

    /// Quiet period before an in-progress edit is re-encoded into the
    /// address bar.
    pub debounce: Duration,

    /// Whether generated links try the compressed encoding.
    pub compress: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            origin: "https://app.example.com".to_string(),
            stale_after: Duration::from_secs(10),
            debounce: Duration::from_millis(500),
            compress: true,
        }
    }
}

impl LinkConfig {
    /// Parses `origin` as an absolute URL, dropping any path, query, or
    /// fragment that came along with it.
    ///
    /// # Errors
    /// [`LinkError::InvalidOrigin`] if it doesn't parse or can't carry a
    /// path (e.g. `mailto:`).
    pub fn origin_url(&self) -> Result<Url, LinkError> {
        let mut url = Url::parse(self.origin.trim())
            .map_err(|_| LinkError::InvalidOrigin(self.origin.clone()))?;
        if url.cannot_be_a_base() {
            return Err(LinkError::InvalidOrigin(self.origin.clone()));
        }
        url.set_path("/");
        url.set_query(None);
        url.set_fragment(None);
        Ok(url)
    }

    /// Normalizes `origin` to `scheme://host[:port]` with no trailing
    /// slash, rejecting it if it isn't a usable absolute URL.
    ///
    /// # Errors
    /// See [`origin_url`](Self::origin_url).
    pub fn validated(mut self) -> Result<Self, LinkError> {
        let url = self.origin_url()?;
        self.origin = url.as_str().trim_end_matches('/').to_string();
        Ok(self)
    }
}
