//! Share URLs and deep-link parsing.
//!
//! Two link shapes carry a sequence:
//!
//! ```text
//! share:  {origin}/?open={module}:{encoded}
//! viewer: {origin}/sequence/{percent-encoded}
//! ```
//!
//! `encoded` is the output of the compression wrapper, so it is either a
//! raw sequence string or a `z:`-tagged compressed one. Both alphabets
//! are query-safe, which is why the share form embeds it unescaped. The
//! module and the payload are split on the *first* colon only; the
//! payload itself is full of colons.
//!
//! Parsing never fails loudly. A missing or broken deep link is a normal
//! state (most page loads don't have one), so the public parsers return
//! `Option` and log at debug level.

use beatlink_protocol::{
    SequenceData, decode_with_compression, encode, encode_with_compression,
};
use serde::Serialize;
use url::Url;
use url::form_urlencoded;

use crate::{LinkConfig, LinkError, ModuleTarget, resolve_module};

/// Query parameter that carries a deep link.
pub const OPEN_PARAM: &str = "open";

/// Path prefix of standalone viewer links.
pub const VIEWER_PATH: &str = "/sequence/";

/// Per-link encoding choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareOptions {
    /// Try the compressed encoding (kept only if shorter).
    pub compress: bool,
}

impl Default for ShareOptions {
    fn default() -> Self {
        Self { compress: true }
    }
}

fn encode_payload(sequence: &SequenceData, options: ShareOptions) -> String {
    if options.compress {
        encode_with_compression(sequence)
    } else {
        encode(sequence)
    }
}

// ---------------------------------------------------------------------------
// LinkBuilder
// ---------------------------------------------------------------------------

/// Builds share and viewer URLs against a fixed origin.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    origin: Url,
    options: ShareOptions,
}

impl LinkBuilder {
    /// Creates a builder from config.
    ///
    /// # Errors
    /// [`LinkError::InvalidOrigin`] if `config.origin` isn't usable.
    pub fn new(config: &LinkConfig) -> Result<Self, LinkError> {
        Ok(Self {
            origin: config.origin_url()?,
            options: ShareOptions {
                compress: config.compress,
            },
        })
    }

    /// The origin links are built against (always ends in `/`).
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Encoding options used by [`share_url`](Self::share_url) and
    /// [`viewer_url`](Self::viewer_url).
    pub fn options(&self) -> ShareOptions {
        self.options
    }

    /// Share URL with the configured options.
    ///
    /// # Errors
    /// See [`generate_share_url`].
    pub fn share_url(
        &self,
        sequence: &SequenceData,
        module: &str,
    ) -> Result<String, LinkError> {
        generate_share_url(&self.origin, sequence, module, self.options)
    }

    /// Viewer URL with the configured options.
    pub fn viewer_url(&self, sequence: &SequenceData) -> String {
        generate_viewer_url(&self.origin, sequence, self.options)
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Builds `{origin}/?open={module}:{encoded}`.
///
/// # Errors
/// [`LinkError::MalformedLink`] if `module` is empty or contains anything
/// other than ASCII letters, digits, `-` or `_`.
pub fn generate_share_url(
    origin: &Url,
    sequence: &SequenceData,
    module: &str,
    options: ShareOptions,
) -> Result<String, LinkError> {
    if !is_valid_module_name(module) {
        return Err(LinkError::MalformedLink(format!(
            "module name {module:?} is not URL-safe"
        )));
    }
    let payload = encode_payload(sequence, options);

    let mut url = origin.clone();
    url.set_path("/");
    url.set_query(Some(&format!("{OPEN_PARAM}={module}:{payload}")));
    url.set_fragment(None);
    Ok(url.into())
}

/// Builds `{origin}/sequence/{percent-encoded}`.
pub fn generate_viewer_url(
    origin: &Url,
    sequence: &SequenceData,
    options: ShareOptions,
) -> String {
    let payload = encode_payload(sequence, options);
    // Escapes everything but alphanumerics and `*-._`, like
    // encodeURIComponent minus a few marks.
    let escaped: String = form_urlencoded::byte_serialize(payload.as_bytes()).collect();

    let mut url = origin.clone();
    url.set_path(&format!("{VIEWER_PATH}{escaped}"));
    url.set_query(None);
    url.set_fragment(None);
    url.into()
}

fn is_valid_module_name(module: &str) -> bool {
    !module.is_empty()
        && module
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// A deep link split into module and payload, not yet decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDeepLink {
    pub module: String,
    pub payload: String,
}

impl RawDeepLink {
    /// Extracts `open={module}:{payload}` from a URL or bare query string.
    ///
    /// Accepts full URLs, paths with a query (`/?open=...`), and bare
    /// queries (`?open=...` or `open=...`). Anything after `#` is
    /// ignored.
    ///
    /// # Errors
    /// [`LinkError::MalformedLink`] if there's no `open` parameter, no
    /// colon, or an empty module or payload.
    pub fn parse(input: &str) -> Result<Self, LinkError> {
        let without_fragment = input.split('#').next().unwrap_or_default();
        let query = without_fragment
            .split_once('?')
            .map_or(without_fragment, |(_, q)| q);

        let value = form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == OPEN_PARAM)
            .map(|(_, value)| value.into_owned())
            .ok_or_else(|| {
                LinkError::MalformedLink(format!("no `{OPEN_PARAM}` parameter"))
            })?;

        let (module, payload) = value.split_once(':').ok_or_else(|| {
            LinkError::MalformedLink(format!("{OPEN_PARAM} value has no colon"))
        })?;
        if module.is_empty() || payload.is_empty() {
            return Err(LinkError::MalformedLink(
                "empty module or payload".into(),
            ));
        }
        Ok(Self {
            module: module.to_string(),
            payload: payload.to_string(),
        })
    }

    /// Decompresses and decodes the payload.
    ///
    /// # Errors
    /// [`LinkError::Codec`] if the payload doesn't decode.
    pub fn decode(self) -> Result<DeepLink, LinkError> {
        let sequence = decode_with_compression(&self.payload)?;
        Ok(DeepLink {
            module: self.module,
            sequence,
        })
    }
}

/// A decoded deep link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeepLink {
    pub module: String,
    pub sequence: SequenceData,
}

impl DeepLink {
    /// Resolves the module alias to a navigation target.
    ///
    /// # Errors
    /// [`LinkError::UnknownModuleMapping`] for an unknown alias.
    pub fn target(&self) -> Result<ModuleTarget, LinkError> {
        resolve_module(&self.module)
    }
}

/// Parses and decodes a deep link.
///
/// Returns `None` if there is no `open` parameter or it doesn't decode.
pub fn parse_deep_link(input: &str) -> Option<DeepLink> {
    let parsed = RawDeepLink::parse(input).and_then(RawDeepLink::decode);
    match parsed {
        Ok(link) => Some(link),
        Err(e) => {
            tracing::debug!(error = %e, "no usable deep link");
            None
        }
    }
}

/// Parses a deep link and resolves its module in one step.
///
/// An unknown module alias is logged as a warning and the link is
/// ignored, the same as a malformed one.
pub fn open_deep_link(input: &str) -> Option<(ModuleTarget, DeepLink)> {
    let link = parse_deep_link(input)?;
    match link.target() {
        Ok(target) => {
            tracing::info!(
                module = %link.module,
                destination = target.destination(),
                beats = link.sequence.total_beats(),
                "opening deep link"
            );
            Some((target, link))
        }
        Err(e) => {
            tracing::warn!(error = %e, "ignoring deep link");
            None
        }
    }
}

/// Parses a `/sequence/{encoded}` viewer URL or path.
///
/// Returns `None` if the path doesn't match or the payload doesn't
/// decode.
pub fn parse_viewer_url(input: &str) -> Option<SequenceData> {
    let path = match Url::parse(input) {
        Ok(url) => url.path().to_string(),
        Err(_) => input.split(['?', '#']).next().unwrap_or_default().to_string(),
    };
    let escaped = path
        .find(VIEWER_PATH)
        .map(|at| &path[at + VIEWER_PATH.len()..])
        .filter(|rest| !rest.is_empty() && !rest.contains('/'))?;

    // `byte_serialize` escaped every `=`, `&` and `+`, so the whole
    // segment comes back as a single key with no value.
    let payload = form_urlencoded::parse(escaped.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())?;

    match decode_with_compression(&payload) {
        Ok(sequence) => Some(sequence),
        Err(e) => {
            tracing::debug!(error = %e, "viewer link did not decode");
            None
        }
    }
}
