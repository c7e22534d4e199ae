//! Error types for the deep-link layer.

use beatlink_protocol::CodecError;

/// Errors that can occur while building or following links.
///
/// Parsing entry points ([`parse_deep_link`](crate::parse_deep_link) and
/// friends) don't surface these: a bad deep link is logged and treated as
/// absent. They show up in the lower-level APIs for callers that want to
/// know why.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// The deep link names a module alias the table doesn't know.
    #[error("no module mapping for alias {0:?}")]
    UnknownModuleMapping(String),

    /// The link is structurally wrong (missing `open`, no colon, bad
    /// module name, ...).
    #[error("malformed link: {0}")]
    MalformedLink(String),

    /// The configured origin isn't an absolute URL.
    #[error("invalid origin {0:?}")]
    InvalidOrigin(String),

    /// The embedded sequence failed to decode.
    #[error(transparent)]
    Codec(#[from] CodecError),
}
