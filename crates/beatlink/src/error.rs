//! Unified error type for Beatlink.

use beatlink_derive::DeriveError;
use beatlink_link::LinkError;
use beatlink_protocol::CodecError;

/// Top-level error that wraps every crate-specific error.
///
/// The `#[from]` attributes let `?` lift sub-crate errors into this one,
/// so application code handles a single type.
#[derive(Debug, thiserror::Error)]
pub enum BeatlinkError {
    /// Encoding or decoding a sequence string failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Building or following a link failed.
    #[error(transparent)]
    Link(#[from] LinkError),

    /// A position or letter lookup failed.
    #[error(transparent)]
    Derive(#[from] DeriveError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_codec_error() {
        let err = CodecError::InvalidEncoding("empty input".into());
        let beatlink_err: BeatlinkError = err.into();
        assert!(matches!(beatlink_err, BeatlinkError::Codec(_)));
        assert!(beatlink_err.to_string().contains("empty input"));
    }

    #[test]
    fn test_from_link_error() {
        let err = LinkError::UnknownModuleMapping("settings".into());
        let beatlink_err: BeatlinkError = err.into();
        assert!(matches!(beatlink_err, BeatlinkError::Link(_)));
        assert!(beatlink_err.to_string().contains("settings"));
    }

    #[test]
    fn test_from_derive_error() {
        let err = DeriveError::LookupFailed("offline".into());
        let beatlink_err: BeatlinkError = err.into();
        assert!(matches!(beatlink_err, BeatlinkError::Derive(_)));
    }

    #[test]
    fn test_codec_error_through_link_keeps_message() {
        let err = LinkError::from(CodecError::DecompressionFailure("bad lz4".into()));
        let beatlink_err = BeatlinkError::from(err);
        assert!(beatlink_err.to_string().contains("bad lz4"));
    }
}
