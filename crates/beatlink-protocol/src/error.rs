//! Error types for the protocol layer.
//!
//! Each crate in Beatlink defines its own error enum. A `CodecError` always
//! means the problem is in the wire format itself: a corrupt or forged
//! share string, a compressed payload that won't restore, or a motion
//! that can't be represented on the wire.

/// Errors that can occur while encoding or decoding sequence strings.
///
/// `#[derive(thiserror::Error)]` generates the `std::error::Error` impl.
/// The `#[error("...")]` attributes define what shows up in logs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The encoded string is structurally wrong.
    ///
    /// Malformed tokens, wrong colon counts, unknown codes, a motion token
    /// that is too short. Decode never guesses a default for these: a
    /// share link that doesn't parse is rejected as a whole.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    /// A `z:`-tagged payload could not be restored.
    ///
    /// Covers bad base64, a truncated LZ4 block, and output that isn't
    /// valid UTF-8 or is empty.
    #[error("decompression failed: {0}")]
    DecompressionFailure(String),

    /// A motion field has no entry in the code tables.
    ///
    /// Only raised on the encode path, where it is caught and logged: the
    /// motion is dropped from the token and the rest of the sequence still
    /// encodes.
    #[error("motion field `{field}` has no wire code")]
    MotionFieldMissing {
        /// Which field failed the lookup (e.g. `"prop_type"`).
        field: &'static str,
    },
}

impl CodecError {
    /// Shorthand for building an [`CodecError::InvalidEncoding`].
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidEncoding(msg.into())
    }
}
