//! Optional compression pass over encoded sequence strings.
//!
//! Long sequences repeat the same motion fields over and over, so a
//! general-purpose compressor shrinks them well. Short ones don't
//! compress at all once base64 overhead is added. The wrapper therefore
//! compresses, compares, and only keeps the compressed form when it is
//! strictly shorter. Compressed strings carry a `z:` tag so decode can
//! tell the two apart:
//!
//! ```text
//! raw:        nneeiic1ps:|:|...
//! compressed: z:<base64url(lz4(raw))>
//! ```
//!
//! The tag can't be confused with an uncompressed string: a current-format
//! start token never begins with `z` (no location code does) and a legacy
//! prefix is all digits.
//!
//! Compression is behind the `compression` feature (enabled by default).
//! Without it, encode always returns the raw form and tagged input fails
//! with [`CodecError::DecompressionFailure`].

use crate::codec::{decode, encode};
use crate::types::SequenceData;
use crate::CodecError;

/// Prefix that marks a compressed payload.
pub const COMPRESSED_PREFIX: &str = "z:";

/// Largest decompressed size accepted from a payload's length header.
/// Payloads arrive in URLs, so the header is untrusted.
pub const MAX_DECOMPRESSED_LEN: usize = 1 << 20;

/// Encodes a sequence, compressing it only if that makes it shorter.
///
/// The result is never more than `encode(sequence).len()` bytes long.
pub fn encode_with_compression(sequence: &SequenceData) -> String {
    let raw = encode(sequence);
    match compress_str(&raw) {
        Some(packed) if COMPRESSED_PREFIX.len() + packed.len() < raw.len() => {
            tracing::debug!(
                raw_len = raw.len(),
                compressed_len = COMPRESSED_PREFIX.len() + packed.len(),
                "using compressed encoding"
            );
            format!("{COMPRESSED_PREFIX}{packed}")
        }
        _ => raw,
    }
}

/// Decodes a string produced by [`encode_with_compression`] (or plain
/// [`encode`]).
///
/// # Errors
/// - [`CodecError::DecompressionFailure`] if a `z:` payload can't be
///   restored.
/// - [`CodecError::InvalidEncoding`] from the sequence decoder.
pub fn decode_with_compression(
    encoded: &str,
) -> Result<SequenceData, CodecError> {
    match encoded.strip_prefix(COMPRESSED_PREFIX) {
        Some(payload) => {
            let raw = decompress_str(payload)?;
            decode(&raw)
        }
        None => decode(encoded),
    }
}

/// Compresses text to URL-safe base64 (no padding).
///
/// Returns `None` when compression support is compiled out.
#[cfg(feature = "compression")]
pub fn compress_str(text: &str) -> Option<String> {
    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    let packed = lz4_flex::compress_prepend_size(text.as_bytes());
    Some(URL_SAFE_NO_PAD.encode(packed))
}

#[cfg(not(feature = "compression"))]
pub fn compress_str(_text: &str) -> Option<String> {
    None
}

/// Reverses [`compress_str`].
///
/// # Errors
/// [`CodecError::DecompressionFailure`] for bad base64, a corrupt LZ4
/// block, non-UTF-8 output, or an empty result.
#[cfg(feature = "compression")]
pub fn decompress_str(payload: &str) -> Result<String, CodecError> {
    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    let fail = |msg: String| CodecError::DecompressionFailure(msg);

    let packed = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| fail(format!("base64: {e}")))?;
    let declared = packed
        .first_chunk::<4>()
        .map(|len| u32::from_le_bytes(*len) as usize)
        .ok_or_else(|| fail("lz4: missing length header".into()))?;
    if declared > MAX_DECOMPRESSED_LEN {
        return Err(fail(format!(
            "lz4: declared length {declared} exceeds {MAX_DECOMPRESSED_LEN}"
        )));
    }
    let bytes = lz4_flex::decompress_size_prepended(&packed)
        .map_err(|e| fail(format!("lz4: {e}")))?;
    let text =
        String::from_utf8(bytes).map_err(|e| fail(format!("utf-8: {e}")))?;
    if text.is_empty() {
        return Err(fail("payload decompressed to nothing".into()));
    }
    Ok(text)
}

#[cfg(not(feature = "compression"))]
pub fn decompress_str(_payload: &str) -> Result<String, CodecError> {
    Err(CodecError::DecompressionFailure(
        "compression support not compiled in".into(),
    ))
}
