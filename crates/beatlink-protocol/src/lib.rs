//! Sequence wire protocol for Beatlink.
//!
//! This crate defines how a choreography sequence becomes a compact,
//! URL-safe string and back:
//!
//! - **Types** ([`SequenceData`], [`Beat`], [`Motion`], and the field
//!   enums): the domain model the codec works on.
//! - **Tables** ([`CodecTables`]): the fixed enum ↔ wire-code mappings.
//! - **Codec** ([`encode`], [`decode`], and the per-motion/per-beat
//!   functions): the token grammar, including the legacy
//!   integer-prefixed format.
//! - **Compression** ([`encode_with_compression`],
//!   [`decode_with_compression`]): an optional `z:`-tagged packing pass.
//! - **Errors** ([`CodecError`]): what can go wrong.
//!
//! # Architecture
//!
//! ```text
//! Deep links (URL) → Compression (z: tag) → Sequence codec → Beat → Motion
//! ```
//!
//! Nothing here keeps state between calls. Enrichment of decoded data
//! (grid positions, letters) lives in `beatlink-derive`.

mod codec;
mod compression;
mod error;
mod tables;
mod types;

pub use codec::{
    BEAT_SEPARATOR, HAND_SEPARATOR, MIN_MOTION_TOKEN_LEN, decode, decode_beat,
    decode_motion, encode, encode_beat, encode_motion, try_encode_motion,
};
pub use compression::{
    COMPRESSED_PREFIX, MAX_DECOMPRESSED_LEN, compress_str,
    decode_with_compression, decompress_str, encode_with_compression,
};
pub use error::CodecError;
pub use tables::{CodeTable, CodecTables, FLOAT_TURNS_CODE, codec_tables};
pub use types::{
    Beat, GridMode, GridPosition, HandColor, Letter, Location, Motion,
    MotionType, Orientation, PropType, RotationDirection, SequenceData, Turns,
};
