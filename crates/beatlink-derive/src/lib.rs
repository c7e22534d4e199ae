//! Post-decode enrichment for Beatlink sequences.
//!
//! The wire format only carries raw motion fields. Named grid positions
//! and letter classifications are derived afterwards by services the
//! caller injects:
//!
//! - [`PositionResolver`]: names the position both hands form
//!   ([`CompassResolver`] is a built-in implementation)
//! - [`LetterLookup`]: classifies a beat ([`LetterTable`] is a built-in
//!   implementation)
//!
//! # How it fits in the stack
//!
//! ```text
//! Caller (above)          ← decides when and whether to enrich
//!     ↕
//! Enrichment (this crate) ← fills derived, nullable fields
//!     ↕
//! Protocol (below)        ← SequenceData with raw motion fields
//! ```
//!
//! The codec never calls into this crate, and everything decoded works
//! with the derived fields left empty.

mod enrich;
mod error;
mod letters;
mod resolver;

pub use enrich::{
    derive_letters_for_sequence, derive_positions_for_sequence, enrich_sequence,
};
pub use error::DeriveError;
pub use letters::{LetterDefinition, LetterLookup, LetterTable};
pub use resolver::{CompassResolver, PositionResolver};
