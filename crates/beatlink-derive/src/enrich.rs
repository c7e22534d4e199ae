//! Post-decode enrichment: grid positions, then letters.
//!
//! A freshly decoded [`SequenceData`] has raw motion fields only. These
//! functions fill in the derived fields using injected services. Every
//! failure is per-beat and non-fatal: the beat keeps `None` in the field
//! and the rest of the sequence carries on.
//!
//! Within one sequence, positions must be derived before letters because
//! letter definitions match on positions. [`enrich_sequence`] enforces
//! that order. Different sequences can be enriched concurrently with no
//! ordering between them.

use beatlink_protocol::{Beat, SequenceData};

use crate::{LetterLookup, PositionResolver};

/// Fills in `start_position` / `end_position` on every beat that lacks
/// them, including the start position beat.
///
/// Each named position combines both hands' locations, so beats where a
/// hand is absent are left alone.
pub async fn derive_positions_for_sequence<R>(
    mut sequence: SequenceData,
    resolver: &R,
) -> SequenceData
where
    R: PositionResolver,
{
    if let Some(start) = sequence.start_position.as_mut() {
        derive_beat_positions(start, resolver).await;
    }
    for beat in &mut sequence.beats {
        derive_beat_positions(beat, resolver).await;
    }
    sequence
}

async fn derive_beat_positions<R: PositionResolver>(beat: &mut Beat, resolver: &R) {
    let (Some(blue), Some(red)) = (&beat.blue, &beat.red) else {
        tracing::trace!(beat = beat.beat_number, "skipping positions: hand absent");
        return;
    };
    let starts = (blue.start_location, red.start_location);
    let ends = (blue.end_location, red.end_location);

    if beat.start_position.is_none() {
        match resolver.resolve(starts.0, starts.1).await {
            Ok(position) => beat.start_position = Some(position),
            Err(e) => tracing::warn!(
                beat = beat.beat_number,
                error = %e,
                "could not derive start position"
            ),
        }
    }
    if beat.end_position.is_none() {
        match resolver.resolve(ends.0, ends.1).await {
            Ok(position) => beat.end_position = Some(position),
            Err(e) => tracing::warn!(
                beat = beat.beat_number,
                error = %e,
                "could not derive end position"
            ),
        }
    }
}

/// Fills in `letter` on every non-blank beat that lacks one.
///
/// Run this after [`derive_positions_for_sequence`]; letter lookups
/// usually need positions to match anything.
pub async fn derive_letters_for_sequence<L>(
    mut sequence: SequenceData,
    lookup: &L,
) -> SequenceData
where
    L: LetterLookup,
{
    for beat in sequence.beats.iter_mut() {
        if beat.letter.is_some() || beat.is_blank() {
            continue;
        }
        match lookup.letter_for(beat).await {
            Ok(letter) => beat.letter = letter,
            Err(e) => tracing::warn!(
                beat = beat.beat_number,
                error = %e,
                "could not derive letter"
            ),
        }
    }
    sequence
}

/// Runs position derivation, then letter derivation.
pub async fn enrich_sequence<R, L>(
    sequence: SequenceData,
    resolver: &R,
    lookup: &L,
) -> SequenceData
where
    R: PositionResolver,
    L: LetterLookup,
{
    let sequence = derive_positions_for_sequence(sequence, resolver).await;
    derive_letters_for_sequence(sequence, lookup).await
}
