//! Integration tests for post-decode enrichment with mock services.

use std::sync::Mutex;

use beatlink_derive::{
    CompassResolver, DeriveError, LetterDefinition, LetterLookup, LetterTable,
    PositionResolver, derive_letters_for_sequence,
    derive_positions_for_sequence, enrich_sequence,
};
use beatlink_protocol::{
    Beat, GridPosition, Letter, Location, MotionType, decode,
};

// =========================================================================
// Mock services
// =========================================================================

/// Resolves everything except pairs involving the west point.
struct NoWest;

impl PositionResolver for NoWest {
    async fn resolve(
        &self,
        blue: Location,
        red: Location,
    ) -> Result<GridPosition, DeriveError> {
        if blue == Location::W || red == Location::W {
            return Err(DeriveError::ResolverFailed("west is closed".into()));
        }
        Ok(GridPosition(format!("{blue}{red}")))
    }
}

/// Records whether each beat had positions when its letter was requested.
#[derive(Default)]
struct RecordingLookup {
    saw_positions: Mutex<Vec<bool>>,
}

impl LetterLookup for RecordingLookup {
    async fn letter_for(
        &self,
        beat: &Beat,
    ) -> Result<Option<Letter>, DeriveError> {
        self.saw_positions
            .lock()
            .unwrap()
            .push(beat.start_position.is_some());
        Ok(Some(Letter(format!("L{}", beat.beat_number))))
    }
}

/// Always fails.
struct BrokenLookup;

impl LetterLookup for BrokenLookup {
    async fn letter_for(
        &self,
        _beat: &Beat,
    ) -> Result<Option<Letter>, DeriveError> {
        Err(DeriveError::LookupFailed("offline".into()))
    }
}

// Start: blue N→E, red S→W. Beat 1: blue N→E, red S→W (pro/pro).
// Beat 2: blank. Beat 3: blue only.
const SEQUENCE: &str =
    "nneeiic1ps:sswwiic1ps|nneeiic1ps:sswwiic1ps|:|eessiic1ps:";

// =========================================================================
// Positions
// =========================================================================

#[tokio::test]
async fn test_positions_with_compass_resolver() {
    let seq = decode(SEQUENCE).unwrap();
    let seq = derive_positions_for_sequence(seq, &CompassResolver).await;

    let start = seq.start_position.as_ref().unwrap();
    assert_eq!(start.start_position, Some(GridPosition("alpha1".into())));
    assert_eq!(start.end_position, Some(GridPosition("alpha3".into())));
    assert_eq!(seq.beats[0].start_position, Some(GridPosition("alpha1".into())));
}

#[tokio::test]
async fn test_positions_skip_blank_and_one_handed_beats() {
    let seq = decode(SEQUENCE).unwrap();
    let seq = derive_positions_for_sequence(seq, &CompassResolver).await;

    assert!(seq.beats[1].start_position.is_none());
    assert!(seq.beats[2].start_position.is_none());
    assert!(seq.beats[2].end_position.is_none());
}

#[tokio::test]
async fn test_positions_resolver_failure_is_per_field() {
    let seq = decode(SEQUENCE).unwrap();
    let seq = derive_positions_for_sequence(seq, &NoWest).await;

    // Starts are N/S: resolvable. Ends are E/W: the resolver refuses.
    let beat = &seq.beats[0];
    assert_eq!(beat.start_position, Some(GridPosition("NS".into())));
    assert!(beat.end_position.is_none());
}

#[tokio::test]
async fn test_positions_keep_existing_values() {
    let mut seq = decode(SEQUENCE).unwrap();
    seq.beats[0].start_position = Some(GridPosition("custom".into()));
    let seq = derive_positions_for_sequence(seq, &CompassResolver).await;
    assert_eq!(seq.beats[0].start_position, Some(GridPosition("custom".into())));
    assert_eq!(seq.beats[0].end_position, Some(GridPosition("alpha3".into())));
}

// =========================================================================
// Letters
// =========================================================================

#[tokio::test]
async fn test_letters_skip_blank_beats() {
    let lookup = RecordingLookup::default();
    let seq = decode(SEQUENCE).unwrap();
    let seq = derive_letters_for_sequence(seq, &lookup).await;

    assert_eq!(seq.beats[0].letter, Some(Letter("L1".into())));
    assert_eq!(seq.beats[1].letter, None);
    assert_eq!(seq.beats[2].letter, Some(Letter("L3".into())));
    assert_eq!(lookup.saw_positions.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_letters_lookup_failure_leaves_none() {
    let seq = decode(SEQUENCE).unwrap();
    let seq = derive_letters_for_sequence(seq, &BrokenLookup).await;
    assert!(seq.beats.iter().all(|b| b.letter.is_none()));
}

#[tokio::test]
async fn test_enrich_runs_positions_before_letters() {
    let lookup = RecordingLookup::default();
    let seq = decode(SEQUENCE).unwrap();
    let _ = enrich_sequence(seq, &CompassResolver, &lookup).await;

    // Beat 1 has both hands, so it was positioned before its lookup.
    let seen = lookup.saw_positions.lock().unwrap();
    assert_eq!(seen.first(), Some(&true));
}

#[tokio::test]
async fn test_enrich_with_letter_table() {
    let table = LetterTable::new(vec![LetterDefinition {
        letter: Letter("A".into()),
        start_position: GridPosition("alpha1".into()),
        end_position: GridPosition("alpha3".into()),
        blue_motion: MotionType::Pro,
        red_motion: MotionType::Pro,
    }]);
    let seq = decode(SEQUENCE).unwrap();
    let seq = enrich_sequence(seq, &CompassResolver, &table).await;

    assert_eq!(seq.beats[0].letter, Some(Letter("A".into())));
    assert_eq!(seq.beats[2].letter, None);
}

#[tokio::test]
async fn test_unenriched_sequence_is_still_valid() {
    let seq = decode(SEQUENCE).unwrap();
    assert!(seq.beats.iter().all(|b| b.letter.is_none()));
    assert_eq!(beatlink_protocol::encode(&seq), SEQUENCE);
}
