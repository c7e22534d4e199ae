//! Round-trip tests for the sequence codec and compression wrapper.
//!
//! Motions are generated from a seeded RNG so failures reproduce, and
//! every enum variant shows up across the run.

use beatlink_protocol::{
    Beat, CodecError, HandColor, Location, Motion, MotionType, Orientation,
    PropType, RotationDirection, SequenceData, Turns, decode,
    decode_motion, decode_with_compression, encode, encode_motion,
    encode_with_compression,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// =========================================================================
// Helpers
// =========================================================================

fn pick<T: Copy>(rng: &mut StdRng, items: &[T]) -> T {
    items[rng.random_range(0..items.len())]
}

fn random_motion(rng: &mut StdRng, color: HandColor) -> Motion {
    let turns = if rng.random_bool(0.2) {
        Turns::Float
    } else {
        Turns::Count(rng.random_range(0..=12))
    };
    Motion {
        motion_type: pick(rng, &MotionType::ALL),
        rotation_direction: pick(rng, &RotationDirection::ALL),
        start_location: pick(rng, &Location::ALL),
        end_location: pick(rng, &Location::ALL),
        start_orientation: pick(rng, &Orientation::ALL),
        end_orientation: pick(rng, &Orientation::ALL),
        turns,
        prop_type: pick(rng, &PropType::ALL),
        color,
    }
}

fn random_beat(rng: &mut StdRng, number: u32) -> Beat {
    let blue = rng
        .random_bool(0.85)
        .then(|| random_motion(rng, HandColor::Blue));
    let red = rng
        .random_bool(0.85)
        .then(|| random_motion(rng, HandColor::Red));
    Beat::new(number, blue, red)
}

fn random_sequence(rng: &mut StdRng, beats: u32) -> SequenceData {
    let mut seq = SequenceData::new("generated");
    seq.start_position = Some(random_beat(rng, 0));
    seq.beats = (1..=beats).map(|n| random_beat(rng, n)).collect();
    seq
}

/// The codec doesn't carry metadata, so compare only what it does carry.
fn assert_same_wire_data(a: &SequenceData, b: &SequenceData) {
    assert_eq!(a.total_beats(), b.total_beats());
    assert_eq!(a.start_position, b.start_position);
    for (x, y) in a.beats.iter().zip(&b.beats) {
        assert_eq!(x.beat_number, y.beat_number);
        assert_eq!(x.blue, y.blue);
        assert_eq!(x.red, y.red);
        assert_eq!(x.is_blank(), y.is_blank());
    }
}

// =========================================================================
// Motion
// =========================================================================

#[test]
fn test_motion_round_trip_random() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..2_000 {
        let color = if rng.random_bool(0.5) {
            HandColor::Blue
        } else {
            HandColor::Red
        };
        let m = random_motion(&mut rng, color);
        let token = encode_motion(Some(&m));
        let decoded = decode_motion(&token, color)
            .unwrap_or_else(|e| panic!("{token:?} failed: {e}"));
        assert_eq!(decoded, m, "token {token:?}");
    }
}

#[test]
fn test_motion_float_turns_wire_marker() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut m = random_motion(&mut rng, HandColor::Blue);
    m.turns = Turns::Float;
    let token = encode_motion(Some(&m));
    assert_eq!(&token[7..8], "f");
    assert_eq!(decode_motion(&token, HandColor::Blue).unwrap().turns, Turns::Float);
}

// =========================================================================
// Sequence
// =========================================================================

#[test]
fn test_sequence_round_trip_random() {
    let mut rng = StdRng::seed_from_u64(42);
    for beats in [1, 2, 5, 16, 64] {
        let seq = random_sequence(&mut rng, beats);
        let decoded = decode(&encode(&seq)).expect("decode");
        assert_same_wire_data(&seq, &decoded);
    }
}

#[test]
fn test_three_beats_with_start_position_scenario() {
    let mut rng = StdRng::seed_from_u64(3);
    let seq = random_sequence(&mut rng, 3);

    let decoded = decode(&encode(&seq)).unwrap();

    assert_eq!(decoded.total_beats(), 3);
    assert_eq!(decoded.beats.len(), 3);
    assert_eq!(decoded.start_position.as_ref().map(|b| b.beat_number), Some(0));
    assert_same_wire_data(&seq, &decoded);
}

#[test]
fn test_decode_drops_metadata() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut seq = random_sequence(&mut rng, 2);
    seq.tags = vec!["flow".into()];
    seq.is_favorite = true;

    let decoded = decode(&encode(&seq)).unwrap();
    assert!(decoded.name.is_empty());
    assert!(decoded.tags.is_empty());
    assert!(!decoded.is_favorite);
}

#[test]
fn test_legacy_format_decodes_without_start_token() {
    let decoded = decode("12|nneeiic1ps:sswwoknfls|:").unwrap();
    let numbers: Vec<u32> = decoded.beats.iter().map(|b| b.beat_number).collect();
    assert_eq!(numbers, vec![12, 13]);
    assert_eq!(decoded.beats[0].red.as_ref().map(|m| m.turns), Some(Turns::Float));
    assert!(decoded.beats[1].is_blank());
    assert!(decoded.start_position.as_ref().is_some_and(Beat::is_blank));
}

#[test]
fn test_corrupt_beat_fails_whole_decode() {
    let err = decode(":|nneeiic1ps:|garbage").unwrap_err();
    assert!(matches!(err, CodecError::InvalidEncoding(_)));
}

// =========================================================================
// Compression wrapper
// =========================================================================

#[test]
fn test_compression_never_longer_than_raw() {
    let mut rng = StdRng::seed_from_u64(77);
    for beats in [0, 1, 3, 8, 32, 128] {
        let seq = random_sequence(&mut rng, beats);
        let raw = encode(&seq);
        let packed = encode_with_compression(&seq);
        assert!(packed.len() <= raw.len() + 2);
        assert!(packed.len() <= raw.len());
        let decoded = decode_with_compression(&packed).unwrap();
        assert_same_wire_data(&seq, &decoded);
    }
}
