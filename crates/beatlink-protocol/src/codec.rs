//! The sequence wire codec: motion, beat, and sequence tokens.
//!
//! The format is built from three nested token kinds:
//!
//! ```text
//! sequence := start "|" beat "|" beat ...        (current format)
//!           | digits "|" beat "|" beat ...       (legacy format)
//! beat     := motion? ":" motion?                (blue half, red half)
//! motion   := loc loc orient orient rot turns type prop
//!              2   2    1      1     1   1+    1    1
//! ```
//!
//! Everything here is a pure function of its input. The code tables are
//! shared statics, so the codec is safe to call from any thread without
//! locking.

use std::borrow::Cow;

use crate::tables::{FLOAT_TURNS_CODE, LOCATION_CODE_LEN, codec_tables};
use crate::types::{Beat, HandColor, Motion, SequenceData, Turns};
use crate::CodecError;

/// Separator between tokens in a sequence string.
pub const BEAT_SEPARATOR: char = '|';

/// Separator between the blue and red halves of a beat token.
pub const HAND_SEPARATOR: char = ':';

/// Shortest possible motion token: every fixed field plus one turns char.
pub const MIN_MOTION_TOKEN_LEN: usize = 10;

// Byte offsets of the fixed-width fields. All codes are ASCII, so byte
// offsets and char offsets agree for any token that is valid at all.
const START_LOC: usize = 0;
const END_LOC: usize = START_LOC + LOCATION_CODE_LEN;
const START_ORIENT: usize = END_LOC + LOCATION_CODE_LEN;
const END_ORIENT: usize = START_ORIENT + 1;
const ROTATION: usize = END_ORIENT + 1;
const TURNS: usize = ROTATION + 1;

// ---------------------------------------------------------------------------
// Motion
// ---------------------------------------------------------------------------

/// Encodes one hand's motion, or returns `""` for an absent motion.
///
/// Encoding never fails from the caller's point of view. If a field has no
/// wire code the problem is logged and the motion is left out of the
/// token, so one bad motion doesn't stop the rest of a sequence from being
/// shared.
pub fn encode_motion(motion: Option<&Motion>) -> String {
    let Some(motion) = motion else {
        return String::new();
    };
    match try_encode_motion(motion) {
        Ok(token) => token,
        Err(e) => {
            tracing::warn!(
                color = %motion.color,
                error = %e,
                "motion omitted from encoding"
            );
            String::new()
        }
    }
}

/// Encodes a motion, reporting which field has no wire code.
///
/// # Errors
/// Returns [`CodecError::MotionFieldMissing`] if a table lookup fails.
pub fn try_encode_motion(motion: &Motion) -> Result<String, CodecError> {
    let t = codec_tables();
    let missing = |field| CodecError::MotionFieldMissing { field };

    let mut out = String::with_capacity(MIN_MOTION_TOKEN_LEN + 2);
    out.push_str(
        t.location
            .code(motion.start_location)
            .ok_or_else(|| missing("start_location"))?,
    );
    out.push_str(
        t.location
            .code(motion.end_location)
            .ok_or_else(|| missing("end_location"))?,
    );
    out.push_str(
        t.orientation
            .code(motion.start_orientation)
            .ok_or_else(|| missing("start_orientation"))?,
    );
    out.push_str(
        t.orientation
            .code(motion.end_orientation)
            .ok_or_else(|| missing("end_orientation"))?,
    );
    out.push_str(
        t.rotation
            .code(motion.rotation_direction)
            .ok_or_else(|| missing("rotation_direction"))?,
    );
    out.push_str(&encode_turns(motion.turns));
    out.push_str(
        t.motion_type
            .code(motion.motion_type)
            .ok_or_else(|| missing("motion_type"))?,
    );
    out.push_str(
        t.prop_type
            .code(motion.prop_type)
            .ok_or_else(|| missing("prop_type"))?,
    );
    Ok(out)
}

/// Decodes one motion token. `color` comes from the token's slot.
///
/// The fixed-width fields are read by position. The turns field is read
/// greedily up to the first motion-type code, and exactly one prop code
/// must follow that.
///
/// # Errors
/// [`CodecError::InvalidEncoding`] if the token is shorter than
/// [`MIN_MOTION_TOKEN_LEN`], a code is unknown, the turns field is empty
/// or unparsable, or there isn't exactly one prop code at the end.
pub fn decode_motion(
    token: &str,
    color: HandColor,
) -> Result<Motion, CodecError> {
    if token.len() < MIN_MOTION_TOKEN_LEN {
        return Err(CodecError::invalid(format!(
            "motion token {token:?} is shorter than {MIN_MOTION_TOKEN_LEN}"
        )));
    }
    let t = codec_tables();

    // `str::get` returns None instead of panicking when the range splits a
    // multi-byte char, which can only happen for garbage input.
    let field = |from: usize, to: usize, name: &str| {
        token.get(from..to).ok_or_else(|| {
            CodecError::invalid(format!("{name} field in {token:?} is not ASCII"))
        })
    };
    let unknown = |name: &str, code: &str| {
        CodecError::invalid(format!("unknown {name} code {code:?}"))
    };

    let code = field(START_LOC, END_LOC, "start location")?;
    let start_location =
        t.location.value(code).ok_or_else(|| unknown("location", code))?;
    let code = field(END_LOC, START_ORIENT, "end location")?;
    let end_location =
        t.location.value(code).ok_or_else(|| unknown("location", code))?;
    let code = field(START_ORIENT, END_ORIENT, "start orientation")?;
    let start_orientation = t
        .orientation
        .value(code)
        .ok_or_else(|| unknown("orientation", code))?;
    let code = field(END_ORIENT, ROTATION, "end orientation")?;
    let end_orientation = t
        .orientation
        .value(code)
        .ok_or_else(|| unknown("orientation", code))?;
    let code = field(ROTATION, TURNS, "rotation")?;
    let rotation_direction =
        t.rotation.value(code).ok_or_else(|| unknown("rotation", code))?;

    // Variable-width tail: turns, then motion type, then prop type.
    let tail = field(TURNS, token.len(), "turns")?;
    let type_at = tail
        .char_indices()
        .find(|&(_, c)| t.is_motion_type_code(c))
        .map(|(i, _)| i)
        .ok_or_else(|| {
            CodecError::invalid(format!("no motion type in {token:?}"))
        })?;
    let turns = decode_turns(&tail[..type_at])?;

    // Motion-type codes are single ASCII chars, so the prop code starts
    // one byte later.
    let code = &tail[type_at..type_at + 1];
    let motion_type = t
        .motion_type
        .value(code)
        .ok_or_else(|| unknown("motion type", code))?;
    let code = &tail[type_at + 1..];
    if code.chars().count() != 1 {
        return Err(CodecError::invalid(format!(
            "expected one prop code after motion type in {token:?}, found {code:?}"
        )));
    }
    let prop_type =
        t.prop_type.value(code).ok_or_else(|| unknown("prop type", code))?;

    Ok(Motion {
        motion_type,
        rotation_direction,
        start_location,
        end_location,
        start_orientation,
        end_orientation,
        turns,
        prop_type,
        color,
    })
}

fn encode_turns(turns: Turns) -> Cow<'static, str> {
    match turns {
        Turns::Count(n) => Cow::Owned(n.to_string()),
        Turns::Float => Cow::Borrowed(FLOAT_TURNS_CODE),
    }
}

fn decode_turns(text: &str) -> Result<Turns, CodecError> {
    if text == FLOAT_TURNS_CODE {
        return Ok(Turns::Float);
    }
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::invalid(format!(
            "turns field {text:?} is neither digits nor {FLOAT_TURNS_CODE:?}"
        )));
    }
    text.parse()
        .map(Turns::Count)
        .map_err(|_| CodecError::invalid(format!("turns {text:?} out of range")))
}

// ---------------------------------------------------------------------------
// Beat
// ---------------------------------------------------------------------------

/// Encodes a beat as `blue:red`. Absent motions become empty halves.
pub fn encode_beat(beat: &Beat) -> String {
    let blue = encode_motion(beat.blue.as_ref());
    let red = encode_motion(beat.red.as_ref());
    format!("{blue}{HAND_SEPARATOR}{red}")
}

/// Decodes a `blue:red` beat token and numbers it `beat_number`.
///
/// # Errors
/// [`CodecError::InvalidEncoding`] unless the token has exactly one colon,
/// or if either non-empty half fails [`decode_motion`].
pub fn decode_beat(token: &str, beat_number: u32) -> Result<Beat, CodecError> {
    let colons = token.matches(HAND_SEPARATOR).count();
    let Some((blue, red)) = token.split_once(HAND_SEPARATOR).filter(|_| colons == 1)
    else {
        return Err(CodecError::invalid(format!(
            "beat token {token:?} has {colons} colons, expected 1"
        )));
    };

    let decode_half = |half: &str, color| {
        if half.is_empty() {
            Ok(None)
        } else {
            decode_motion(half, color).map(Some)
        }
    };

    Ok(Beat::new(
        beat_number,
        decode_half(blue, HandColor::Blue)?,
        decode_half(red, HandColor::Red)?,
    ))
}

// ---------------------------------------------------------------------------
// Sequence
// ---------------------------------------------------------------------------

/// Encodes a sequence in the current format: `start|beat|beat|...`.
///
/// The start position is, in order of preference: the explicit
/// `start_position` field, the first beat numbered 0 in the beat list, or a
/// blank placeholder. Only a promoted beat is left out of the beat tokens;
/// every other beat is encoded in list order.
pub fn encode(sequence: &SequenceData) -> String {
    let promoted = sequence.promoted_start_index();
    let start = match (&sequence.start_position, promoted) {
        (Some(start), _) => Cow::Borrowed(start),
        (None, Some(at)) => Cow::Borrowed(&sequence.beats[at]),
        (None, None) => Cow::Owned(Beat::blank(0)),
    };

    let mut tokens = Vec::with_capacity(sequence.beats.len() + 1);
    tokens.push(encode_beat(&start));
    tokens.extend(
        sequence
            .beats
            .iter()
            .enumerate()
            .filter(|&(i, _)| Some(i) != promoted)
            .map(|(_, b)| encode_beat(b)),
    );
    let separator = BEAT_SEPARATOR.to_string();
    tokens.join(separator.as_str())
}

/// Decodes a sequence string in either wire format.
///
/// Format detection is purely syntactic. A first token made only of ASCII
/// digits is a legacy beat-number prefix: beats are numbered from it and a
/// blank start position is synthesized. A prefix of `0` numbers the first
/// beat 0, so that beat becomes the start position and the rest are
/// numbered from 1. Anything else is a current-format start token (always
/// containing a `:`), decoded as beat 0, with the remaining beats numbered
/// from 1.
///
/// # Errors
/// [`CodecError::InvalidEncoding`] for empty input or any bad token.
pub fn decode(encoded: &str) -> Result<SequenceData, CodecError> {
    if encoded.is_empty() {
        return Err(CodecError::invalid("empty sequence string"));
    }
    let mut tokens = encoded.split(BEAT_SEPARATOR);
    let first = tokens
        .next()
        .ok_or_else(|| CodecError::invalid("no tokens in sequence string"))?;

    let legacy = is_legacy_prefix(first);
    let (start_position, first_beat) = if legacy {
        let first_beat: u32 = first.parse().map_err(|_| {
            CodecError::invalid(format!("legacy beat number {first:?} out of range"))
        })?;
        if first_beat == 0 {
            let start = match tokens.next() {
                Some(token) => decode_beat(token, 0)?,
                None => Beat::blank(0),
            };
            (start, 1)
        } else {
            (Beat::blank(0), first_beat)
        }
    } else {
        (decode_beat(first, 0)?, 1)
    };

    let beats = (0u32..)
        .zip(tokens)
        .map(|(offset, token)| {
            let number = first_beat.checked_add(offset).ok_or_else(|| {
                CodecError::invalid("beat number overflow")
            })?;
            decode_beat(token, number)
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::trace!(legacy, beats = beats.len(), "sequence decoded");

    Ok(SequenceData {
        start_position: Some(start_position),
        beats,
        ..SequenceData::default()
    })
}

fn is_legacy_prefix(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

// =========================================================================
// Tests
// =========================================================================
