//! Wire code tables: fixed bidirectional maps between domain enums and the
//! short codes that appear in share strings.
//!
//! The tables are built once, on first use, from the static pair lists
//! below. The decode direction is the inversion of the encode direction,
//! so the two can never drift apart.
//!
//! # Grammar constraint
//!
//! The turns field in a motion token has no length prefix. The decoder
//! finds its end by scanning for the first motion-type code. That only
//! works because no motion-type code is a digit or the float marker `f`.
//! Any change to [`MOTION_TYPE_CODES`] must keep it that way, or every
//! existing share link becomes ambiguous.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::LazyLock;

use crate::types::{
    Location, MotionType, Orientation, PropType, RotationDirection,
};

/// Wire marker for [`Turns::Float`](crate::Turns::Float).
pub const FLOAT_TURNS_CODE: &str = "f";

/// Width of a location code.
pub const LOCATION_CODE_LEN: usize = 2;

const LOCATION_CODES: &[(Location, &str)] = &[
    (Location::N, "nn"),
    (Location::E, "ee"),
    (Location::S, "ss"),
    (Location::W, "ww"),
    (Location::Ne, "ne"),
    (Location::Se, "se"),
    (Location::Sw, "sw"),
    (Location::Nw, "nw"),
];

const ORIENTATION_CODES: &[(Orientation, &str)] = &[
    (Orientation::In, "i"),
    (Orientation::Out, "o"),
    (Orientation::Clock, "c"),
    (Orientation::Counter, "k"),
];

const ROTATION_CODES: &[(RotationDirection, &str)] = &[
    (RotationDirection::Cw, "c"),
    (RotationDirection::Ccw, "a"),
    (RotationDirection::None, "n"),
];

/// Motion-type codes double as the terminator of the turns field.
pub const MOTION_TYPE_CODES: &[(MotionType, &str)] = &[
    (MotionType::Pro, "p"),
    (MotionType::Anti, "a"),
    (MotionType::Float, "l"),
    (MotionType::Dash, "d"),
    (MotionType::Static, "s"),
];

// Lowercase is the standard prop, uppercase the big variant of the same
// family. Hoop has three sizes: `o` standard, `O` big, `m` mini.
const PROP_TYPE_CODES: &[(PropType, &str)] = &[
    (PropType::Hand, "h"),
    (PropType::Staff, "s"),
    (PropType::BigStaff, "S"),
    (PropType::SimpleStaff, "i"),
    (PropType::Club, "c"),
    (PropType::BigClub, "C"),
    (PropType::Buugeng, "b"),
    (PropType::BigBuugeng, "B"),
    (PropType::Fractalgeng, "g"),
    (PropType::EightRings, "e"),
    (PropType::BigEightRings, "E"),
    (PropType::DoubleStar, "d"),
    (PropType::BigDoubleStar, "D"),
    (PropType::Fan, "f"),
    (PropType::BigFan, "F"),
    (PropType::Triad, "t"),
    (PropType::BigTriad, "T"),
    (PropType::Hoop, "o"),
    (PropType::MiniHoop, "m"),
    (PropType::BigHoop, "O"),
    (PropType::Quiad, "q"),
    (PropType::Sword, "w"),
    (PropType::Guitar, "u"),
    (PropType::Ukulele, "k"),
    (PropType::Chicken, "n"),
    (PropType::Triquetra, "r"),
    (PropType::Triquetra2, "R"),
    (PropType::Poi, "p"),
    (PropType::BigPoi, "P"),
    (PropType::Leaf, "l"),
];

// ---------------------------------------------------------------------------
// CodeTable
// ---------------------------------------------------------------------------

/// A bidirectional map between one enum and its wire codes.
#[derive(Debug)]
pub struct CodeTable<T: 'static> {
    encode: HashMap<T, &'static str>,
    decode: HashMap<&'static str, T>,
}

impl<T> CodeTable<T>
where
    T: Copy + Eq + Hash + 'static,
{
    /// Builds both directions from a pair list.
    ///
    /// Duplicate values or codes are a programming error in the static
    /// lists, caught in debug builds.
    fn from_pairs(pairs: &'static [(T, &'static str)]) -> Self {
        let encode: HashMap<T, &'static str> = pairs.iter().copied().collect();
        let decode: HashMap<&'static str, T> =
            pairs.iter().map(|&(value, code)| (code, value)).collect();
        debug_assert_eq!(encode.len(), pairs.len(), "duplicate enum value");
        debug_assert_eq!(decode.len(), pairs.len(), "duplicate wire code");
        Self { encode, decode }
    }

    /// The wire code for `value`, if the table has one.
    pub fn code(&self, value: T) -> Option<&'static str> {
        self.encode.get(&value).copied()
    }

    /// The enum value for a wire code. Lookup is case-sensitive.
    pub fn value(&self, code: &str) -> Option<T> {
        self.decode.get(code).copied()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.encode.len()
    }

    /// `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.encode.is_empty()
    }
}

// ---------------------------------------------------------------------------
// CodecTables registry
// ---------------------------------------------------------------------------

/// Every table the motion codec needs.
#[derive(Debug)]
pub struct CodecTables {
    pub location: CodeTable<Location>,
    pub orientation: CodeTable<Orientation>,
    pub rotation: CodeTable<RotationDirection>,
    pub motion_type: CodeTable<MotionType>,
    pub prop_type: CodeTable<PropType>,
}

impl CodecTables {
    fn build() -> Self {
        debug_assert!(
            MOTION_TYPE_CODES.iter().all(|(_, code)| {
                *code != FLOAT_TURNS_CODE
                    && !code.chars().any(|c| c.is_ascii_digit())
            }),
            "motion-type codes must not collide with the turns alphabet"
        );
        Self {
            location: CodeTable::from_pairs(LOCATION_CODES),
            orientation: CodeTable::from_pairs(ORIENTATION_CODES),
            rotation: CodeTable::from_pairs(ROTATION_CODES),
            motion_type: CodeTable::from_pairs(MOTION_TYPE_CODES),
            prop_type: CodeTable::from_pairs(PROP_TYPE_CODES),
        }
    }

    /// `true` if `c` is a motion-type code (the turns terminator).
    pub fn is_motion_type_code(&self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.motion_type.value(c.encode_utf8(&mut buf)).is_some()
    }
}

static TABLES: LazyLock<CodecTables> = LazyLock::new(CodecTables::build);

/// The process-wide code tables, built on first access.
pub fn codec_tables() -> &'static CodecTables {
    &TABLES
}
