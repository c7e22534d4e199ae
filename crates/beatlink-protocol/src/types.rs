//! Core domain types for Beatlink's wire format.
//!
//! These are the structures the codec turns into share strings and back.
//! Every enum here has a matching wire table in [`crate::tables`]; the
//! structs carry a few extra fields (reversals, derived positions, letters,
//! metadata) that never travel on the wire but ride along in JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Hand and grid enums
// ---------------------------------------------------------------------------

/// Which hand a motion belongs to.
///
/// Not part of the wire format: a motion's color is implied by which half
/// of the beat token it sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandColor {
    Blue,
    Red,
}

impl fmt::Display for HandColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blue => write!(f, "blue"),
            Self::Red => write!(f, "red"),
        }
    }
}

/// One of the eight points on the grid a hand can start or end at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    N,
    E,
    S,
    W,
    Ne,
    Se,
    Sw,
    Nw,
}

impl Location {
    /// Every location, in table order.
    pub const ALL: [Location; 8] = [
        Self::N,
        Self::E,
        Self::S,
        Self::W,
        Self::Ne,
        Self::Se,
        Self::Sw,
        Self::Nw,
    ];

    /// `true` for N/E/S/W.
    pub fn is_cardinal(self) -> bool {
        matches!(self, Self::N | Self::E | Self::S | Self::W)
    }

    /// Position going clockwise from north, 0..8 (N=0, NE=1, E=2, ...).
    pub fn clockwise_index(self) -> u8 {
        match self {
            Self::N => 0,
            Self::Ne => 1,
            Self::E => 2,
            Self::Se => 3,
            Self::S => 4,
            Self::Sw => 5,
            Self::W => 6,
            Self::Nw => 7,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::N => "N",
            Self::E => "E",
            Self::S => "S",
            Self::W => "W",
            Self::Ne => "NE",
            Self::Se => "SE",
            Self::Sw => "SW",
            Self::Nw => "NW",
        };
        f.write_str(s)
    }
}

/// Which way the prop's head points relative to the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    In,
    Out,
    Clock,
    Counter,
}

impl Orientation {
    pub const ALL: [Orientation; 4] =
        [Self::In, Self::Out, Self::Clock, Self::Counter];
}

/// Spin direction of a motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationDirection {
    Cw,
    Ccw,
    /// No rotation (static and dash motions usually carry this).
    None,
}

impl RotationDirection {
    pub const ALL: [RotationDirection; 3] = [Self::Cw, Self::Ccw, Self::None];
}

/// The kind of movement a hand makes during a beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionType {
    Pro,
    Anti,
    Float,
    Dash,
    Static,
}

impl MotionType {
    pub const ALL: [MotionType; 5] =
        [Self::Pro, Self::Anti, Self::Float, Self::Dash, Self::Static];
}

/// The physical prop being spun.
///
/// Families with a size variant (staff/big staff, hoop/mini hoop/big hoop)
/// share a letter on the wire and differ only by case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropType {
    Hand,
    Staff,
    BigStaff,
    SimpleStaff,
    Club,
    BigClub,
    Buugeng,
    BigBuugeng,
    Fractalgeng,
    EightRings,
    BigEightRings,
    DoubleStar,
    BigDoubleStar,
    Fan,
    BigFan,
    Triad,
    BigTriad,
    Hoop,
    MiniHoop,
    BigHoop,
    Quiad,
    Sword,
    Guitar,
    Ukulele,
    Chicken,
    Triquetra,
    Triquetra2,
    Poi,
    BigPoi,
    Leaf,
}

impl PropType {
    pub const ALL: [PropType; 30] = [
        Self::Hand,
        Self::Staff,
        Self::BigStaff,
        Self::SimpleStaff,
        Self::Club,
        Self::BigClub,
        Self::Buugeng,
        Self::BigBuugeng,
        Self::Fractalgeng,
        Self::EightRings,
        Self::BigEightRings,
        Self::DoubleStar,
        Self::BigDoubleStar,
        Self::Fan,
        Self::BigFan,
        Self::Triad,
        Self::BigTriad,
        Self::Hoop,
        Self::MiniHoop,
        Self::BigHoop,
        Self::Quiad,
        Self::Sword,
        Self::Guitar,
        Self::Ukulele,
        Self::Chicken,
        Self::Triquetra,
        Self::Triquetra2,
        Self::Poi,
        Self::BigPoi,
        Self::Leaf,
    ];
}

// ---------------------------------------------------------------------------
// Turns
// ---------------------------------------------------------------------------

/// How many times the prop rotates during a motion.
///
/// Either a whole count, or `Float` for indeterminate rotation. In JSON,
/// `Count(2)` is `2` and `Float` is the string `"fl"`; on the wire the
/// float marker is a single `f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TurnsRepr", into = "TurnsRepr")]
pub enum Turns {
    Count(u32),
    Float,
}

impl Default for Turns {
    fn default() -> Self {
        Self::Count(0)
    }
}

impl fmt::Display for Turns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Float => f.write_str(Turns::FLOAT_SENTINEL),
        }
    }
}

impl Turns {
    /// JSON spelling of [`Turns::Float`].
    pub const FLOAT_SENTINEL: &'static str = "fl";
}

/// JSON shape of [`Turns`]: a bare number or the `"fl"` string.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum TurnsRepr {
    Count(u32),
    Text(String),
}

impl From<Turns> for TurnsRepr {
    fn from(turns: Turns) -> Self {
        match turns {
            Turns::Count(n) => Self::Count(n),
            Turns::Float => Self::Text(Turns::FLOAT_SENTINEL.to_string()),
        }
    }
}

impl TryFrom<TurnsRepr> for Turns {
    type Error = String;

    fn try_from(repr: TurnsRepr) -> Result<Self, Self::Error> {
        match repr {
            TurnsRepr::Count(n) => Ok(Self::Count(n)),
            TurnsRepr::Text(s) if s == Turns::FLOAT_SENTINEL => Ok(Self::Float),
            TurnsRepr::Text(s) => Err(format!("invalid turns value: {s:?}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Grid mode
// ---------------------------------------------------------------------------

/// Which of the two grid layouts a motion is drawn on.
///
/// Not stored anywhere. It is inferred from where the hand starts and ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridMode {
    /// Cardinal points (N/E/S/W).
    Diamond,
    /// Intercardinal points (NE/SE/SW/NW).
    Box,
}

impl GridMode {
    /// Infers the grid mode from a start/end location pair.
    ///
    /// Both cardinal gives `Diamond`, both intercardinal gives `Box`.
    /// Mixed pairs fall back to `Diamond`.
    pub fn infer(start: Location, end: Location) -> Self {
        match (start.is_cardinal(), end.is_cardinal()) {
            (false, false) => Self::Box,
            _ => Self::Diamond,
        }
    }
}

// ---------------------------------------------------------------------------
// Derived identifiers
// ---------------------------------------------------------------------------

/// A named combination of both hands' locations (e.g. `alpha1`).
///
/// Filled in after decode by a position resolver; the codec never sets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridPosition(pub String);

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The letter a beat's motion configuration spells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Letter(pub String);

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Motion
// ---------------------------------------------------------------------------

/// One hand's movement during one beat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motion {
    pub motion_type: MotionType,
    pub rotation_direction: RotationDirection,
    pub start_location: Location,
    pub end_location: Location,
    pub start_orientation: Orientation,
    pub end_orientation: Orientation,
    pub turns: Turns,
    pub prop_type: PropType,
    /// Which hand this is. Re-derived from the slot on decode.
    pub color: HandColor,
}

impl Motion {
    /// Grid mode inferred from this motion's start and end locations.
    pub fn grid_mode(&self) -> GridMode {
        GridMode::infer(self.start_location, self.end_location)
    }
}

// ---------------------------------------------------------------------------
// Beat
// ---------------------------------------------------------------------------

/// One moment in a sequence: what each hand does.
///
/// Either hand may be `None`, which means that hand doesn't move this beat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beat {
    pub beat_number: u32,
    #[serde(default)]
    pub blue: Option<Motion>,
    #[serde(default)]
    pub red: Option<Motion>,
    #[serde(default)]
    pub blue_reversal: bool,
    #[serde(default)]
    pub red_reversal: bool,

    /// Named position both hands start from. Derived, never on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_position: Option<GridPosition>,
    /// Named position both hands end at. Derived, never on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_position: Option<GridPosition>,
    /// Letter classification. Derived, never on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter: Option<Letter>,
}

impl Beat {
    /// A beat with both motions.
    pub fn new(
        beat_number: u32,
        blue: Option<Motion>,
        red: Option<Motion>,
    ) -> Self {
        Self {
            beat_number,
            blue,
            red,
            ..Self::default()
        }
    }

    /// A beat where neither hand moves.
    pub fn blank(beat_number: u32) -> Self {
        Self {
            beat_number,
            ..Self::default()
        }
    }

    /// `true` when neither hand has a motion.
    pub fn is_blank(&self) -> bool {
        self.blue.is_none() && self.red.is_none()
    }

    /// The motion for the given hand, if any.
    pub fn motion(&self, color: HandColor) -> Option<&Motion> {
        match color {
            HandColor::Blue => self.blue.as_ref(),
            HandColor::Red => self.red.as_ref(),
        }
    }
}

// ---------------------------------------------------------------------------
// SequenceData
// ---------------------------------------------------------------------------

/// A full choreography: an optional start position and numbered beats.
///
/// The start position is conceptually beat 0 and never counts toward
/// [`total_beats`](Self::total_beats). `name`, `tags` and `is_favorite`
/// are library metadata the codec ignores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub start_position: Option<Beat>,
    #[serde(default)]
    pub beats: Vec<Beat>,
}

impl SequenceData {
    /// Creates an empty sequence with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Number of beats, excluding the start position.
    ///
    /// Without an explicit `start_position`, the first beat numbered 0
    /// stands in for it and is not counted.
    pub fn total_beats(&self) -> usize {
        self.beats.len() - usize::from(self.promoted_start_index().is_some())
    }

    /// Index in `beats` of the beat that serves as the start position,
    /// when there is no explicit one.
    pub(crate) fn promoted_start_index(&self) -> Option<usize> {
        if self.start_position.is_some() {
            return None;
        }
        self.beats.iter().position(|b| b.beat_number == 0)
    }

    /// Grid mode of the first motion found, starting from the start
    /// position. Empty sequences report `Diamond`.
    pub fn grid_mode(&self) -> GridMode {
        self.start_position
            .iter()
            .chain(self.beats.iter())
            .flat_map(|b| b.blue.iter().chain(b.red.iter()))
            .map(Motion::grid_mode)
            .next()
            .unwrap_or(GridMode::Diamond)
    }
}
