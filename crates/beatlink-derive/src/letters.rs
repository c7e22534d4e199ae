//! Letter classification: matching a beat's configuration to a letter.

use std::future::Future;

use beatlink_protocol::{Beat, GridPosition, Letter, MotionType};
use serde::{Deserialize, Serialize};

use crate::DeriveError;

/// Looks up which letter a beat spells.
///
/// Called after grid positions are filled in, so implementations may rely
/// on `beat.start_position` / `beat.end_position` when they are set.
pub trait LetterLookup: Send + Sync {
    /// Returns the matching letter, or `Ok(None)` if nothing matches.
    ///
    /// # Errors
    /// [`DeriveError::LookupFailed`] if the service itself failed.
    fn letter_for(
        &self,
        beat: &Beat,
    ) -> impl Future<Output = Result<Option<Letter>, DeriveError>> + Send;
}

/// One row of a letter table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterDefinition {
    pub letter: Letter,
    pub start_position: GridPosition,
    pub end_position: GridPosition,
    pub blue_motion: MotionType,
    pub red_motion: MotionType,
}

impl LetterDefinition {
    /// `true` if the beat has both hands, both positions, and they all
    /// agree with this definition.
    pub fn matches(&self, beat: &Beat) -> bool {
        let (Some(blue), Some(red)) = (&beat.blue, &beat.red) else {
            return false;
        };
        beat.start_position.as_ref() == Some(&self.start_position)
            && beat.end_position.as_ref() == Some(&self.end_position)
            && blue.motion_type == self.blue_motion
            && red.motion_type == self.red_motion
    }
}

/// An in-memory [`LetterLookup`] over a list of definitions.
///
/// The first matching definition wins. Definitions can be loaded from JSON
/// since [`LetterDefinition`] is serde-enabled.
#[derive(Debug, Clone, Default)]
pub struct LetterTable {
    definitions: Vec<LetterDefinition>,
}

impl LetterTable {
    pub fn new(definitions: Vec<LetterDefinition>) -> Self {
        Self { definitions }
    }

    /// Synchronous lookup used by the [`LetterLookup`] impl.
    pub fn find(&self, beat: &Beat) -> Option<&Letter> {
        self.definitions
            .iter()
            .find(|d| d.matches(beat))
            .map(|d| &d.letter)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl LetterLookup for LetterTable {
    async fn letter_for(
        &self,
        beat: &Beat,
    ) -> Result<Option<Letter>, DeriveError> {
        Ok(self.find(beat).cloned())
    }
}
