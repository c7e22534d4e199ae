//! Grid-position resolution: naming where both hands are.
//!
//! A decoded beat knows each hand's location but not the named position
//! those locations form together. That name comes from a resolver the
//! caller injects, so the codec stays free of any lookup data.
//!
//! [`CompassResolver`] is a self-contained implementation good enough for
//! tools and tests. Applications with their own position catalogue
//! implement [`PositionResolver`] over it.

use std::future::Future;

use beatlink_protocol::{GridPosition, Location};

use crate::DeriveError;

/// Turns a pair of hand locations into a named grid position.
///
/// # Trait bounds
///
/// - `Send + Sync`: one resolver is shared by every enrichment call.
/// - The returned future is `Send` so enrichment can run on any Tokio
///   worker thread.
///
/// # Example
///
/// ```rust
/// use beatlink_derive::{DeriveError, PositionResolver};
/// use beatlink_protocol::{GridPosition, Location};
///
/// /// Names every pair after the blue hand's location.
/// struct BlueOnly;
///
/// impl PositionResolver for BlueOnly {
///     async fn resolve(
///         &self,
///         blue: Location,
///         _red: Location,
///     ) -> Result<GridPosition, DeriveError> {
///         Ok(GridPosition(format!("blue-{blue}")))
///     }
/// }
/// ```
pub trait PositionResolver: Send + Sync {
    /// Names the position formed by the blue and red hand locations.
    ///
    /// # Errors
    /// [`DeriveError::ResolverFailed`] if the pair has no name.
    fn resolve(
        &self,
        blue: Location,
        red: Location,
    ) -> impl Future<Output = Result<GridPosition, DeriveError>> + Send;
}

/// Names positions by the angle between the hands.
///
/// - `alpha`: hands opposite each other
/// - `beta`: hands at the same point
/// - `gamma`: hands a quarter-turn apart
///
/// followed by the blue hand's clockwise index from north, 1..=8. So blue
/// at N with red at S is `alpha1`, and both hands at E is `beta3`.
/// Pairs that mix a cardinal and an intercardinal point have no name.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompassResolver;

impl CompassResolver {
    /// The synchronous core of [`PositionResolver::resolve`].
    pub fn name_for(
        blue: Location,
        red: Location,
    ) -> Result<GridPosition, DeriveError> {
        let b = blue.clockwise_index();
        let r = red.clockwise_index();
        let family = match (b + 8 - r) % 8 {
            0 => "beta",
            4 => "alpha",
            2 | 6 => "gamma",
            _ => {
                return Err(DeriveError::ResolverFailed(format!(
                    "no named position for {blue}/{red}"
                )));
            }
        };
        Ok(GridPosition(format!("{family}{}", b + 1)))
    }
}

impl PositionResolver for CompassResolver {
    async fn resolve(
        &self,
        blue: Location,
        red: Location,
    ) -> Result<GridPosition, DeriveError> {
        Self::name_for(blue, red)
    }
}
