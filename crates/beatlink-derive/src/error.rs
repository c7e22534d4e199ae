//! Error types for the enrichment layer.

/// Errors an injected lookup service can report.
///
/// None of these are fatal to enrichment: the caller logs them and leaves
/// the affected field empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeriveError {
    /// The position resolver has no name for a location pair.
    #[error("position resolver failed: {0}")]
    ResolverFailed(String),

    /// The letter lookup service could not answer.
    #[error("letter lookup failed: {0}")]
    LookupFailed(String),
}
