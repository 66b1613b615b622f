use serde::Serialize;
use thiserror::Error;

/// Failures the scoring pipeline can report on a [`WalkabilityResult`].
///
/// Only resolution failures, a missing location, cancellation, or the
/// failure of every infrastructure query are ever surfaced to callers.
/// A single failed query is absorbed and only logged.
///
/// [`WalkabilityResult`]: crate::scoring::WalkabilityResult
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum ScoringError {
    #[error("No location found for address: {0}")]
    NotFound(String),

    #[error("Address resolution failed: {0}")]
    Resolution(String),

    #[error("Infrastructure query failed: {0}")]
    Query(String),

    #[error("All infrastructure queries failed: {0}")]
    AllQueriesFailed(String),

    #[error("Neither an address nor a coordinate was supplied")]
    MissingLocation,

    #[error("Scoring was cancelled")]
    Cancelled,
}

impl ScoringError {
    /// True for the errors raised while turning an address into a coordinate.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            ScoringError::NotFound(_) | ScoringError::Resolution(_) | ScoringError::MissingLocation
        )
    }
}

pub type ScoringResult<T> = Result<T, ScoringError>;
