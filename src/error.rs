//! Errors surfaced by placement.
//!
//! Only malformed input is an error. A unit that fits nowhere is resolved
//! by lane growth, and an unknown room code falls back to the default
//! weight profile.

use chrono::NaiveDate;
use thiserror::Error;

use crate::validation::ValidationError;

/// Result alias for placement operations.
pub type PlacementResult<T> = Result<T, PlacementError>;

/// A placement failure. Aborts the affected room/day; never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    /// The activity list for a room/day failed validation.
    #[error("invalid input for room '{room}' on {day}: {}", summarize(.errors))]
    InvalidInput {
        room: String,
        day: NaiveDate,
        errors: Vec<ValidationError>,
    },

    /// A placement unit was built from an activity ending before it starts.
    #[error("activity '{activity}' ends before it starts")]
    InvalidInterval { activity: String },

    /// A placement unit was built from zero activities.
    #[error("placement unit has no activities")]
    EmptyUnit,

    /// A placement unit was built from activities with different intervals.
    #[error("activity '{activity}' does not share the interval of its placement unit")]
    MismatchedSpan { activity: String },
}

impl PlacementError {
    /// Validation errors carried by this error, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidInput { errors, .. } => errors,
            _ => &[],
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
