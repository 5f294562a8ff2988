//! Input validation for a room/day activity list.
//!
//! Checks structural integrity before grouping. Detects:
//! - Intervals that end before they start
//! - Activities filed under a different room
//! - Constrained activities that start on another day
//! - Duplicate activity IDs
//!
//! All problems are collected so the caller can report them together.

use chrono::NaiveDate;
use std::collections::HashSet;
use thiserror::Error;

use crate::models::Activity;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Interval end is before its start.
    InvalidInterval,
    /// Activity belongs to another room.
    RoomMismatch,
    /// Activity starts on another day.
    WrongDay,
    /// Two activities share the same ID.
    DuplicateId,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the activities of one room for one day.
///
/// Checks:
/// 1. Every interval satisfies `end >= start`
/// 2. Every activity's room code equals `room`
/// 3. Every constrained activity starts on `day`
/// 4. No duplicate activity IDs
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_activities(room: &str, day: NaiveDate, activities: &[Activity]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for act in activities {
        if !ids.insert(act.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate activity ID: {}", act.id),
            ));
        }

        if act.room != room {
            errors.push(ValidationError::new(
                ValidationErrorKind::RoomMismatch,
                format!(
                    "Activity '{}' belongs to room '{}', not '{room}'",
                    act.id, act.room
                ),
            ));
        }

        if let Some(span) = &act.span {
            if !span.is_well_formed() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidInterval,
                    format!(
                        "Activity '{}' ends at {} before it starts at {}",
                        act.id, span.end, span.start
                    ),
                ));
            }
            if span.start.date() != day {
                errors.push(ValidationError::new(
                    ValidationErrorKind::WrongDay,
                    format!(
                        "Activity '{}' starts on {}, not {day}",
                        act.id,
                        span.start.date()
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
