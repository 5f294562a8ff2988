//! Activity (booking row) model.
//!
//! An activity is the input leaf record of the engine: a single visit,
//! booking or operator-led session that needs a lane inside a room.
//! Activities are built by upstream parsing and never mutated here.
//!
//! # Time Model
//!
//! Times are wall-clock `NaiveDateTime`s for a single calendar day.
//! An activity either has a half-open interval `[start, end)` or is
//! *unconstrained* (`span == None`), which is compatible with everything.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Format used when two intervals are compared for grouping.
const MINUTE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Half-open time interval `[start, end)`.
///
/// Construction does not check ordering so that malformed upstream rows
/// can still be represented and reported by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSpan {
    /// Inclusive start.
    pub start: NaiveDateTime,
    /// Exclusive end.
    pub end: NaiveDateTime,
}

impl TimeSpan {
    /// Creates a span.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Whether `end >= start`.
    pub fn is_well_formed(&self) -> bool {
        self.end >= self.start
    }

    /// Length of the span.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether the two spans intersect.
    pub fn overlaps(&self, other: &TimeSpan) -> bool {
        self.overlaps_with_buffer(other, Duration::zero())
    }

    /// Whether `other` intersects this span widened by `buffer` on both sides.
    ///
    /// With a zero buffer, back-to-back spans (`a.end == b.start`) do not overlap.
    pub fn overlaps_with_buffer(&self, other: &TimeSpan, buffer: Duration) -> bool {
        self.start - buffer < other.end && other.start < self.end + buffer
    }

    /// Grouping key: start and end at minute precision.
    pub fn minute_key(&self) -> String {
        format!(
            "{}|{}",
            self.start.format(MINUTE_FORMAT),
            self.end.format(MINUTE_FORMAT)
        )
    }
}

/// Whether two optional spans conflict given a clearance buffer.
///
/// An unconstrained span (`None`) never conflicts.
pub fn spans_conflict(a: Option<&TimeSpan>, b: Option<&TimeSpan>, buffer: Duration) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.overlaps_with_buffer(b, buffer),
        _ => false,
    }
}

/// A single time-bounded booking/session record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Source record identifier (row id, booking number).
    pub id: String,
    /// Room code the activity takes place in.
    pub room: String,
    /// Time interval. `None` = unconstrained, always fits.
    pub span: Option<TimeSpan>,
    /// Operator (guide, instructor) code.
    pub operator: Option<String>,
    /// Group / booking code shared by rows of the same booking.
    pub group: Option<String>,
    /// Categorical kind code. Activities without a kind are never grouped.
    pub kind: Option<String>,
    /// Eligibility flag for the multi-row grouping path.
    pub group_eligible: bool,
    /// Free-form metadata carried through to the rendering layer.
    pub attributes: HashMap<String, String>,
}

impl Activity {
    /// Creates an unconstrained activity in a room.
    pub fn new(id: impl Into<String>, room: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            room: room.into(),
            span: None,
            operator: None,
            group: None,
            kind: None,
            group_eligible: true,
            attributes: HashMap::new(),
        }
    }

    /// Sets the time interval.
    pub fn with_span(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.span = Some(TimeSpan::new(start, end));
        self
    }

    /// Sets the operator code.
    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    /// Sets the group/booking code.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Sets the kind code.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Sets the grouping eligibility flag.
    pub fn with_group_eligible(mut self, eligible: bool) -> Self {
        self.group_eligible = eligible;
        self
    }

    /// Adds a metadata attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Whether the activity has no interval.
    pub fn is_unconstrained(&self) -> bool {
        self.span.is_none()
    }

    /// Whether the kind code is present and non-blank.
    pub fn has_kind(&self) -> bool {
        self.kind.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}
