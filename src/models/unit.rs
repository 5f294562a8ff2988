//! Placement unit ("grouped activity") model.
//!
//! A placement unit owns one or more activities that share a room and an
//! interval (compared at minute precision). It is the thing the engine
//! actually places: a unit of width `w` occupies `w` contiguous lanes
//! starting at its starting lane, one lane per underlying activity.

use std::collections::HashSet;
use std::ops::Range;

use chrono::Duration;
use serde::Serialize;

use super::activity::{spans_conflict, Activity, TimeSpan};
use crate::error::{PlacementError, PlacementResult};

/// One or more activities placed together across contiguous lanes.
///
/// Only built through [`PlacementUnit::new`] and
/// [`PlacementUnit::from_activities`], so every unit has at least one
/// activity and a well-formed interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementUnit {
    span: Option<TimeSpan>,
    activities: Vec<Activity>,
    starting_lane: Option<usize>,
}

impl PlacementUnit {
    /// Creates a singleton unit.
    ///
    /// # Errors
    /// `InvalidInterval` when the activity's interval ends before it starts.
    pub fn new(activity: Activity) -> PlacementResult<Self> {
        check_interval(&activity)?;
        Ok(Self {
            span: activity.span,
            activities: vec![activity],
            starting_lane: None,
        })
    }

    /// Creates a unit from several activities sharing one interval.
    ///
    /// # Errors
    /// `EmptyUnit` for an empty list, `InvalidInterval` for an interval
    /// ending before it starts, `MismatchedSpan` when an activity's
    /// interval differs from the first one's at minute precision.
    pub fn from_activities(activities: Vec<Activity>) -> PlacementResult<Self> {
        let span = match activities.first() {
            Some(first) => first.span,
            None => return Err(PlacementError::EmptyUnit),
        };
        for act in &activities {
            check_interval(act)?;
        }
        let key = span.map(|s| s.minute_key());
        if let Some(odd) = activities
            .iter()
            .find(|a| a.span.map(|s| s.minute_key()) != key)
        {
            return Err(PlacementError::MismatchedSpan {
                activity: odd.id.clone(),
            });
        }
        Ok(Self {
            span,
            activities,
            starting_lane: None,
        })
    }

    /// Appends an activity with the same interval. Widens the unit by one lane.
    pub(crate) fn push(&mut self, activity: Activity) -> PlacementResult<()> {
        check_interval(&activity)?;
        self.activities.push(activity);
        Ok(())
    }

    /// Shared interval. `None` = unconstrained.
    pub fn span(&self) -> Option<&TimeSpan> {
        self.span.as_ref()
    }

    /// Underlying activities, in first-seen order.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Number of contiguous lanes this unit occupies.
    pub fn width(&self) -> usize {
        self.activities.len()
    }

    /// Room code (taken from the first activity).
    pub fn room(&self) -> &str {
        self.activities.first().map_or("", |a| a.room.as_str())
    }

    /// Lane the unit starts at, once placed.
    pub fn starting_lane(&self) -> Option<usize> {
        self.starting_lane
    }

    pub(crate) fn set_starting_lane(&mut self, lane: usize) {
        debug_assert!(self.starting_lane.is_none(), "unit placed twice");
        self.starting_lane = Some(lane);
    }

    /// Lane indices occupied once placed.
    pub fn occupied_lanes(&self) -> Option<Range<usize>> {
        self.starting_lane.map(|s| s..s + self.width())
    }

    /// Whether the unit has no interval.
    pub fn is_unconstrained(&self) -> bool {
        self.span.is_none()
    }

    /// Whether the two units' intervals conflict given a clearance buffer.
    pub fn conflicts_with(&self, other: &PlacementUnit, buffer: Duration) -> bool {
        spans_conflict(self.span(), other.span(), buffer)
    }

    /// Distinct operator codes across the underlying activities.
    pub fn operators(&self) -> HashSet<&str> {
        self.activities
            .iter()
            .filter_map(|a| a.operator.as_deref())
            .collect()
    }

    /// Distinct group/booking codes across the underlying activities.
    pub fn groups(&self) -> HashSet<&str> {
        self.activities
            .iter()
            .filter_map(|a| a.group.as_deref())
            .collect()
    }

    /// Whether any operator code appears in both units.
    pub fn shares_operator(&self, other: &PlacementUnit) -> bool {
        let mine = self.operators();
        other
            .activities
            .iter()
            .filter_map(|a| a.operator.as_deref())
            .any(|op| mine.contains(op))
    }

    /// Whether any group/booking code appears in both units.
    pub fn shares_group(&self, other: &PlacementUnit) -> bool {
        let mine = self.groups();
        other
            .activities
            .iter()
            .filter_map(|a| a.group.as_deref())
            .any(|g| mine.contains(g))
    }
}

fn check_interval(activity: &Activity) -> PlacementResult<()> {
    match activity.span {
        Some(span) if !span.is_well_formed() => Err(PlacementError::InvalidInterval {
            activity: activity.id.clone(),
        }),
        _ => Ok(()),
    }
}
