//! Activity grouping.
//!
//! Turns a room's ordered activity list into placement units. When
//! grouping is enabled, activities sharing the same interval (at minute
//! precision) and the same eligibility flag become one unit spanning one
//! lane per activity. Units are created in first-seen order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::PlacementResult;
use crate::models::{Activity, PlacementUnit};

/// Order in which a room's activities reach the grouper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessingOrder {
    /// Keep the caller's order.
    #[default]
    AsGiven,
    /// Stable sort by `(start, end)`; unconstrained activities first.
    Chronological,
}

impl ProcessingOrder {
    /// Applies the order to an activity list in place.
    pub fn apply(self, activities: &mut [Activity]) {
        if self == Self::Chronological {
            sort_chronologically(activities);
        }
    }
}

/// Stable sort by `(start, end)`. Unconstrained activities come first.
pub fn sort_chronologically(activities: &mut [Activity]) {
    activities.sort_by_key(|a| a.span.map(|s| (s.start, s.end)));
}

/// Groups a room's activities into placement units.
///
/// With `allow_grouping == false`, or for activities that are unconstrained
/// or have no kind, every activity becomes its own singleton unit.
/// Otherwise the first activity seen for a `(start, end, eligible)` key
/// opens a unit and later ones with the same key join it.
///
/// # Errors
/// `InvalidInterval` for an activity whose interval ends before it starts.
pub fn group_activities(
    activities: Vec<Activity>,
    allow_grouping: bool,
) -> PlacementResult<Vec<PlacementUnit>> {
    if !allow_grouping {
        return activities.into_iter().map(PlacementUnit::new).collect();
    }

    let mut units: Vec<PlacementUnit> = Vec::with_capacity(activities.len());

    let mut open: HashMap<(String, bool), usize> = HashMap::new();
    for activity in activities {
        let key = match (&activity.span, activity.has_kind()) {
            (Some(span), true) => (span.minute_key(), activity.group_eligible),
            _ => {
                units.push(PlacementUnit::new(activity)?);
                continue;
            }
        };

        match open.get(&key) {
            Some(&idx) => units[idx].push(activity)?,
            None => {
                open.insert(key, units.len());
                units.push(PlacementUnit::new(activity)?);
            }
        }
    }

    Ok(units)
}
