//! Room layout (placement result) model.
//!
//! A layout lists a room's lanes in creation order, each holding its placed
//! units in the order they were appended. Append order is *not* time order;
//! use [`LaneView::by_start`] when a chronological listing is needed.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::PlacementUnit;

/// One parallel lane of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lane {
    /// Position of the lane, contiguous from 0.
    pub index: usize,
    /// Indices into the layout's unit list, in append order.
    pub entries: Vec<usize>,
}

impl Lane {
    /// Creates an empty lane.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            entries: Vec::new(),
        }
    }

    /// Number of units placed in this lane.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no unit was placed in this lane.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Final per-room lane listing for one day.
///
/// Output only: layouts are produced by the engine, never read back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomLayout {
    room: String,
    day: NaiveDate,
    initial_lanes: usize,
    units: Vec<PlacementUnit>,
    lanes: Vec<Lane>,
}

/// Borrowed view of one lane and the units placed in it.
#[derive(Debug, Clone, Copy)]
pub struct LaneView<'a> {
    lane: &'a Lane,
    units: &'a [PlacementUnit],
}

/// A broken layout invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Lane where it was detected, if any.
    pub lane: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

/// Classification of layout violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Two units in the same lane have intersecting intervals.
    Overlap,
    /// A unit's occupied range reaches past the last lane.
    MissingLane,
    /// A lane and a unit's occupied range disagree.
    WidthMismatch,
    /// A unit in the layout has no starting lane.
    Unplaced,
    /// Lane indices are not contiguous from 0.
    LaneIndex,
}

impl Violation {
    fn new(violation_type: ViolationType, lane: Option<usize>, message: String) -> Self {
        Self {
            violation_type,
            lane,
            message,
        }
    }
}

impl RoomLayout {
    pub(crate) fn new(
        room: String,
        day: NaiveDate,
        initial_lanes: usize,
        units: Vec<PlacementUnit>,
        lanes: Vec<Lane>,
    ) -> Self {
        Self {
            room,
            day,
            initial_lanes,
            units,
            lanes,
        }
    }

    /// Room code.
    pub fn room(&self) -> &str {
        &self.room
    }

    /// Day the layout was computed for.
    pub fn day(&self) -> NaiveDate {
        self.day
    }

    /// Lanes created before placement started.
    pub fn initial_lanes(&self) -> usize {
        self.initial_lanes
    }

    /// Number of lanes, including grown ones.
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// Placed units in placement order.
    pub fn units(&self) -> &[PlacementUnit] {
        &self.units
    }

    /// Total number of placed units.
    pub fn placed_count(&self) -> usize {
        self.units.len()
    }

    /// Total number of underlying activities.
    pub fn activity_count(&self) -> usize {
        self.units.iter().map(PlacementUnit::width).sum()
    }

    /// Lanes in creation order.
    pub fn lanes(&self) -> impl Iterator<Item = LaneView<'_>> {
        self.lanes.iter().map(move |lane| LaneView {
            lane,
            units: &self.units,
        })
    }

    /// A single lane.
    pub fn lane(&self, index: usize) -> Option<LaneView<'_>> {
        self.lanes.get(index).map(|lane| LaneView {
            lane,
            units: &self.units,
        })
    }

    /// Finds the unit holding the activity with the given ID.
    pub fn unit_for_activity(&self, activity_id: &str) -> Option<&PlacementUnit> {
        self.units
            .iter()
            .find(|u| u.activities().iter().any(|a| a.id == activity_id))
    }

    /// Re-checks the no-overlap and width-consistency invariants.
    ///
    /// Returns an empty list for every layout produced by the engine.
    pub fn verify(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (pos, lane) in self.lanes.iter().enumerate() {
            if lane.index != pos {
                violations.push(Violation::new(
                    ViolationType::LaneIndex,
                    Some(pos),
                    format!("Lane at position {pos} carries index {}", lane.index),
                ));
            }

            for (i, &a) in lane.entries.iter().enumerate() {
                for &b in &lane.entries[i + 1..] {
                    if self.units[a].conflicts_with(&self.units[b], Duration::zero()) {
                        violations.push(Violation::new(
                            ViolationType::Overlap,
                            Some(pos),
                            format!(
                                "Units '{}' and '{}' overlap in lane {pos}",
                                label(&self.units[a]),
                                label(&self.units[b])
                            ),
                        ));
                    }
                }

                let inside = self.units[a]
                    .occupied_lanes()
                    .is_some_and(|range| range.contains(&pos));
                if !inside {
                    violations.push(Violation::new(
                        ViolationType::WidthMismatch,
                        Some(pos),
                        format!(
                            "Lane {pos} lists unit '{}' outside its occupied range",
                            label(&self.units[a])
                        ),
                    ));
                }
            }
        }

        for (idx, unit) in self.units.iter().enumerate() {
            let Some(range) = unit.occupied_lanes() else {
                violations.push(Violation::new(
                    ViolationType::Unplaced,
                    None,
                    format!("Unit '{}' has no starting lane", label(unit)),
                ));
                continue;
            };
            for lane in range {
                match self.lanes.get(lane) {
                    None => violations.push(Violation::new(
                        ViolationType::MissingLane,
                        Some(lane),
                        format!("Unit '{}' needs missing lane {lane}", label(unit)),
                    )),
                    Some(l) if !l.entries.contains(&idx) => violations.push(Violation::new(
                        ViolationType::WidthMismatch,
                        Some(lane),
                        format!("Unit '{}' is missing from lane {lane}", label(unit)),
                    )),
                    Some(_) => {}
                }
            }
        }

        violations
    }
}

fn label(unit: &PlacementUnit) -> &str {
    unit.activities()
        .first()
        .map(|a| a.id.as_str())
        .unwrap_or_default()
}

impl<'a> LaneView<'a> {
    /// Lane index.
    pub fn index(&self) -> usize {
        self.lane.index
    }

    /// Number of units in the lane.
    pub fn len(&self) -> usize {
        self.lane.len()
    }

    /// Whether the lane is empty.
    pub fn is_empty(&self) -> bool {
        self.lane.is_empty()
    }

    /// Units in append order.
    pub fn units(&self) -> impl Iterator<Item = &'a PlacementUnit> + 'a {
        let (lane, units) = (self.lane, self.units);
        lane.entries.iter().map(move |&i| &units[i])
    }

    /// Units sorted by start time; unconstrained units first, ties keep append order.
    pub fn by_start(&self) -> Vec<&'a PlacementUnit> {
        let mut sorted: Vec<_> = self.units().collect();
        sorted.sort_by_key(|u| u.span().map(|s| (s.start, s.end)));
        sorted
    }
}
