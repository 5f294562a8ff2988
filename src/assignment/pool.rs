//! Per-room lane pool.
//!
//! Owns the placed units of one room/day pass and the lanes referencing
//! them. Lanes are only ever appended; entries are only ever appended.

use std::ops::Range;

use chrono::{Duration, NaiveDate};

use crate::models::{spans_conflict, Lane, PlacementUnit, RoomLayout, TimeSpan};

/// Growable sequence of lanes for one room.
#[derive(Debug, Clone)]
pub struct SlotPool {
    initial_lanes: usize,
    units: Vec<PlacementUnit>,
    lanes: Vec<Lane>,
}

impl SlotPool {
    /// Creates a pool with `max(1, initial_lanes)` empty lanes.
    pub fn new(initial_lanes: usize) -> Self {
        let initial_lanes = initial_lanes.max(1);
        Self {
            initial_lanes,
            units: Vec::new(),
            lanes: (0..initial_lanes).map(Lane::new).collect(),
        }
    }

    /// Current number of lanes.
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// Lanes created on construction.
    pub fn initial_lanes(&self) -> usize {
        self.initial_lanes
    }

    /// Units placed so far, in placement order.
    pub fn units(&self) -> &[PlacementUnit] {
        &self.units
    }

    /// A lane by index.
    pub fn lane(&self, index: usize) -> Option<&Lane> {
        self.lanes.get(index)
    }

    /// Units placed in a lane, in append order. Empty for a missing lane.
    pub fn units_in(&self, index: usize) -> impl Iterator<Item = &PlacementUnit> + '_ {
        self.lanes
            .get(index)
            .map(|lane| lane.entries.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |&i| &self.units[i])
    }

    /// Whether `span` can go into the lane with `buffer` clearance on both sides.
    ///
    /// Missing lanes accept everything.
    pub fn lane_accepts(&self, index: usize, span: Option<&TimeSpan>, buffer: Duration) -> bool {
        self.units_in(index)
            .all(|placed| !spans_conflict(span, placed.span(), buffer))
    }

    /// Whether every lane in `lanes` accepts `span`.
    pub fn range_accepts(&self, lanes: Range<usize>, span: Option<&TimeSpan>, buffer: Duration) -> bool {
        lanes.into_iter().all(|i| self.lane_accepts(i, span, buffer))
    }

    /// Whether the lane holds a unit overlapping `span`. Missing lanes are free.
    pub fn occupied_at(&self, index: usize, span: Option<&TimeSpan>) -> bool {
        !self.lane_accepts(index, span, Duration::zero())
    }

    /// Number of lane entries across `lanes`.
    ///
    /// A unit spanning several of these lanes is counted once per lane.
    pub fn entry_count(&self, lanes: Range<usize>) -> usize {
        lanes
            .filter_map(|i| self.lanes.get(i))
            .map(Lane::len)
            .sum()
    }

    /// Appends lanes until there are at least `count`.
    pub fn grow_to(&mut self, count: usize) {
        while self.lanes.len() < count {
            let index = self.lanes.len();
            self.lanes.push(Lane::new(index));
        }
    }

    /// Places `unit` at lanes `[start, start + width)`, growing the pool as needed.
    ///
    /// Returns the index of the unit in placement order. Feasibility is the
    /// caller's concern.
    pub fn commit(&mut self, mut unit: PlacementUnit, start: usize) -> usize {
        let end = start + unit.width();
        self.grow_to(end);

        let idx = self.units.len();
        unit.set_starting_lane(start);
        self.units.push(unit);
        for lane in &mut self.lanes[start..end] {
            lane.entries.push(idx);
        }
        idx
    }

    /// Consumes the pool into the final per-room listing.
    pub fn into_layout(self, room: impl Into<String>, day: NaiveDate) -> RoomLayout {
        RoomLayout::new(room.into(), day, self.initial_lanes, self.units, self.lanes)
    }
}
