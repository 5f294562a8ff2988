//! Placement context for scoring term evaluation.

use std::ops::Range;

use chrono::Duration;

use crate::assignment::SlotPool;
use crate::models::{PlacementUnit, WeightProfile};

/// A candidate placement: a unit, a starting lane, the pool it would go
/// into, and the room's weights.
#[derive(Debug, Clone, Copy)]
pub struct PlacementContext<'a> {
    /// Unit being placed.
    pub unit: &'a PlacementUnit,
    /// Candidate starting lane.
    pub start: usize,
    /// Current lane pool of the room.
    pub pool: &'a SlotPool,
    /// Weight profile of the room.
    pub weights: &'a WeightProfile,
}

impl<'a> PlacementContext<'a> {
    /// Creates a context.
    pub fn new(
        unit: &'a PlacementUnit,
        start: usize,
        pool: &'a SlotPool,
        weights: &'a WeightProfile,
    ) -> Self {
        Self {
            unit,
            start,
            pool,
            weights,
        }
    }

    /// Lanes the unit would occupy.
    pub fn lanes(&self) -> Range<usize> {
        self.start..self.start + self.unit.width()
    }

    /// Whether the unit fits in all its lanes with `buffer` on both sides.
    pub fn clear_by(&self, buffer: Duration) -> bool {
        self.pool.range_accepts(self.lanes(), self.unit.span(), buffer)
    }

    /// Whether the lane `offset` positions right of the occupied range is busy.
    ///
    /// `offset == 0` is the lane immediately to the right.
    pub fn right_occupied(&self, offset: usize) -> bool {
        self.pool
            .occupied_at(self.lanes().end + offset, self.unit.span())
    }

    /// Whether the lane immediately left of the occupied range is busy.
    pub fn left_occupied(&self) -> bool {
        self.start
            .checked_sub(1)
            .is_some_and(|lane| self.pool.occupied_at(lane, self.unit.span()))
    }

    /// Units already placed in any of the lanes the unit would occupy.
    pub fn placed_units(&self) -> impl Iterator<Item = &'a PlacementUnit> + 'a {
        let pool = self.pool;
        self.lanes().flat_map(move |lane| pool.units_in(lane))
    }
}
