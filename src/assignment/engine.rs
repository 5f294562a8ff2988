//! Greedy slot assignment engine.
//!
//! # Algorithm
//!
//! For each placement unit, in grouper-output order:
//! 1. Collect every starting lane `s` with `s + width <= lanes` where all
//!    lanes `[s, s + width)` hold nothing overlapping the unit.
//! 2. If none exists, start at `s = lanes` (brand-new lanes).
//! 3. Otherwise score each feasible `s` and keep the first strict maximum
//!    in increasing lane order.
//! 4. Grow the pool if needed and append the unit to its lanes.
//!
//! # Complexity
//! O(u × l × e) where u=units, l=lanes, e=entries per lane.

use chrono::{Duration, NaiveDate};
use tracing::{debug, instrument, trace, warn};

use super::SlotPool;
use crate::error::{PlacementError, PlacementResult};
use crate::grouping::{group_activities, ProcessingOrder};
use crate::models::{Activity, PlacementUnit, RoomConfig, RoomLayout, WeightProfile};
use crate::scoring::{PlacementContext, Score, Scorer};
use crate::validation::validate_activities;

/// Assigns placement units of one room/day to lanes.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_slot::assignment::SlotAssigner;
/// use u_slot::models::{Activity, RoomConfig, WeightProfile};
///
/// let day = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
/// let at = |h| day.and_hms_opt(h, 0, 0).unwrap();
/// let room = RoomConfig::new("museo").with_capacity(1);
/// let activities = vec![
///     Activity::new("A", "museo").with_span(at(9), at(10)),
///     Activity::new("B", "museo").with_span(at(10), at(11)),
/// ];
///
/// let layout = SlotAssigner::new()
///     .place_room(&room, day, activities, &WeightProfile::default())
///     .unwrap();
/// assert_eq!(layout.lane_count(), 1);
/// assert_eq!(layout.placed_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SlotAssigner {
    scorer: Scorer,
    order: ProcessingOrder,
}

impl SlotAssigner {
    /// Creates an assigner with the standard scorer, keeping input order.
    pub fn new() -> Self {
        Self {
            scorer: Scorer::standard(),
            order: ProcessingOrder::AsGiven,
        }
    }

    /// Replaces the scorer.
    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Sets the order activities are handed to the grouper in.
    pub fn with_order(mut self, order: ProcessingOrder) -> Self {
        self.order = order;
        self
    }

    /// The scorer in use.
    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Validates, groups and places one room's activities for one day.
    ///
    /// # Errors
    /// `InvalidInput` with every validation problem found; nothing is placed.
    pub fn place_room(
        &self,
        room: &RoomConfig,
        day: NaiveDate,
        mut activities: Vec<Activity>,
        weights: &WeightProfile,
    ) -> PlacementResult<RoomLayout> {
        if let Err(errors) = validate_activities(&room.code, day, &activities) {
            warn!(room = %room.code, %day, errors = errors.len(), "rejecting room input");
            return Err(PlacementError::InvalidInput {
                room: room.code.clone(),
                day,
                errors,
            });
        }

        self.order.apply(&mut activities);
        let units = group_activities(activities, room.allow_grouping)?;
        Ok(self.assign(room, day, units, weights))
    }

    /// Places pre-grouped units in the given order. Never fails.
    #[instrument(skip_all, fields(room = %room.code, %day, units = units.len()))]
    pub fn assign(
        &self,
        room: &RoomConfig,
        day: NaiveDate,
        units: Vec<PlacementUnit>,
        weights: &WeightProfile,
    ) -> RoomLayout {
        let mut pool = SlotPool::new(room.initial_lanes());

        for unit in units {
            let start = self.select_start(&pool, &unit, weights);
            let before = pool.lane_count();
            let width = unit.width();
            pool.commit(unit, start);

            if pool.lane_count() > before {
                debug!(from = before, to = pool.lane_count(), "grew lane pool");
            }
            debug!(start, width, "placed unit");
        }

        pool.into_layout(room.code.clone(), day)
    }

    /// Starting lane for `unit` in the current pool.
    ///
    /// Falls back to `pool.lane_count()` when nothing fits.
    pub fn select_start(&self, pool: &SlotPool, unit: &PlacementUnit, weights: &WeightProfile) -> usize {
        let mut best: Option<(usize, Score)> = None;

        for start in feasible_starts(pool, unit) {
            let score = self
                .scorer
                .score(&PlacementContext::new(unit, start, pool, weights));
            trace!(start, score, "candidate");

            // strict `>` keeps the leftmost of equal scores
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((start, score));
            }
        }

        best.map_or(pool.lane_count(), |(start, _)| start)
    }
}

/// Starting lanes where `unit` fits without overlap, in increasing order.
///
/// Only existing lanes are considered; an empty result means the unit
/// needs new lanes.
pub fn feasible_starts(pool: &SlotPool, unit: &PlacementUnit) -> Vec<usize> {
    let width = unit.width();
    let lanes = pool.lane_count();
    if width > lanes {
        return Vec::new();
    }

    (0..=lanes - width)
        .filter(|&s| pool.range_accepts(s..s + width, unit.span(), Duration::zero()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeightTable;
    use crate::scoring::terms;
    use chrono::NaiveDateTime;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 14).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        day().and_hms_opt(h, m, 0).unwrap()
    }

    fn visit(id: &str, start: (u32, u32), end: (u32, u32)) -> Activity {
        Activity::new(id, "museo").with_span(at(start.0, start.1), at(end.0, end.1))
    }

    fn lane_of(layout: &RoomLayout, id: &str) -> usize {
        layout
            .unit_for_activity(id)
            .and_then(|u| u.starting_lane())
            .unwrap()
    }

    fn place(room: &RoomConfig, activities: Vec<Activity>) -> RoomLayout {
        SlotAssigner::new()
            .place_room(room, day(), activities, &WeightProfile::default())
            .unwrap()
    }

    #[test]
    fn test_conflict_forces_growth() {
        let room = RoomConfig::new("museo").with_capacity(1);
        let layout = place(
            &room,
            vec![
                visit("A", (9, 0), (10, 0)),
                visit("B", (10, 0), (11, 0)),
                visit("C", (9, 30), (10, 30)),
            ],
        );

        assert_eq!(lane_of(&layout, "A"), 0);
        assert_eq!(lane_of(&layout, "B"), 0);
        assert_eq!(lane_of(&layout, "C"), 1);
        assert_eq!(layout.lane_count(), 2);
        assert!(layout.verify().is_empty());
    }

    #[test]
    fn test_operator_affinity_beats_empty_lane() {
        let room = RoomConfig::new("museo").with_capacity(2);
        let layout = place(
            &room,
            vec![
                visit("A", (9, 0), (10, 0)).with_operator("OP1"),
                visit("X", (9, 0), (10, 0)).with_operator("OP2"),
                visit("B", (10, 30), (11, 30)).with_operator("OP1"),
            ],
        );

        assert_eq!(lane_of(&layout, "A"), 0);
        assert_eq!(lane_of(&layout, "X"), 1);
        assert_eq!(lane_of(&layout, "B"), 0);
    }

    #[test]
    fn test_operator_affinity_pulls_to_right_lane() {
        let room = RoomConfig::new("museo").with_capacity(2);
        let layout = place(
            &room,
            vec![
                visit("X", (9, 0), (10, 0)).with_operator("OP2"),
                visit("A", (9, 0), (10, 0)).with_operator("OP1"),
                visit("B", (10, 30), (11, 30)).with_operator("OP1"),
            ],
        );

        assert_eq!(lane_of(&layout, "A"), 1);
        assert_eq!(lane_of(&layout, "B"), 1);
    }

    #[test]
    fn test_equal_scores_pick_leftmost() {
        let room = RoomConfig::new("museo").with_capacity(3);
        let scorer = Scorer::new().with_term(terms::SmallClearance);
        let assigner = SlotAssigner::new().with_scorer(scorer);

        let layout = assigner
            .place_room(
                &room,
                day(),
                vec![visit("A", (9, 0), (10, 0))],
                &WeightProfile::default(),
            )
            .unwrap();
        assert_eq!(lane_of(&layout, "A"), 0);
    }

    #[test]
    fn test_unconstrained_unit_placed_by_score() {
        let room = RoomConfig::new("museo").with_capacity(2);
        let layout = place(
            &room,
            vec![
                visit("A", (9, 0), (10, 0)),
                visit("B", (9, 0), (10, 0)),
                Activity::new("F", "museo"),
            ],
        );

        // both lanes accept it; lane 0 wins on the tie-break
        assert_eq!(lane_of(&layout, "F"), 0);
        assert_eq!(layout.lane_count(), 2);
    }

    #[test]
    fn test_zero_capacity_starts_with_one_lane() {
        let room = RoomConfig::new("museo").with_capacity(0);
        let layout = place(&room, Vec::new());
        assert_eq!(layout.lane_count(), 1);
        assert_eq!(layout.placed_count(), 0);
    }

    #[test]
    fn test_wide_unit_spans_contiguous_lanes() {
        let room = RoomConfig::new("museo").with_capacity(4).with_grouping(true);
        let rows = (1..=3)
            .map(|i| visit(&format!("R{i}"), (10, 0), (11, 0)).with_kind("visit"))
            .collect();
        let layout = place(&room, rows);

        assert_eq!(layout.placed_count(), 1);
        let unit = &layout.units()[0];
        assert_eq!(unit.width(), 3);
        assert_eq!(unit.starting_lane(), Some(0));
        for lane in 0..3 {
            assert_eq!(layout.lane(lane).unwrap().len(), 1);
        }
        assert!(layout.lane(3).unwrap().is_empty());
    }

    #[test]
    fn test_wide_unit_without_room_grows_past_end() {
        let room = RoomConfig::new("museo").with_capacity(2).with_grouping(true);
        let mut rows = vec![visit("A", (10, 0), (11, 0))];
        rows.extend((1..=3).map(|i| visit(&format!("R{i}"), (10, 0), (11, 0)).with_kind("visit")));
        let layout = place(&room, rows);

        let wide = layout.unit_for_activity("R1").unwrap();
        assert_eq!(wide.starting_lane(), Some(2));
        assert_eq!(layout.lane_count(), 5);
        assert!(layout.verify().is_empty());
    }

    #[test]
    fn test_wide_unit_wider_than_pool_starts_after_last_lane() {
        let room = RoomConfig::new("museo").with_capacity(1).with_grouping(true);
        let rows = (1..=3)
            .map(|i| visit(&format!("R{i}"), (10, 0), (11, 0)).with_kind("visit"))
            .collect();
        let layout = place(&room, rows);

        assert_eq!(layout.units()[0].starting_lane(), Some(1));
        assert_eq!(layout.lane_count(), 4);
        assert!(layout.lane(0).unwrap().is_empty());
    }

    #[test]
    fn test_lanes_only_ever_append() {
        let assigner = SlotAssigner::new();
        let weights = WeightProfile::default();
        let mut pool = SlotPool::new(1);
        let rows = vec![
            visit("A", (9, 0), (10, 0)),
            visit("B", (9, 0), (10, 0)),
            visit("C", (9, 30), (11, 0)),
            visit("D", (10, 0), (11, 0)),
            visit("E", (9, 0), (12, 0)),
            visit("F", (13, 0), (14, 0)),
        ];

        let mut previous: Vec<Vec<usize>> = vec![Vec::new()];
        for row in rows {
            let unit = PlacementUnit::new(row).unwrap();
            let start = assigner.select_start(&pool, &unit, &weights);
            pool.commit(unit, start);

            assert!(pool.lane_count() >= previous.len());
            for (i, before) in previous.iter().enumerate() {
                let lane = pool.lane(i).unwrap();
                assert_eq!(lane.index, i);
                assert!(lane.entries.starts_with(before));
            }
            for i in previous.len()..pool.lane_count() {
                assert_eq!(pool.lane(i).unwrap().index, i);
            }
            previous = (0..pool.lane_count())
                .map(|i| pool.lane(i).unwrap().entries.clone())
                .collect();
        }

        assert_eq!(pool.lane_count(), 4);
    }

    #[test]
    fn test_feasible_starts() {
        let mut pool = SlotPool::new(3);
        pool.commit(PlacementUnit::new(visit("A", (9, 0), (10, 0))).unwrap(), 1);

        let probe = PlacementUnit::new(visit("P", (9, 30), (10, 30))).unwrap();
        assert_eq!(feasible_starts(&pool, &probe), vec![0, 2]);

        let wide = PlacementUnit::from_activities(vec![
            visit("W1", (9, 30), (10, 30)),
            visit("W2", (9, 30), (10, 30)),
        ])
        .unwrap();
        assert!(feasible_starts(&pool, &wide).is_empty());

        let later = PlacementUnit::from_activities(vec![
            visit("L1", (10, 0), (11, 0)),
            visit("L2", (10, 0), (11, 0)),
        ])
        .unwrap();
        assert_eq!(feasible_starts(&pool, &later), vec![0, 1]);
    }

    #[test]
    fn test_invalid_input_is_rejected_with_context() {
        let room = RoomConfig::new("museo");
        let err = SlotAssigner::new()
            .place_room(
                &room,
                day(),
                vec![visit("BAD", (11, 0), (10, 0))],
                &WeightProfile::default(),
            )
            .unwrap_err();

        match err {
            PlacementError::InvalidInput { room, day: d, errors } => {
                assert_eq!(room, "museo");
                assert_eq!(d, day());
                assert!(errors[0].message.contains("BAD"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_room_override_changes_choice() {
        let room = RoomConfig::new("museo").with_capacity(2);
        let rows = vec![
            visit("A", (9, 0), (10, 0)).with_operator("OP1"),
            visit("B", (10, 30), (11, 30)).with_operator("OP1"),
        ];

        let table = WeightTable::new().with_room(
            "museo",
            WeightProfile {
                operator_affinity: 0,
                per_other_activity: 5,
                ..WeightProfile::default()
            },
        );

        let default_layout = place(&room, rows.clone());
        assert_eq!(lane_of(&default_layout, "B"), 0);

        let override_layout = SlotAssigner::new()
            .place_room(&room, day(), rows, table.profile_for("museo"))
            .unwrap();
        assert_eq!(lane_of(&override_layout, "B"), 1);
    }

    #[test]
    fn test_chronological_order_option() {
        let room = RoomConfig::new("museo").with_capacity(1);
        let rows = vec![
            visit("late", (11, 0), (12, 0)),
            visit("early", (9, 0), (10, 0)),
        ];

        let layout = SlotAssigner::new()
            .with_order(ProcessingOrder::Chronological)
            .place_room(&room, day(), rows, &WeightProfile::default())
            .unwrap();
        assert_eq!(layout.units()[0].activities()[0].id, "early");

        let ids: Vec<_> = layout
            .lane(0)
            .unwrap()
            .units()
            .map(|u| u.activities()[0].id.as_str())
            .collect();
        assert_eq!(ids, vec!["early", "late"]);
    }

    #[test]
    fn test_lane_keeps_append_order_not_time_order() {
        let room = RoomConfig::new("museo").with_capacity(1);
        let layout = place(
            &room,
            vec![visit("late", (11, 0), (12, 0)), visit("early", (9, 0), (10, 0))],
        );
        let ids: Vec<_> = layout
            .lane(0)
            .unwrap()
            .units()
            .map(|u| u.activities()[0].id.as_str())
            .collect();
        assert_eq!(ids, vec!["late", "early"]);
    }
}
