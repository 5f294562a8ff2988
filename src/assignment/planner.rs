//! Day planner: runs the per-room pipeline for every room of a day.
//!
//! Rooms are independent, so each one gets its own pool and, when
//! `parallel` is set, its own rayon task. Results are always reported in
//! room-code order regardless of how they were computed.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::{LayoutStats, SlotAssigner};
use crate::error::PlacementResult;
use crate::grouping::ProcessingOrder;
use crate::models::{Activity, RoomConfig, RoomLayout, WeightTable};
use crate::scoring::Scorer;

/// Configuration of a day planning run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Known rooms. Others use capacity 1 without grouping.
    pub rooms: Vec<RoomConfig>,
    /// Weight profiles with per-room overrides.
    pub weights: WeightTable,
    /// Order activities are grouped and placed in.
    pub order: ProcessingOrder,
    /// Place rooms concurrently.
    pub parallel: bool,
}

impl PlannerConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a room.
    pub fn with_room(mut self, room: RoomConfig) -> Self {
        self.rooms.push(room);
        self
    }

    /// Sets the weight table.
    pub fn with_weights(mut self, weights: WeightTable) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the processing order.
    pub fn with_order(mut self, order: ProcessingOrder) -> Self {
        self.order = order;
        self
    }

    /// Enables or disables concurrent room placement.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Configuration for a room, falling back to capacity 1 without grouping.
    pub fn room(&self, code: &str) -> RoomConfig {
        self.rooms
            .iter()
            .find(|r| r.code == code)
            .cloned()
            .unwrap_or_else(|| RoomConfig::new(code))
    }
}

/// Layouts of every room for one day, keyed by room code.
#[derive(Debug, Clone)]
pub struct DayLayout {
    day: NaiveDate,
    rooms: BTreeMap<String, RoomLayout>,
}

impl DayLayout {
    /// The planned day.
    pub fn day(&self) -> NaiveDate {
        self.day
    }

    /// Layout of one room.
    pub fn room(&self, code: &str) -> Option<&RoomLayout> {
        self.rooms.get(code)
    }

    /// Room layouts in room-code order.
    pub fn rooms(&self) -> impl Iterator<Item = &RoomLayout> {
        self.rooms.values()
    }

    /// Number of rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Activities placed across all rooms.
    pub fn total_placed(&self) -> usize {
        self.rooms.values().map(RoomLayout::activity_count).sum()
    }

    /// Rooms that needed more lanes than their capacity, in room-code order.
    pub fn overflowing_rooms(&self) -> Vec<&str> {
        self.rooms
            .iter()
            .filter(|(_, layout)| !LayoutStats::calculate(layout).fits_capacity())
            .map(|(code, _)| code.as_str())
            .collect()
    }

    /// Statistics per room, in room-code order.
    pub fn stats(&self) -> Vec<(&str, LayoutStats)> {
        self.rooms
            .iter()
            .map(|(code, layout)| (code.as_str(), LayoutStats::calculate(layout)))
            .collect()
    }
}

/// Places a full day of activities, room by room.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_slot::assignment::{DayPlanner, PlannerConfig};
/// use u_slot::models::{Activity, RoomConfig};
///
/// let day = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
/// let at = |h| day.and_hms_opt(h, 0, 0).unwrap();
/// let config = PlannerConfig::new()
///     .with_room(RoomConfig::new("museo").with_capacity(2))
///     .with_room(RoomConfig::new("lab"));
///
/// let planner = DayPlanner::new(config);
/// let layout = planner
///     .plan(day, vec![Activity::new("A", "museo").with_span(at(9), at(10))])
///     .unwrap();
///
/// assert_eq!(layout.room_count(), 2);
/// assert_eq!(layout.room("lab").unwrap().placed_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct DayPlanner {
    config: PlannerConfig,
    assigner: SlotAssigner,
}

impl DayPlanner {
    /// Creates a planner with the standard scorer.
    pub fn new(config: PlannerConfig) -> Self {
        let assigner = SlotAssigner::new().with_order(config.order);
        Self { config, assigner }
    }

    /// Replaces the scorer.
    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.assigner = self.assigner.with_scorer(scorer);
        self
    }

    /// The planner configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Places every room's activities for `day`.
    ///
    /// Configured rooms without activities still get an empty layout.
    ///
    /// # Errors
    /// The error of the first failing room in room-code order.
    #[instrument(skip_all, fields(%day, activities = activities.len()))]
    pub fn plan(&self, day: NaiveDate, activities: Vec<Activity>) -> PlacementResult<DayLayout> {
        let by_room = self.partition(activities);

        let results: Vec<PlacementResult<RoomLayout>> = if self.config.parallel {
            by_room
                .into_par_iter()
                .map(|(code, acts)| self.place(&code, day, acts))
                .collect()
        } else {
            by_room
                .into_iter()
                .map(|(code, acts)| self.place(&code, day, acts))
                .collect()
        };

        let mut rooms = BTreeMap::new();
        for result in results {
            let layout = result?;
            rooms.insert(layout.room().to_string(), layout);
        }

        let layout = DayLayout { day, rooms };
        info!(
            rooms = layout.room_count(),
            placed = layout.total_placed(),
            overflowing = layout.overflowing_rooms().len(),
            "day planned"
        );
        Ok(layout)
    }

    fn partition(&self, activities: Vec<Activity>) -> BTreeMap<String, Vec<Activity>> {
        let mut by_room: BTreeMap<String, Vec<Activity>> = self
            .config
            .rooms
            .iter()
            .map(|r| (r.code.clone(), Vec::new()))
            .collect();

        for act in activities {
            by_room.entry(act.room.clone()).or_default().push(act);
        }
        by_room
    }

    fn place(&self, code: &str, day: NaiveDate, activities: Vec<Activity>) -> PlacementResult<RoomLayout> {
        let room = self.config.room(code);
        let weights = self.config.weights.profile_for(code);
        debug!(
            room = code,
            room_weights = self.config.weights.has_override(code),
            "placing room"
        );
        self.assigner.place_room(&room, day, activities, weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlacementError;
    use crate::models::WeightProfile;
    use chrono::NaiveDateTime;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 14).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        day().and_hms_opt(h, m, 0).unwrap()
    }

    fn act(id: &str, room: &str, start: u32, end: u32) -> Activity {
        Activity::new(id, room).with_span(at(start, 0), at(end, 0))
    }

    fn sample() -> Vec<Activity> {
        vec![
            act("M1", "museo", 9, 10),
            act("L1", "lab", 9, 10),
            act("M2", "museo", 9, 11),
            act("L2", "lab", 10, 11),
            act("M3", "museo", 10, 12),
        ]
    }

    fn config() -> PlannerConfig {
        PlannerConfig::new()
            .with_room(RoomConfig::new("museo").with_capacity(2))
            .with_room(RoomConfig::new("lab").with_capacity(1))
            .with_room(RoomConfig::new("atrium").with_capacity(3))
    }

    #[test]
    fn test_rooms_in_code_order() {
        let layout = DayPlanner::new(config()).plan(day(), sample()).unwrap();
        let codes: Vec<_> = layout.rooms().map(|r| r.room()).collect();
        assert_eq!(codes, vec!["atrium", "lab", "museo"]);
        assert_eq!(layout.total_placed(), 5);
        assert_eq!(layout.day(), day());
    }

    #[test]
    fn test_configured_empty_room_has_empty_layout() {
        let layout = DayPlanner::new(config()).plan(day(), sample()).unwrap();
        let atrium = layout.room("atrium").unwrap();
        assert_eq!(atrium.placed_count(), 0);
        assert_eq!(atrium.lane_count(), 3);
    }

    #[test]
    fn test_unknown_room_uses_single_lane() {
        let acts = vec![act("X1", "annex", 9, 10), act("X2", "annex", 9, 10)];
        let layout = DayPlanner::new(PlannerConfig::new()).plan(day(), acts).unwrap();
        let annex = layout.room("annex").unwrap();
        assert_eq!(annex.initial_lanes(), 1);
        assert_eq!(annex.lane_count(), 2);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let seq = DayPlanner::new(config()).plan(day(), sample()).unwrap();
        let par = DayPlanner::new(config().with_parallel(true))
            .plan(day(), sample())
            .unwrap();

        for (a, b) in seq.rooms().zip(par.rooms()) {
            assert_eq!(a.room(), b.room());
            let lanes_a: Vec<_> = a.units().iter().map(|u| u.starting_lane()).collect();
            let lanes_b: Vec<_> = b.units().iter().map(|u| u.starting_lane()).collect();
            assert_eq!(lanes_a, lanes_b);
        }
    }

    #[test]
    fn test_first_failing_room_in_code_order() {
        let mut acts = sample();
        acts.push(Activity::new("M1", "museo"));
        acts.push(act("L9", "lab", 12, 11));

        let err = DayPlanner::new(config().with_parallel(true))
            .plan(day(), acts)
            .unwrap_err();
        match err {
            PlacementError::InvalidInput { room, .. } => assert_eq!(room, "lab"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_room_weight_override_applied() {
        let acts = vec![
            act("A", "museo", 9, 10).with_operator("OP1"),
            Activity::new("B", "museo")
                .with_span(at(10, 30), at(11, 30))
                .with_operator("OP1"),
        ];
        let weights = WeightTable::new().with_room(
            "museo",
            WeightProfile {
                operator_affinity: 0,
                per_other_activity: 5,
                ..WeightProfile::default()
            },
        );
        let cfg = config().with_weights(weights);

        let layout = DayPlanner::new(cfg).plan(day(), acts).unwrap();
        let museo = layout.room("museo").unwrap();
        assert_eq!(museo.unit_for_activity("B").unwrap().starting_lane(), Some(1));
    }

    #[test]
    fn test_stats_per_room() {
        let layout = DayPlanner::new(config()).plan(day(), sample()).unwrap();
        let stats = layout.stats();
        assert_eq!(stats.len(), 3);
        let (code, museo) = &stats[2];
        assert_eq!(*code, "museo");
        assert_eq!(museo.placed_units, 3);
    }

    #[test]
    fn test_overflowing_rooms() {
        let layout = DayPlanner::new(config()).plan(day(), sample()).unwrap();
        // museo: 3 units in 2 lanes; lab: L1 and L2 back to back in 1 lane
        assert!(layout.overflowing_rooms().is_empty());

        let mut acts = sample();
        acts.push(act("L3", "lab", 9, 11));
        let layout = DayPlanner::new(config()).plan(day(), acts).unwrap();
        assert_eq!(layout.overflowing_rooms(), vec!["lab"]);
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "rooms": [{ "code": "museo", "capacity": 2, "allow_grouping": true }],
            "order": "Chronological",
            "parallel": true
        }"#;
        let cfg: PlannerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.rooms.len(), 1);
        assert_eq!(cfg.order, ProcessingOrder::Chronological);
        assert!(cfg.parallel);
        assert_eq!(cfg.room("lab").capacity, 1);
    }
}
