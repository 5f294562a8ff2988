//! Scoring weight profiles.
//!
//! A [`WeightProfile`] holds the non-negative weights of the placement
//! score terms. Profiles are looked up per room in a [`WeightTable`];
//! unknown room codes silently use the table's default profile.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Buffer, in minutes, required on both sides for the small clearance bonus.
pub const SMALL_CLEARANCE_MINUTES: i64 = 1;

/// Buffer, in minutes, required on both sides for the large clearance bonus.
pub const LARGE_CLEARANCE_MINUTES: i64 = 30;

/// Small clearance buffer as a duration.
pub fn small_clearance() -> Duration {
    Duration::minutes(SMALL_CLEARANCE_MINUTES)
}

/// Large clearance buffer as a duration.
pub fn large_clearance() -> Duration {
    Duration::minutes(LARGE_CLEARANCE_MINUTES)
}

/// Weights of the placement score terms.
///
/// All values are non-negative magnitudes; the scorer applies the sign
/// of each term. Negative values are rejected on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightProfile {
    /// Bonus when the unit fits with the small buffer.
    pub small_clearance: u32,
    /// Bonus when the unit fits with the large buffer.
    pub large_clearance: u32,
    /// Penalty when the lane right after the occupied range is busy.
    pub right_immediate: u32,
    /// Penalty when the second lane to the right is busy.
    pub right_second: u32,
    /// Penalty when the lane right before the occupied range is busy.
    pub left_immediate: u32,
    /// Bonus when an occupied lane already hosts the same operator.
    pub operator_affinity: u32,
    /// Bonus when an occupied lane already hosts the same group/booking.
    pub group_affinity: u32,
    /// Penalty per unit already present in the occupied lanes.
    pub per_other_activity: u32,
}

impl Default for WeightProfile {
    fn default() -> Self {
        Self {
            small_clearance: 10,
            large_clearance: 5,
            right_immediate: 4,
            right_second: 2,
            left_immediate: 0,
            operator_affinity: 8,
            group_affinity: 6,
            per_other_activity: 1,
        }
    }
}

impl WeightProfile {
    /// A profile with every weight at zero (only the leftmost tie-break remains).
    pub fn zero() -> Self {
        Self {
            small_clearance: 0,
            large_clearance: 0,
            right_immediate: 0,
            right_second: 0,
            left_immediate: 0,
            operator_affinity: 0,
            group_affinity: 0,
            per_other_activity: 0,
        }
    }
}

/// Weight profiles keyed by room code, with a default fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightTable {
    /// Profile used for rooms without an override.
    pub default: WeightProfile,
    /// Per-room overrides.
    pub rooms: HashMap<String, WeightProfile>,
}

impl WeightTable {
    /// Creates a table holding only the default profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the default profile.
    pub fn with_default(mut self, profile: WeightProfile) -> Self {
        self.default = profile;
        self
    }

    /// Builder: adds a room override.
    pub fn with_room(mut self, room: impl Into<String>, profile: WeightProfile) -> Self {
        self.insert(room, profile);
        self
    }

    /// Adds or replaces a room override.
    pub fn insert(&mut self, room: impl Into<String>, profile: WeightProfile) {
        self.rooms.insert(room.into(), profile);
    }

    /// Profile for a room, falling back to the default.
    pub fn profile_for(&self, room: &str) -> &WeightProfile {
        self.rooms.get(room).unwrap_or(&self.default)
    }

    /// Whether the room has its own override.
    pub fn has_override(&self, room: &str) -> bool {
        self.rooms.contains_key(room)
    }
}
