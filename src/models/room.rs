//! Room model.
//!
//! A room is a physical resource with its own independent lane pool.
//! Its capacity is a hint for the initial number of lanes, not a ceiling:
//! the engine grows the pool whenever nothing fits.

use serde::{Deserialize, Serialize};

/// Per-room placement settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Room code.
    pub code: String,
    /// Preferred number of lanes (0 is treated as 1).
    #[serde(default)]
    pub capacity: usize,
    /// Whether activities sharing an interval are merged into one unit.
    #[serde(default)]
    pub allow_grouping: bool,
}

impl RoomConfig {
    /// Creates a single-lane room without grouping.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            capacity: 1,
            allow_grouping: false,
        }
    }

    /// Sets the capacity hint.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Enables or disables grouping.
    pub fn with_grouping(mut self, allow: bool) -> Self {
        self.allow_grouping = allow;
        self
    }

    /// Lanes created before any placement.
    pub fn initial_lanes(&self) -> usize {
        self.capacity.max(1)
    }
}
