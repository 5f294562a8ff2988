//! Layout statistics.
//!
//! Summarizes a completed room layout.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Placed units | Units committed to the layout |
//! | Placed activities | Activities across all units |
//! | Lane count | Final number of lanes |
//! | Grown lanes | Lanes added beyond the initial pool |
//! | Busiest lane | Largest entry count of a single lane |
//! | Lane fill | Fraction of lanes holding at least one entry |

use crate::models::RoomLayout;

/// Room layout indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutStats {
    /// Units placed.
    pub placed_units: usize,
    /// Activities placed (sum of unit widths).
    pub placed_activities: usize,
    /// Final lane count.
    pub lane_count: usize,
    /// Lanes created after the initial pool.
    pub grown_lanes: usize,
    /// Entry count of the busiest lane.
    pub busiest_lane_entries: usize,
    /// Fraction of lanes that are not empty (0.0..1.0).
    pub lane_fill: f64,
}

impl LayoutStats {
    /// Computes statistics from a room layout.
    pub fn calculate(layout: &RoomLayout) -> Self {
        let lane_count = layout.lane_count();
        let mut busiest = 0;
        let mut used = 0;

        for lane in layout.lanes() {
            busiest = busiest.max(lane.len());
            if !lane.is_empty() {
                used += 1;
            }
        }

        let lane_fill = if lane_count == 0 {
            0.0
        } else {
            used as f64 / lane_count as f64
        };

        Self {
            placed_units: layout.placed_count(),
            placed_activities: layout.activity_count(),
            lane_count,
            grown_lanes: lane_count.saturating_sub(layout.initial_lanes()),
            busiest_lane_entries: busiest,
            lane_fill,
        }
    }

    /// Whether the layout stayed within its initial lanes.
    pub fn fits_capacity(&self) -> bool {
        self.grown_lanes == 0
    }
}
