//! Built-in scoring terms.
//!
//! # Categories
//!
//! - **Clearance**: small (±1 min) and large (±30 min) temporal buffers
//! - **Neighbors**: busy lanes right and left of the occupied range
//! - **Affinity**: same operator or same group/booking already in the lanes
//! - **Density**: crowding of the occupied lanes
//! - **Tie-break**: prefer the leftmost lane
//!
//! # Sign Convention
//! Weights are magnitudes. Bonuses return `+weight`, penalties `-weight`,
//! and terms whose condition does not hold return 0.

use super::{PlacementContext, Score, ScoringTerm};
use crate::models::{large_clearance, small_clearance};

// ======================== Clearance ========================

/// Bonus when the unit fits with a one-minute buffer in every occupied lane.
#[derive(Debug, Clone, Copy)]
pub struct SmallClearance;

impl ScoringTerm for SmallClearance {
    fn name(&self) -> &'static str {
        "small_clearance"
    }

    fn evaluate(&self, ctx: &PlacementContext<'_>) -> Score {
        if ctx.clear_by(small_clearance()) {
            Score::from(ctx.weights.small_clearance)
        } else {
            0
        }
    }

    fn description(&self) -> &'static str {
        "Fits with a 1 minute buffer"
    }
}

/// Bonus when the unit fits with a thirty-minute buffer in every occupied lane.
#[derive(Debug, Clone, Copy)]
pub struct LargeClearance;

impl ScoringTerm for LargeClearance {
    fn name(&self) -> &'static str {
        "large_clearance"
    }

    fn evaluate(&self, ctx: &PlacementContext<'_>) -> Score {
        if ctx.clear_by(large_clearance()) {
            Score::from(ctx.weights.large_clearance)
        } else {
            0
        }
    }

    fn description(&self) -> &'static str {
        "Fits with a 30 minute buffer"
    }
}

// ======================== Neighbors ========================

/// Penalty when the lane right after the occupied range is busy at this time.
///
/// A busy right neighbor leaves no room to widen the schedule column.
#[derive(Debug, Clone, Copy)]
pub struct RightImmediate;

impl ScoringTerm for RightImmediate {
    fn name(&self) -> &'static str {
        "right_immediate"
    }

    fn evaluate(&self, ctx: &PlacementContext<'_>) -> Score {
        if ctx.right_occupied(0) {
            -Score::from(ctx.weights.right_immediate)
        } else {
            0
        }
    }

    fn description(&self) -> &'static str {
        "Immediate right neighbor busy"
    }
}

/// Penalty when the second lane to the right is busy at this time.
#[derive(Debug, Clone, Copy)]
pub struct RightSecond;

impl ScoringTerm for RightSecond {
    fn name(&self) -> &'static str {
        "right_second"
    }

    fn evaluate(&self, ctx: &PlacementContext<'_>) -> Score {
        if ctx.right_occupied(1) {
            -Score::from(ctx.weights.right_second)
        } else {
            0
        }
    }

    fn description(&self) -> &'static str {
        "Second right neighbor busy"
    }
}

/// Penalty when the lane right before the occupied range is busy at this time.
#[derive(Debug, Clone, Copy)]
pub struct LeftImmediate;

impl ScoringTerm for LeftImmediate {
    fn name(&self) -> &'static str {
        "left_immediate"
    }

    fn evaluate(&self, ctx: &PlacementContext<'_>) -> Score {
        if ctx.left_occupied() {
            -Score::from(ctx.weights.left_immediate)
        } else {
            0
        }
    }

    fn description(&self) -> &'static str {
        "Immediate left neighbor busy"
    }
}

// ======================== Affinity ========================

/// Bonus when an occupied lane already hosts a unit with a shared operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorAffinity;

impl ScoringTerm for OperatorAffinity {
    fn name(&self) -> &'static str {
        "operator_affinity"
    }

    fn evaluate(&self, ctx: &PlacementContext<'_>) -> Score {
        if ctx.placed_units().any(|p| ctx.unit.shares_operator(p)) {
            Score::from(ctx.weights.operator_affinity)
        } else {
            0
        }
    }

    fn description(&self) -> &'static str {
        "Same operator already in lane"
    }
}

/// Bonus when an occupied lane already hosts a unit with a shared group/booking.
#[derive(Debug, Clone, Copy)]
pub struct GroupAffinity;

impl ScoringTerm for GroupAffinity {
    fn name(&self) -> &'static str {
        "group_affinity"
    }

    fn evaluate(&self, ctx: &PlacementContext<'_>) -> Score {
        if ctx.placed_units().any(|p| ctx.unit.shares_group(p)) {
            Score::from(ctx.weights.group_affinity)
        } else {
            0
        }
    }

    fn description(&self) -> &'static str {
        "Same group already in lane"
    }
}

// ======================== Density ========================

/// Penalty proportional to the entries already in the occupied lanes.
#[derive(Debug, Clone, Copy)]
pub struct Density;

impl ScoringTerm for Density {
    fn name(&self) -> &'static str {
        "density"
    }

    fn evaluate(&self, ctx: &PlacementContext<'_>) -> Score {
        let count = ctx.pool.entry_count(ctx.lanes()) as Score;
        -(Score::from(ctx.weights.per_other_activity) * count)
    }

    fn description(&self) -> &'static str {
        "Crowded lanes"
    }
}

// ======================== Tie-break ========================

/// Always subtracts the candidate lane index so equal scores favor the left.
#[derive(Debug, Clone, Copy)]
pub struct Leftmost;

impl ScoringTerm for Leftmost {
    fn name(&self) -> &'static str {
        "leftmost"
    }

    fn evaluate(&self, ctx: &PlacementContext<'_>) -> Score {
        -(ctx.start as Score)
    }

    fn description(&self) -> &'static str {
        "Prefer lower lane index"
    }
}
