//! Slot assignment.
//!
//! Places the units of each room into a growable set of parallel lanes so
//! that no two units sharing a lane overlap in time.
//!
//! # Components
//!
//! - [`SlotPool`]: lanes of one room, only ever growing
//! - [`SlotAssigner`]: greedy scored placement of one room/day
//! - [`DayPlanner`]: every room of a day, optionally in parallel
//! - [`LayoutStats`]: summary indicators of a finished layout
//!
//! # Guarantees
//!
//! - Every unit is placed; the pool grows instead of failing.
//! - A unit of width `w` occupies lanes `[s, s + w)` and appears in each.
//! - Identical inputs produce identical layouts.

mod engine;
mod planner;
mod pool;
mod stats;

pub use engine::{feasible_starts, SlotAssigner};
pub use planner::{DayLayout, DayPlanner, PlannerConfig};
pub use pool::SlotPool;
pub use stats::LayoutStats;
