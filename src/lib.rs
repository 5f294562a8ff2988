//! Slot placement for time-bounded activities.
//!
//! Lays out a day's activities (bookings, visits, sessions) of each room
//! into parallel lanes, the columns of a schedule view, so that nothing
//! sharing a lane overlaps in time. Placement is greedy and scored:
//! clearance, busy neighbors, operator/group affinity, crowding and a
//! leftmost tie-break decide among the lanes where a unit fits.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Activity`, `TimeSpan`, `PlacementUnit`,
//!   `RoomConfig`, `WeightProfile`, `RoomLayout`
//! - **`grouping`**: Merges activities sharing an interval into wide units
//! - **`scoring`**: `ScoringTerm` trait, built-in terms and the `Scorer`
//! - **`assignment`**: Lane pool, assignment engine and day planner
//! - **`validation`**: Input integrity checks (intervals, rooms, day, IDs)
//! - **`error`**: `PlacementError`
//!
//! # Pipeline
//!
//! ```text
//! activities ─▶ validate ─▶ group ─▶ assign (score feasible lanes) ─▶ RoomLayout
//! ```
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use u_slot::assignment::{DayPlanner, PlannerConfig};
//! use u_slot::models::{Activity, RoomConfig};
//!
//! let day = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
//! let at = |h, m| day.and_hms_opt(h, m, 0).unwrap();
//!
//! let config = PlannerConfig::new().with_room(RoomConfig::new("museo").with_capacity(1));
//! let layout = DayPlanner::new(config)
//!     .plan(
//!         day,
//!         vec![
//!             Activity::new("A", "museo").with_span(at(9, 0), at(10, 0)),
//!             Activity::new("B", "museo").with_span(at(10, 0), at(11, 0)),
//!             Activity::new("C", "museo").with_span(at(9, 30), at(10, 30)),
//!         ],
//!     )
//!     .unwrap();
//!
//! let museo = layout.room("museo").unwrap();
//! assert_eq!(museo.lane_count(), 2);
//! assert!(museo.verify().is_empty());
//! ```

pub mod assignment;
pub mod error;
pub mod grouping;
pub mod models;
pub mod scoring;
pub mod validation;

pub use error::{PlacementError, PlacementResult};
