//! Slot-placement domain models.
//!
//! Provides the data types the engine consumes and produces: activities
//! and their intervals, placement units, room settings, scoring weight
//! profiles, and the resulting per-room lane layout.
//!
//! # Domain Mappings
//!
//! | u-slot | Museum / school visits | Clinic | Workshop |
//! |--------|------------------------|--------|----------|
//! | Activity | Booking row | Appointment | Session |
//! | PlacementUnit | Class group | Block booking | Team slot |
//! | Room | Exhibition hall | Treatment room | Bench area |
//! | Lane | Printed schedule column | Chair | Bench |

mod activity;
mod layout;
mod room;
mod unit;
mod weights;

pub use activity::{spans_conflict, Activity, TimeSpan};
pub use layout::{Lane, LaneView, RoomLayout, Violation, ViolationType};
pub use room::RoomConfig;
pub use unit::PlacementUnit;
pub use weights::{
    large_clearance, small_clearance, WeightProfile, WeightTable, LARGE_CLEARANCE_MINUTES,
    SMALL_CLEARANCE_MINUTES,
};
