//! Placement scoring terms and the scorer that sums them.
//!
//! The scorer only differentiates among feasible starting lanes; it never
//! decides feasibility itself.
//!
//! # Usage
//!
//! ```
//! use u_slot::scoring::{terms, Scorer};
//!
//! let scorer = Scorer::new()
//!     .with_term(terms::SmallClearance)
//!     .with_term(terms::Leftmost);
//! assert_eq!(scorer.len(), 2);
//!
//! let standard = Scorer::standard();
//! assert_eq!(standard.len(), 9);
//! ```

mod context;
mod engine;
pub mod terms;

pub use context::PlacementContext;
pub use engine::Scorer;

use std::fmt::Debug;

/// Signed placement score. **Higher is better.**
pub type Score = i64;

/// One additive term of the placement score.
pub trait ScoringTerm: Send + Sync + Debug {
    /// Term name (e.g., "small_clearance").
    fn name(&self) -> &'static str;

    /// Signed contribution for placing the context's unit at its candidate lane.
    fn evaluate(&self, ctx: &PlacementContext<'_>) -> Score;

    /// Term description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
