//! Scorer: an ordered set of scoring terms summed into one score.

use std::sync::Arc;

use super::{terms, PlacementContext, Score, ScoringTerm};

/// Sums scoring terms for a candidate placement.
///
/// Scores are plain integer sums, so evaluation is deterministic for
/// identical inputs.
///
/// # Example
/// ```
/// use u_slot::scoring::{terms, Scorer};
///
/// let scorer = Scorer::new()
///     .with_term(terms::OperatorAffinity)
///     .with_term(terms::Leftmost);
/// assert_eq!(scorer.term_names(), vec!["operator_affinity", "leftmost"]);
/// ```
#[derive(Clone)]
pub struct Scorer {
    terms: Vec<Arc<dyn ScoringTerm>>,
}

impl Scorer {
    /// Creates a scorer without terms (every candidate scores 0).
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// The full term set, in table order.
    pub fn standard() -> Self {
        Self::new()
            .with_term(terms::SmallClearance)
            .with_term(terms::LargeClearance)
            .with_term(terms::RightImmediate)
            .with_term(terms::RightSecond)
            .with_term(terms::LeftImmediate)
            .with_term(terms::OperatorAffinity)
            .with_term(terms::GroupAffinity)
            .with_term(terms::Density)
            .with_term(terms::Leftmost)
    }

    /// Adds a term.
    pub fn with_term<T: ScoringTerm + 'static>(mut self, term: T) -> Self {
        self.terms.push(Arc::new(term));
        self
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the scorer has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Term names in evaluation order.
    pub fn term_names(&self) -> Vec<&'static str> {
        self.terms.iter().map(|t| t.name()).collect()
    }

    /// Total score of a candidate placement.
    pub fn score(&self, ctx: &PlacementContext<'_>) -> Score {
        self.terms.iter().map(|t| t.evaluate(ctx)).sum()
    }

    /// Per-term contributions, in evaluation order.
    pub fn breakdown(&self, ctx: &PlacementContext<'_>) -> Vec<(&'static str, Score)> {
        self.terms
            .iter()
            .map(|t| (t.name(), t.evaluate(ctx)))
            .collect()
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for Scorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scorer")
            .field("terms", &self.term_names())
            .finish()
    }
}
