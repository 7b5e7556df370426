//! Result ordering.
//!
//! Survivors are ordered by a lexicographic tuple where earlier keys always
//! dominate later ones:
//! 1. score ascending (lower dissimilarity first)
//! 2. published_at, direction chosen by the caller
//! 3. id ascending, so the order is total and deterministic

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::candidate::SearchDocument;
use crate::interface::SearchError;

/// Tie-break direction for the publication timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    /// Lenient query-parameter parsing: `"asc"` (any case, trimmed) is ascending,
    /// everything else falls back to descending.
    pub fn from_param(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("asc") {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        }
    }
}

impl FromStr for SortDirection {
    type Err = SearchError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(SearchError::InvalidSortDirection(value.to_string())),
        }
    }
}

/// A document that passed the threshold, with its field score (lower = better).
#[derive(Debug)]
pub struct ScoredCandidate<'a, D> {
    pub candidate: &'a D,
    pub score: f64,
}

impl<D> Clone for ScoredCandidate<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for ScoredCandidate<'_, D> {}

/// Total order over scored candidates.
pub fn compare_scored<D: SearchDocument>(
    left: &ScoredCandidate<'_, D>,
    right: &ScoredCandidate<'_, D>,
    direction: SortDirection,
) -> Ordering {
    left.score
        .total_cmp(&right.score)
        .then_with(|| {
            let (l, r) = (left.candidate.published_at(), right.candidate.published_at());
            match direction {
                SortDirection::Ascending => l.cmp(&r),
                SortDirection::Descending => r.cmp(&l),
            }
        })
        .then_with(|| left.candidate.id().cmp(right.candidate.id()))
}

pub(crate) fn sort_scored<D: SearchDocument>(scored: &mut [ScoredCandidate<'_, D>], direction: SortDirection) {
    scored.sort_unstable_by(|a, b| compare_scored(a, b, direction));
}
