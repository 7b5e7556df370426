//! PostSearch - approximate text matching and ranking for blog posts
//!
//! A pure, synchronous pipeline: normalize -> tokenize -> token distance ->
//! field score -> filter and order. The storage layer hands in candidate records
//! (id, one searchable text, publication time) and gets back the subset that
//! approximately matches the query, best match first, then by recency.
//!
//! Scores are dissimilarities in [0, 1]: lower is better.

pub mod candidate;
pub mod distance;
pub mod interface;
pub mod normalize;
pub mod options;
pub mod post;
pub mod ranking;
pub mod scoring;
pub mod search;

pub use candidate::{Candidate, SearchDocument};
pub use distance::{levenshtein, token_distance};
pub use interface::{SearchError, SearchResult};
pub use normalize::{normalize, tokenize};
pub use options::ScoringOptions;
pub use post::{build_search_text, topic_matches_query, Post, Topic};
pub use ranking::{ScoredCandidate, SortDirection};
pub use scoring::{location_score, score_field};
pub use search::{search, search_ids, search_scored};
