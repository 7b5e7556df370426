//! Search entry points (score, filter, order)
//!
//! Every call is a pure function of its arguments: no caches outlive the call
//! (apart from what a `SearchDocument` memoizes about itself), no I/O, no
//! errors. Degenerate queries yield an empty list rather than the unfiltered
//! input. Callers are expected to bound the candidate count.

use tracing::{debug, trace};

use crate::candidate::SearchDocument;
use crate::normalize::{normalize, tokenize};
use crate::options::ScoringOptions;
use crate::ranking::{sort_scored, ScoredCandidate, SortDirection};
use crate::scoring::score_normalized_field;

/// Score, filter and order `docs` against `query`, keeping the scores.
pub fn search_scored<'a, D: SearchDocument>(
    docs: &'a [D],
    query: &str,
    direction: SortDirection,
    options: &ScoringOptions,
) -> Vec<ScoredCandidate<'a, D>> {
    let query_tokens = tokenize(query, options.min_token_length);
    if query_tokens.is_empty() {
        trace!(min_token_length = options.min_token_length, "query produced no tokens");
        return Vec::new();
    }

    let normalized_query = normalize(query);
    if normalized_query.is_empty() {
        return Vec::new();
    }

    #[cfg(feature = "perf-log")]
    let t0 = std::time::Instant::now();

    let mut scored: Vec<ScoredCandidate<'a, D>> = docs
        .iter()
        .filter_map(|doc| {
            let score = score_normalized_field(&doc.normalized_text(), &normalized_query, &query_tokens, options)?;
            (score <= options.threshold).then_some(ScoredCandidate { candidate: doc, score })
        })
        .collect();

    sort_scored(&mut scored, direction);

    debug!(
        candidates = docs.len(),
        query_tokens = query_tokens.len(),
        matched = scored.len(),
        threshold = options.threshold,
        "fuzzy search complete"
    );

    #[cfg(feature = "perf-log")]
    eprintln!(
        "[perf] search={:.1}ms candidates={} matched={}",
        t0.elapsed().as_secs_f64() * 1000.0,
        docs.len(),
        scored.len(),
    );

    scored
}

/// Documents that approximately match `query`, best first, then by
/// `published_at` in `direction`, then by id.
pub fn search<'a, D: SearchDocument>(
    docs: &'a [D],
    query: &str,
    direction: SortDirection,
    options: &ScoringOptions,
) -> Vec<&'a D> {
    search_scored(docs, query, direction, options)
        .into_iter()
        .map(|scored| scored.candidate)
        .collect()
}

/// Same as `search` but returns the ordered ids only.
pub fn search_ids<D: SearchDocument>(
    docs: &[D],
    query: &str,
    direction: SortDirection,
    options: &ScoringOptions,
) -> Vec<String> {
    search_scored(docs, query, direction, options)
        .into_iter()
        .map(|scored| scored.candidate.id().to_string())
        .collect()
}
