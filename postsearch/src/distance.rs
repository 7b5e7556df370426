//! Token-level dissimilarity: 0 = identical, 1 = unrelated.
//!
//! Containment is checked before edit distance because a query token that is a
//! prefix (or infix) of a longer word is a strong signal even when the edit
//! distance between the two is large ("confi" vs "configuration").

/// Weight applied to the extra-length ratio of a containment match.
/// Keeps every containment hit within [0, 0.2].
const CONTAINMENT_WEIGHT: f64 = 0.2;

/// Query tokens this short only count as contained when they prefix the candidate.
const SHORT_INFIX_MAX_LEN: usize = 2;

pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 1.0;
    }
    value.clamp(0.0, 1.0)
}

/// Levenshtein distance over Unicode scalar values (insert/delete/substitute, unit cost).
///
/// Uses a single rolling row sized to the shorter input.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (long, short) = if a_chars.len() >= b_chars.len() {
        (a_chars, b_chars)
    } else {
        (b_chars, a_chars)
    };

    if short.is_empty() {
        return long.len();
    }

    let mut row: Vec<usize> = (0..=short.len()).collect();
    for (i, lc) in long.iter().enumerate() {
        // `diagonal` holds row[j - 1] from the previous iteration of i
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let cost = usize::from(lc != sc);
            let above = row[j + 1];
            row[j + 1] = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
        }
    }

    row[short.len()]
}

/// Dissimilarity between one query token and one candidate token, in [0, 1].
///
/// 1. Identical tokens score 0.
/// 2. If the candidate contains the query, the score is the fraction of the
///    candidate not covered by the query, scaled by 0.2. Query tokens of one or
///    two chars must be a prefix to count; otherwise they are a non-match (1).
/// 3. Otherwise the Levenshtein distance normalized by the longer length.
pub fn token_distance(query: &str, candidate: &str) -> f64 {
    if query == candidate {
        return 0.0;
    }

    let query_len = query.chars().count();
    let candidate_len = candidate.chars().count();
    if query_len == 0 || candidate_len == 0 {
        return 1.0;
    }

    if candidate.contains(query) {
        if query_len <= SHORT_INFIX_MAX_LEN && !candidate.starts_with(query) {
            return 1.0;
        }
        let extra_ratio = clamp_unit((candidate_len - query_len) as f64 / candidate_len as f64);
        return extra_ratio * CONTAINMENT_WEIGHT;
    }

    let distance = levenshtein(query, candidate);
    clamp_unit(distance as f64 / query_len.max(candidate_len) as f64)
}
