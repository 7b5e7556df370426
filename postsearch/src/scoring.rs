//! Field-level scoring
//!
//! A field score blends three signals, all on the lower-is-better scale:
//! - token score: mean of the best `token_distance` for each query token,
//!   with an AND rule (any query token without a close match rejects the field)
//! - location score: how far from `expected_location` the literal query phrase sits
//! - phrase bonus: a multiplier when the whole normalized query appears verbatim

use crate::distance::{clamp_unit, token_distance};
use crate::normalize::{normalize, tokenize_normalized};
use crate::options::ScoringOptions;

/// Share of the blended score taken by the token score when a location is known.
const TOKEN_WEIGHT: f64 = 0.75;
const LOCATION_WEIGHT: f64 = 0.25;

/// Multiplier rewarding exact phrase containment over scattered token hits.
const PHRASE_BONUS: f64 = 0.72;

/// Char (not byte) offset of the first occurrence of `needle` in `haystack`.
fn char_index(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .find(needle)
        .map(|byte_index| haystack[..byte_index].chars().count())
}

/// Bitap-style score for a match found at `found_location`.
///
/// `errors` is the number of edits in the match; literal hits pass 0 and the
/// score reduces to the positional proximity term.
pub fn location_score(
    pattern_len: usize,
    errors: usize,
    found_location: usize,
    expected_location: i64,
    distance: i64,
) -> f64 {
    if pattern_len == 0 {
        return 1.0;
    }

    let accuracy = errors as f64 / pattern_len as f64;
    let found_location = i64::try_from(found_location).unwrap_or(i64::MAX);
    let proximity = expected_location.abs_diff(found_location) as f64;
    if distance <= 0 {
        return if proximity > 0.0 { 1.0 } else { clamp_unit(accuracy) };
    }

    clamp_unit(accuracy + proximity / distance as f64)
}

/// Positional term for the literal query inside the field, if the query occurs at all.
fn phrase_location_score(
    normalized_query: &str,
    normalized_field: &str,
    options: &ScoringOptions,
) -> Option<f64> {
    if options.ignore_location {
        return None;
    }
    let found = char_index(normalized_field, normalized_query)?;
    Some(location_score(
        normalized_query.chars().count(),
        0,
        found,
        options.expected_location,
        options.location_distance,
    ))
}

/// Score an already-normalized field. Returns `None` when the field is rejected.
pub(crate) fn score_normalized_field(
    normalized_field: &str,
    normalized_query: &str,
    query_tokens: &[String],
    options: &ScoringOptions,
) -> Option<f64> {
    if normalized_field.is_empty() || query_tokens.is_empty() {
        return None;
    }

    let field_tokens = tokenize_normalized(normalized_field, options.min_token_length);
    if field_tokens.is_empty() {
        return None;
    }

    let mut total = 0.0;
    for query_token in query_tokens {
        let mut best = 1.0_f64;
        for field_token in &field_tokens {
            best = best.min(token_distance(query_token, field_token));
            if best == 0.0 {
                break;
            }
        }
        if best > options.threshold {
            return None;
        }
        total += best;
    }

    let mut score = total / query_tokens.len() as f64;

    if let Some(location) = phrase_location_score(normalized_query, normalized_field, options) {
        score = score * TOKEN_WEIGHT + location * LOCATION_WEIGHT;
    }

    if !normalized_query.is_empty() && normalized_field.contains(normalized_query) {
        score *= PHRASE_BONUS;
    }

    Some(clamp_unit(score))
}

/// Score raw `field_text` against a query.
///
/// `query` may be raw or normalized; it is normalized here. `query_tokens`
/// should come from `tokenize(query, options.min_token_length)`.
/// Returns `(score, matched)`; rejected fields are `(1.0, false)`.
pub fn score_field(
    field_text: &str,
    query: &str,
    query_tokens: &[String],
    options: &ScoringOptions,
) -> (f64, bool) {
    let normalized_query = normalize(query);
    match score_normalized_field(&normalize(field_text), &normalized_query, query_tokens, options) {
        Some(score) => (score, true),
        None => (1.0, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::tokenize;

    fn score(field: &str, query: &str, options: &ScoringOptions) -> (f64, bool) {
        let tokens = tokenize(query, options.min_token_length);
        score_field(field, query, &tokens, options)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // ── location_score tests ─────────────────────────────────────

    #[test]
    fn test_location_score_at_expected_position() {
        assert_eq!(location_score(5, 0, 0, 0, 120), 0.0);
    }

    #[test]
    fn test_location_score_decays_with_distance() {
        assert!(approx(location_score(5, 0, 60, 0, 120), 0.5));
        assert_eq!(location_score(5, 0, 500, 0, 120), 1.0);
    }

    #[test]
    fn test_location_score_counts_errors() {
        assert!(approx(location_score(4, 1, 0, 0, 120), 0.25));
    }

    #[test]
    fn test_location_score_zero_distance() {
        assert_eq!(location_score(5, 0, 3, 0, 0), 1.0);
        assert_eq!(location_score(5, 0, 0, 0, 0), 0.0);
        assert_eq!(location_score(5, 0, 2, 0, -10), 1.0);
    }

    #[test]
    fn test_location_score_extreme_expected_location() {
        assert_eq!(location_score(4, 0, 5, i64::MIN, 120), 1.0);
        assert_eq!(location_score(4, 0, 5, i64::MAX, 120), 1.0);
        assert_eq!(location_score(4, 0, usize::MAX, i64::MIN, 0), 1.0);
    }

    #[test]
    fn test_location_score_is_symmetric_around_expected() {
        assert!(approx(location_score(4, 0, 10, 40, 120), 0.25));
        assert!(approx(location_score(4, 0, 70, 40, 120), 0.25));
    }

    #[test]
    fn test_location_score_empty_pattern() {
        assert_eq!(location_score(0, 0, 0, 0, 120), 1.0);
    }

    #[test]
    fn test_char_index_is_rune_based() {
        assert_eq!(char_index("ışık spring", "spring"), Some(5));
        assert_eq!(char_index("abc", "zz"), None);
    }

    // ── score_field tests ────────────────────────────────────────

    #[test]
    fn test_score_field_empty_field_rejected() {
        let options = ScoringOptions::default();
        assert_eq!(score("", "spring", &options), (1.0, false));
        assert_eq!(score(" ... ", "spring", &options), (1.0, false));
    }

    #[test]
    fn test_score_field_all_short_tokens_rejected() {
        let options = ScoringOptions { min_token_length: 3, ..Default::default() };
        assert_eq!(score("a b cd", "spring", &options), (1.0, false));
    }

    #[test]
    fn test_score_field_requires_every_query_token() {
        let options = ScoringOptions::default();
        let (_, matched) = score("spring boot configuration", "spring docker", &options);
        assert!(!matched);
    }

    #[test]
    fn test_score_field_exact_phrase_at_start() {
        // token score 0, location 0, bonus keeps it 0
        let options = ScoringOptions::default();
        assert_eq!(score("spring boot configuration", "spring boot", &options), (0.0, true));
    }

    #[test]
    fn test_score_field_scattered_tokens_without_location() {
        // "spring confi" is not a literal substring, so no location or bonus
        let options = ScoringOptions::default();
        let (s, matched) = score("spring boot configuration properties", "spring confi", &options);
        assert!(matched);
        let confi = 8.0 / 13.0 * 0.2;
        assert!(approx(s, confi / 2.0), "got {s}");
    }

    #[test]
    fn test_score_field_phrase_later_in_field() {
        let options = ScoringOptions::default();
        // "boot" found at char 7 of "spring boot": token score 0,
        // location 7/120 blended at 0.25, then the phrase bonus.
        let (s, matched) = score("spring boot", "boot", &options);
        assert!(matched);
        assert!(approx(s, (7.0 / 120.0) * 0.25 * 0.72), "got {s}");
    }

    #[test]
    fn test_score_field_expected_location_is_symmetric() {
        let options = ScoringOptions { expected_location: 12, ..Default::default() };
        // "boot" sits at char 4 in the first field and char 20 in the second:
        // 8 chars before and 8 chars after the expected offset.
        let (before, matched_before) = score("aaa boot", "boot", &options);
        let (after, matched_after) = score("aaa bbb ccc ddd eee boot", "boot", &options);
        assert!(matched_before && matched_after);
        let expected = (8.0 / 120.0) * 0.25 * 0.72;
        assert!(approx(before, expected), "got {before}");
        assert!(approx(after, expected), "got {after}");
    }

    #[test]
    fn test_score_field_match_at_expected_location_has_no_penalty() {
        let options = ScoringOptions { expected_location: 7, ..Default::default() };
        assert_eq!(score("spring boot", "boot", &options), (0.0, true));
        // the same phrase at the start now pays for its distance from 7
        let (s, _) = score("boot spring", "boot", &options);
        assert!(approx(s, (7.0 / 120.0) * 0.25 * 0.72), "got {s}");
    }

    #[test]
    fn test_score_field_extreme_expected_location_does_not_panic() {
        let options = ScoringOptions { expected_location: i64::MIN, ..Default::default() };
        let (s, matched) = score("spring boot", "boot", &options);
        assert!(matched);
        assert!(approx(s, 0.25 * 0.72), "got {s}");
    }

    #[test]
    fn test_score_field_ignore_location_skips_positional_term() {
        let options = ScoringOptions { ignore_location: true, ..Default::default() };
        assert_eq!(score("spring boot", "boot", &options), (0.0, true));
    }

    #[test]
    fn test_score_field_phrase_bonus_applies_to_containment() {
        let options = ScoringOptions { ignore_location: true, ..Default::default() };
        // "confi" inside "configuration": containment distance times 0.72
        let (s, matched) = score("configuration", "confi", &options);
        assert!(matched);
        assert!(approx(s, 8.0 / 13.0 * 0.2 * 0.72), "got {s}");
    }

    #[test]
    fn test_score_field_normalizes_both_sides() {
        let options = ScoringOptions::default();
        let (s, matched) = score("IĞDIR Işık Festivali", "igdir isik", &options);
        assert!(matched);
        assert_eq!(s, 0.0);
    }

    #[test]
    fn test_score_field_rejects_above_threshold() {
        let options = ScoringOptions { threshold: 0.05, ..Default::default() };
        let (_, matched) = score("configuration", "confi", &options);
        assert!(!matched);
    }

    #[test]
    fn test_score_field_no_query_tokens() {
        let options = ScoringOptions::default();
        assert_eq!(score_field("spring boot", "s", &[], &options), (1.0, false));
    }
}
