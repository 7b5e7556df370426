//! Text normalization and tokenization shared by queries and documents
//!
//! Both sides of a comparison go through `normalize`, so the folding rules here
//! decide what "the same word" means. The corpus is bilingual (English/Turkish),
//! hence the explicit dotted/dotless I handling ahead of the generic lowercase.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Nonspacing marks only; spacing marks (Mc) act as separators like any other non-letter.
static NONSPACING_MARKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{Mn}+").expect("nonspacing mark pattern"));

/// Anything that is not a letter or a decimal digit.
static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{Nd}]+").expect("separator pattern"));

/// Lowercase `text`, mapping the Turkish I family to plain `i`.
///
/// `char::to_lowercase` turns `İ` into `i` + U+0307 and leaves `ı` alone, so
/// the whole family is pinned to `i` before the generic mapping.
fn fold_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'İ' | 'I' | 'ı' => out.push('i'),
            _ => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// Lowercase, strip diacritics and collapse every run of characters that is
/// neither a letter nor a decimal digit to a single space. Empty or
/// whitespace-only input yields an empty string.
pub fn normalize(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let decomposed: String = fold_case(trimmed).nfkd().collect();
    let stripped = NONSPACING_MARKS.replace_all(&decomposed, "");
    // Compatibility decomposition can surface uppercase letters (e.g. `ℌ` -> `H`),
    // fold again so a second pass is a no-op.
    let refolded = fold_case(&stripped);
    SEPARATORS.replace_all(&refolded, " ").trim().to_string()
}

/// Split already-normalized text into unique tokens of at least `min_len` chars,
/// keeping first-occurrence order.
pub fn tokenize_normalized(normalized: &str, min_len: usize) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    normalized
        .split_whitespace()
        .filter(|token| token.chars().count() >= min_len)
        .filter(|token| seen.insert(*token))
        .map(str::to_owned)
        .collect()
}

/// Normalize `text` and split it into deduplicated tokens of at least `min_len` chars.
pub fn tokenize(text: &str, min_len: usize) -> Vec<String> {
    tokenize_normalized(&normalize(text), min_len)
}
