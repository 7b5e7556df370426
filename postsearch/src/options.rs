//! Scoring configuration
//!
//! `ScoringOptions` is built once per query and never mutated while scoring.
//! It can be loaded from a TOML file and overridden from the environment so
//! operators can trade recall for precision without touching scoring code.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::interface::{SearchError, SearchResult};
use crate::normalize::tokenize;

pub const DEFAULT_THRESHOLD: f64 = 0.45;
pub const DEFAULT_MIN_TOKEN_LENGTH: usize = 2;
pub const DEFAULT_LOCATION_DISTANCE: i64 = 120;

/// Threshold bands for `tuned_for_query`, keyed by the longest query token (chars).
/// Short tokens match loosely, long tokens strictly.
const LOOSE_TOKEN_MAX_LEN: usize = 4;
const MEDIUM_TOKEN_MAX_LEN: usize = 7;
const LOOSE_THRESHOLD: f64 = 0.5;
const MEDIUM_THRESHOLD: f64 = 0.45;
const STRICT_THRESHOLD: f64 = 0.35;

/// Tunable knobs for one search invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringOptions {
    /// Maximum accepted dissimilarity, in [0, 1]. Lower scores are better.
    pub threshold: f64,
    /// Tokens with fewer chars than this are dropped at tokenization time.
    pub min_token_length: usize,
    /// Decay radius for the positional term. `<= 0` means any offset is a full penalty.
    pub location_distance: i64,
    /// Char offset where the best match is expected, normally 0. Any value is accepted;
    /// offsets are compared by absolute difference.
    pub expected_location: i64,
    /// Skip the positional term entirely.
    pub ignore_location: bool,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_token_length: DEFAULT_MIN_TOKEN_LENGTH,
            location_distance: DEFAULT_LOCATION_DISTANCE,
            expected_location: 0,
            ignore_location: false,
        }
    }
}

impl ScoringOptions {
    pub fn validate(&self) -> SearchResult<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(SearchError::invalid_option(
                "threshold",
                format!("must be within [0, 1], got {}", self.threshold),
            ));
        }
        Ok(())
    }

    /// Copy of these options with the threshold picked from the longest query token.
    ///
    /// Queries that produce no tokens keep the configured threshold.
    pub fn tuned_for_query(&self, query: &str) -> ScoringOptions {
        let longest = tokenize(query, self.min_token_length)
            .iter()
            .map(|token| token.chars().count())
            .max();

        let threshold = match longest {
            None => self.threshold,
            Some(len) if len <= LOOSE_TOKEN_MAX_LEN => LOOSE_THRESHOLD,
            Some(len) if len <= MEDIUM_TOKEN_MAX_LEN => MEDIUM_THRESHOLD,
            Some(_) => STRICT_THRESHOLD,
        };

        ScoringOptions {
            threshold,
            ..self.clone()
        }
    }

    pub fn from_toml_str(raw: &str) -> SearchResult<Self> {
        let options: ScoringOptions =
            toml::from_str(raw).map_err(|err| SearchError::Config(format!("parse options: {err}")))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file. Missing keys fall back to the defaults.
    pub fn load(path: &Path) -> SearchResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| SearchError::Config(format!("read config {}: {err}", path.display())))?;
        Self::from_toml_str(&raw)
            .map_err(|err| match err {
                SearchError::Config(msg) => SearchError::Config(format!("{}: {msg}", path.display())),
                other => other,
            })
    }

    /// Apply `POSTSEARCH_*` environment overrides on top of the current values.
    pub fn apply_env_overrides(&mut self) -> SearchResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> SearchResult<()> {
        if let Some(value) = parse_override::<f64>(&lookup, "POSTSEARCH_THRESHOLD")? {
            self.threshold = value;
        }
        if let Some(value) = parse_override::<usize>(&lookup, "POSTSEARCH_MIN_TOKEN_LENGTH")? {
            self.min_token_length = value;
        }
        if let Some(value) = parse_override::<i64>(&lookup, "POSTSEARCH_LOCATION_DISTANCE")? {
            self.location_distance = value;
        }
        if let Some(value) = parse_override::<i64>(&lookup, "POSTSEARCH_EXPECTED_LOCATION")? {
            self.expected_location = value;
        }
        if let Some(value) = lookup("POSTSEARCH_IGNORE_LOCATION") {
            self.ignore_location = matches!(
                value.trim().to_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        self.validate()
    }
}

fn parse_override<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> SearchResult<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|err| SearchError::Config(format!("invalid {key} value {value}: {err}"))),
        None => Ok(None),
    }
}
