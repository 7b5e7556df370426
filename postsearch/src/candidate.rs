//! Search candidate with memoized derived state.
//!
//! Module isolation ensures no code outside this module can mutate `search_text`
//! after construction, so the `OnceLock` cache can never go stale.

use std::borrow::Cow;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::normalize::normalize;

/// Anything the engine can rank: a stable id, one searchable text, a timestamp.
///
/// Only `search_text` (through `normalized_text`) is ever inspected for matching.
pub trait SearchDocument {
    fn id(&self) -> &str;

    fn search_text(&self) -> &str;

    /// Used only to break score ties.
    fn published_at(&self) -> DateTime<Utc>;

    /// `normalize(search_text())`. Implementors may cache it.
    fn normalized_text(&self) -> Cow<'_, str> {
        Cow::Owned(normalize(self.search_text()))
    }
}

/// One searchable record supplied by the storage layer for a single query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    id: String,
    search_text: String,
    published_at: DateTime<Utc>,
    #[serde(skip)]
    normalized: OnceLock<String>,
}

impl Candidate {
    pub fn new(id: impl Into<String>, search_text: impl Into<String>, published_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            search_text: search_text.into(),
            published_at,
            normalized: OnceLock::new(),
        }
    }
}

impl SearchDocument for Candidate {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self) -> &str {
        &self.search_text
    }

    fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    fn normalized_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.normalized.get_or_init(|| normalize(&self.search_text)))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.search_text == other.search_text
            && self.published_at == other.published_at
    }
}
