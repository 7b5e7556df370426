//! Public error surface for the search crate
//!
//! The ranking pipeline itself never fails: degenerate input maps to an empty
//! result. Errors only come from the code around it (option validation,
//! configuration loading, strict parameter parsing, reading candidate files).

use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// ERRORS
// ═══════════════════════════════════════════════════════════════════════════════

/// Error type for configuration and I/O around the search engine
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid option {name}: {reason}")]
    InvalidOption { name: &'static str, reason: String },
    #[error("Invalid sort direction: {0:?}")]
    InvalidSortDirection(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SearchResult<T> = Result<T, SearchError>;

impl SearchError {
    pub(crate) fn invalid_option(name: &'static str, reason: impl Into<String>) -> Self {
        SearchError::InvalidOption {
            name,
            reason: reason.into(),
        }
    }
}
