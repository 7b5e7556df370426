//! Blog post records as handed over by the storage layer
//!
//! A post carries more than the engine looks at. Title, summary and topics are
//! NOT searched on their own; they only become discoverable once folded into
//! `search_text`, which `build_search_text` does.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::candidate::SearchDocument;
use crate::normalize::normalize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub topics: Vec<Topic>,
    pub published_at: DateTime<Utc>,
}

impl Post {
    /// Fill an empty `search_text` from id, title, summary and topics.
    pub fn with_search_text_from_fields(mut self) -> Self {
        if self.search_text.trim().is_empty() {
            self.search_text = build_search_text(&self.id, &self.title, &self.summary, &self.topics);
        }
        self
    }
}

impl SearchDocument for Post {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_text(&self) -> &str {
        &self.search_text
    }

    fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }
}

/// Join the id, title, summary and every non-empty topic id/name, then normalize.
pub fn build_search_text(id: &str, title: &str, summary: &str, topics: &[Topic]) -> String {
    let topic_parts = topics
        .iter()
        .flat_map(|topic| [topic.id.as_str(), topic.name.as_str()])
        .filter(|part| !part.is_empty());

    let joined = [id, title, summary]
        .into_iter()
        .chain(topic_parts)
        .collect::<Vec<_>>()
        .join(" ");
    normalize(&joined)
}

/// True when the normalized query is empty or occurs inside the normalized topic name.
pub fn topic_matches_query(topic_name: &str, query: &str) -> bool {
    let normalized_query = normalize(query);
    if normalized_query.is_empty() {
        return true;
    }
    normalize(topic_name).contains(&normalized_query)
}
