use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::{EMBED_URL_BASE, WATCH_URL_BASE};

/// One video in the corpus.
///
/// Identity is the row index in the corpus store; `external_id` is not
/// checked for uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusRecord {
    pub external_id: String,
    pub title: String,
    pub description: String,
    /// `None` when the source value is blank or unparseable.
    pub published_date: Option<NaiveDate>,
}

impl CorpusRecord {
    pub fn new(
        external_id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        published_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            external_id: external_id.into(),
            title: title.into(),
            description: description.into(),
            published_date,
        }
    }

    /// Text used when embedding this record.
    pub fn embedding_text(&self) -> String {
        match (self.title.trim(), self.description.trim()) {
            ("", desc) => desc.to_string(),
            (title, "") => title.to_string(),
            (title, desc) => format!("{title}. {desc}"),
        }
    }

    pub fn watch_url(&self) -> String {
        format!("{WATCH_URL_BASE}{}", self.external_id)
    }

    pub fn embed_url(&self) -> String {
        format!("{EMBED_URL_BASE}{}", self.external_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedding_text_joins_title_and_description() {
        let r = CorpusRecord::new("abc", "Black Holes", "What happens inside?", None);
        assert_eq!(r.embedding_text(), "Black Holes. What happens inside?");
    }

    #[test]
    fn embedding_text_skips_blank_parts() {
        let r = CorpusRecord::new("abc", "  ", "only description", None);
        assert_eq!(r.embedding_text(), "only description");
        let r = CorpusRecord::new("abc", "only title", "", None);
        assert_eq!(r.embedding_text(), "only title");
    }

    #[test]
    fn urls_use_external_id() {
        let r = CorpusRecord::new("dQw4w9WgXcQ", "t", "d", None);
        assert_eq!(r.watch_url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(r.embed_url(), "https://www.youtube.com/embed/dQw4w9WgXcQ");
    }
}
