//! Core data models used by the library.

use serde::Serialize;
use serde_json::{Map, Value};

/// Metadata stored next to a vector, passed through unchanged.
pub type Metadata = Map<String, Value>;

/// A raw match as returned by the index service, in service order.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexMatch {
    pub score: f32,
    pub metadata: Metadata,
}

/// A retrieved passage: its text, the full metadata, and the similarity score.
///
/// `text` is empty when the stored item has no string `text` field; it is
/// never absent.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RetrievedDocument {
    pub text: String,
    pub metadata: Metadata,
    pub score: f32,
}

impl From<IndexMatch> for RetrievedDocument {
    fn from(m: IndexMatch) -> Self {
        let text = m
            .metadata
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Self {
            text,
            metadata: m.metadata,
            score: m.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn meta(v: Value) -> Metadata {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn text_comes_from_metadata_and_metadata_is_untouched() {
        let m = IndexMatch {
            score: 0.9,
            metadata: meta(json!({ "text": "Refunds within 30 days.", "page": 3 })),
        };
        let doc = RetrievedDocument::from(m.clone());
        assert_eq!(doc.text, "Refunds within 30 days.");
        assert_eq!(doc.metadata, m.metadata);
        assert_eq!(doc.score, 0.9);
    }

    #[test]
    fn missing_or_non_string_text_becomes_empty() {
        let doc = RetrievedDocument::from(IndexMatch {
            score: 0.1,
            metadata: meta(json!({ "source": "faq.md" })),
        });
        assert_eq!(doc.text, "");

        let doc = RetrievedDocument::from(IndexMatch {
            score: 0.1,
            metadata: meta(json!({ "text": 42 })),
        });
        assert_eq!(doc.text, "");
        assert_eq!(doc.metadata.get("text"), Some(&json!(42)));
    }
}
