// file: src/models/response.rs
// description: query response shape returned by the assistant
// reference: internal data structures

use crate::models::citation::collect_citations;
use crate::models::passage::ScoredPassage;
use serde::{Deserialize, Serialize};

/// The full result of one question round trip: the generated answer verbatim
/// plus an ordered, de-duplicated list of citation strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    pub sources: Vec<String>,
}

impl AskResponse {
    /// Build a response from a generated answer and the passages that
    /// grounded it, in retriever order.
    pub fn new(answer: String, passages: &[ScoredPassage]) -> Self {
        Self {
            answer,
            sources: collect_citations(passages),
        }
    }

    /// Build the error shape: the failure message behind an "Error:" prefix
    /// and no sources. Callers receive this as a normal response.
    pub fn from_error<E: std::fmt::Display>(error: E) -> Self {
        Self {
            answer: format!("Error: {}", error),
            sources: Vec::new(),
        }
    }

    /// Render the transcript entry: the answer followed by a Sources block
    /// listing each citation on its own line. The block is omitted when
    /// there are no citations.
    pub fn render(&self) -> String {
        if self.sources.is_empty() {
            return self.answer.clone();
        }

        let mut rendered = String::with_capacity(self.answer.len() + 64);
        rendered.push_str(&self.answer);
        rendered.push_str("\n\nSources:\n");
        for source in &self.sources {
            rendered.push_str("- ");
            rendered.push_str(source);
            rendered.push('\n');
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn passage(source: &str, page: i64) -> ScoredPassage {
        ScoredPassage::new("text".to_string(), source.to_string(), page, 0.9, None)
    }

    #[test]
    fn test_new_builds_deduplicated_sources() {
        let passages = vec![
            passage("/data/part395.pdf", 7),
            passage("/other/part395.pdf", 7),
            passage("/data/part383.pdf", 4),
        ];

        let response = AskResponse::new("answer text".to_string(), &passages);
        assert_eq!(response.answer, "answer text");
        assert_eq!(
            response.sources,
            vec![
                "part395.pdf (Page 8)".to_string(),
                "part383.pdf (Page 5)".to_string(),
            ]
        );
    }

    #[test]
    fn test_from_error_shape() {
        let response = AskResponse::from_error("connection refused");
        assert_eq!(response.answer, "Error: connection refused");
        assert!(response.sources.is_empty());
    }

    #[test]
    fn test_render_lists_each_citation_with_bullet() {
        let response = AskResponse {
            answer: "The limit is 11 hours.".to_string(),
            sources: vec![
                "part395.pdf (Page 8)".to_string(),
                "part383.pdf (Page 5)".to_string(),
            ],
        };

        let rendered = response.render();
        assert!(rendered.starts_with("The limit is 11 hours."));
        assert!(rendered.contains("\n\nSources:\n"));
        assert!(rendered.contains("- part395.pdf (Page 8)\n"));
        assert!(rendered.contains("- part383.pdf (Page 5)\n"));
    }

    #[test]
    fn test_render_omits_empty_sources_block() {
        let response = AskResponse::from_error("quota exceeded");
        assert_eq!(response.render(), "Error: quota exceeded");
    }

    #[test]
    fn test_json_shape() {
        let response = AskResponse {
            answer: "a".to_string(),
            sources: vec!["part390.pdf (Page 1)".to_string()],
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["answer"], "a");
        assert_eq!(value["sources"][0], "part390.pdf (Page 1)");
    }
}
