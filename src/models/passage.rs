// file: src/models/passage.rs
// description: Retrieved passage model with similarity scores
// reference: Used for vector similarity search results

use serde::{Deserialize, Serialize};

/// Page value stored for passages whose loader supplied no page metadata.
pub const PAGE_UNKNOWN: i64 = -1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPassage {
    /// Passage text as stored in the index
    pub content: String,

    /// Source document path or identifier
    pub source: String,

    /// Zero-indexed page number, PAGE_UNKNOWN when absent
    pub page: i64,

    /// Similarity score (higher is more similar, typically 0.0-1.0)
    pub score: f32,

    /// Optional: Distance metric (lower is more similar)
    pub distance: Option<f32>,
}

impl ScoredPassage {
    pub fn new(content: String, source: String, page: i64, score: f32, distance: Option<f32>) -> Self {
        Self {
            content,
            source,
            page,
            score,
            distance,
        }
    }

    /// Format as a summary string for display
    pub fn format_summary(&self, max_content_len: usize) -> String {
        let content_preview = if self.content.len() > max_content_len {
            format!("{}...", &self.content[..max_content_len])
        } else {
            self.content.clone()
        };

        format!(
            "Score: {:.4} | {} (page {})\n{}\n",
            self.score, self.source, self.page, content_preview
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passage_creation() {
        let passage = ScoredPassage::new(
            "Drivers may not exceed 11 hours".to_string(),
            "/data/fmcsa/part395.pdf".to_string(),
            7,
            0.95,
            Some(0.05),
        );

        assert_eq!(passage.page, 7);
        assert_eq!(passage.score, 0.95);
        assert_eq!(passage.distance, Some(0.05));
    }

    #[test]
    fn test_format_summary_truncates() {
        let passage = ScoredPassage::new(
            "This is a very long passage body that will be truncated".to_string(),
            "/data/fmcsa/part383.pdf".to_string(),
            2,
            0.87,
            None,
        );

        let summary = passage.format_summary(20);
        assert!(summary.contains("0.8700"));
        assert!(summary.contains("part383.pdf"));
        assert!(summary.contains("..."));
    }
}
