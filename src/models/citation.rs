// file: src/models/citation.rs
// description: human-readable source citations with ordered deduplication
// reference: internal data structures

use crate::models::passage::ScoredPassage;
use std::collections::HashSet;

/// Format a single citation as `"<basename> (Page <n>)"`.
///
/// Stored page numbers are zero-indexed, so the displayed page is `page + 1`;
/// the unknown-page sentinel (-1) therefore displays as page 0. The basename
/// is the final `/`-separated segment of `source`; a source with no `/` is
/// used whole, which is a known limitation for non-path identifiers.
pub fn format_citation(source: &str, page: i64) -> String {
    let basename = source.rsplit('/').next().unwrap_or(source);
    format!("{} (Page {})", basename, page + 1)
}

/// Ordered set of citation strings, keyed on the formatted string itself.
/// Two raw sources that format identically collapse to one entry at the
/// position of first occurrence.
#[derive(Debug, Default)]
pub struct CitationSet {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl CitationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a formatted citation, returning true if it was not seen before.
    pub fn insert(&mut self, citation: String) -> bool {
        if self.seen.contains(&citation) {
            return false;
        }
        self.seen.insert(citation.clone());
        self.ordered.push(citation);
        true
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

/// Collect citations for a slice of passages in retriever order,
/// de-duplicated by formatted string.
pub fn collect_citations(passages: &[ScoredPassage]) -> Vec<String> {
    let mut citations = CitationSet::new();
    for passage in passages {
        citations.insert(format_citation(&passage.source, passage.page));
    }
    citations.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn passage(source: &str, page: i64) -> ScoredPassage {
        ScoredPassage::new("text".to_string(), source.to_string(), page, 0.9, None)
    }

    #[test]
    fn test_page_is_one_indexed() {
        let citation = format_citation("/data/fmcsa/part383.pdf", 4);
        assert_eq!(citation, "part383.pdf (Page 5)");
    }

    #[test]
    fn test_unknown_page_displays_as_zero() {
        let citation = format_citation("/data/fmcsa/part395.pdf", -1);
        assert_eq!(citation, "part395.pdf (Page 0)");
    }

    #[test]
    fn test_source_without_separator_is_used_whole() {
        let citation = format_citation("part390.pdf", 0);
        assert_eq!(citation, "part390.pdf (Page 1)");
    }

    #[test]
    fn test_identical_basenames_collapse() {
        let passages = vec![passage("/a/x.pdf", 2), passage("/b/x.pdf", 2)];
        let citations = collect_citations(&passages);
        assert_eq!(citations, vec!["x.pdf (Page 3)".to_string()]);
    }

    #[test]
    fn test_first_occurrence_order_is_preserved() {
        let passages = vec![
            passage("/data/part395.pdf", 7),
            passage("/data/part383.pdf", 4),
            passage("/data/part395.pdf", 7),
            passage("/data/part390.pdf", 0),
        ];

        let citations = collect_citations(&passages);
        assert_eq!(
            citations,
            vec![
                "part395.pdf (Page 8)".to_string(),
                "part383.pdf (Page 5)".to_string(),
                "part390.pdf (Page 1)".to_string(),
            ]
        );
    }

    #[test]
    fn test_same_document_different_pages_are_distinct() {
        let passages = vec![passage("/data/part395.pdf", 1), passage("/data/part395.pdf", 2)];
        let citations = collect_citations(&passages);
        assert_eq!(citations.len(), 2);
    }

    #[test]
    fn test_citation_set_insert_reports_novelty() {
        let mut set = CitationSet::new();
        assert!(set.insert("part383.pdf (Page 5)".to_string()));
        assert!(!set.insert("part383.pdf (Page 5)".to_string()));
        assert_eq!(set.len(), 1);
    }
}
