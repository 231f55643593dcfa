// file: src/pipeline/prompt.rs
// description: prompt template rendering for grounded answer generation
// reference: internal code standards

use crate::models::ScoredPassage;

const DEFAULT_TEMPLATE: &str = "Use the following pieces of context from Federal Motor Carrier \
Safety Administration regulations to answer the question at the end. If you don't know the \
answer, just say that you don't know, don't try to make up an answer.\n\n\
{context}\n\n\
Question: {question}\n\
Helpful Answer:";

/// Renders the generation prompt by stuffing the retrieved passage contents
/// into a single context block, in retriever order.
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }

    pub fn with_custom_template(template: String) -> Self {
        Self { template }
    }

    pub fn render(&self, passages: &[ScoredPassage], question: &str) -> String {
        let context = passages
            .iter()
            .map(|passage| passage.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        self.template
            .replace("{context}", &context)
            .replace("{question}", question)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn passage(content: &str) -> ScoredPassage {
        ScoredPassage::new(
            content.to_string(),
            "/data/part395.pdf".to_string(),
            0,
            0.9,
            None,
        )
    }

    #[test]
    fn test_render_stuffs_passages_in_order() {
        let template = PromptTemplate::new();
        let passages = vec![passage("first passage"), passage("second passage")];

        let prompt = template.render(&passages, "What are the HOS limits?");

        let first = prompt.find("first passage").unwrap();
        let second = prompt.find("second passage").unwrap();
        assert!(first < second);
        assert!(prompt.contains("Question: What are the HOS limits?"));
    }

    #[test]
    fn test_render_with_no_passages() {
        let template = PromptTemplate::new();
        let prompt = template.render(&[], "anything?");
        assert!(prompt.contains("Question: anything?"));
    }

    #[test]
    fn test_custom_template() {
        let template =
            PromptTemplate::with_custom_template("C: {context} Q: {question}".to_string());
        let prompt = template.render(&[passage("body")], "q");
        assert_eq!(prompt, "C: body Q: q");
    }
}
