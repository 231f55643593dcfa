// file: src/pipeline/chain.rs
// description: retrieve-then-generate chain bound to one index and model pair
// reference: pipeline orchestration

use crate::database::LanceDbClient;
use crate::error::Result;
use crate::llm::{EmbeddingClient, GenerationClient};
use crate::models::ScoredPassage;
use crate::pipeline::prompt::PromptTemplate;
use crate::utils::validation;
use tracing::{debug, info};

/// Raw result of one chain invocation: the generated text plus the passages
/// that were handed to the model, in retriever order.
#[derive(Debug)]
pub struct ChainOutput {
    pub answer: String,
    pub passages: Vec<ScoredPassage>,
}

/// Single reusable retrieval+generation pipeline. Built once per session and
/// invoked for every query; holds the embedding client, the index handle, the
/// prompt template, and the generation client.
pub struct RetrievalChain {
    embedder: EmbeddingClient,
    generator: GenerationClient,
    client: LanceDbClient,
    prompt: PromptTemplate,
    top_k: usize,
}

impl RetrievalChain {
    pub fn new(
        embedder: EmbeddingClient,
        generator: GenerationClient,
        client: LanceDbClient,
        top_k: usize,
    ) -> Self {
        info!(
            "Building retrieval chain (embedding: {}, generation: {}, top_k: {})",
            embedder.model(),
            generator.model(),
            top_k
        );

        Self {
            embedder,
            generator,
            client,
            prompt: PromptTemplate::new(),
            top_k,
        }
    }

    /// Execute one retrieval+generation round trip. Blocking from the
    /// caller's point of view; no retry, no timeout, no partial results.
    pub async fn invoke(&self, question: &str) -> Result<ChainOutput> {
        let embedding = self.embedder.embed(question).await?;

        let passages = self
            .client
            .vector_search(embedding, self.top_k)
            .await?;

        debug!("Retrieved {} passages for prompt context", passages.len());
        for passage in &passages {
            debug!(
                "Match: {} (page {}): {}",
                passage.source,
                passage.page,
                validation::preview(&passage.content, 120)
            );
        }

        let prompt = self.prompt.render(&passages, question);
        let answer = self.generator.complete(&prompt).await?;

        Ok(ChainOutput { answer, passages })
    }
}
