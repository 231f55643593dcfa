// file: src/session.rs
// description: assistant session owning the retrieval+generation pipeline lifecycle
// reference: application bootstrap and orchestration

use crate::config::{Config, ModelConfig};
use crate::database::{LanceDbClient, SchemaManager};
use crate::error::{AssistantError, Result};
use crate::llm::{EmbeddingClient, GenerationClient};
use crate::models::AskResponse;
use crate::pipeline::RetrievalChain;
use crate::utils::QueryTimer;
use tracing::{info, warn};

/// One assistant session bound to a persisted index and a hosted model pair.
///
/// Construction is fail-fast: missing credentials or an unopenable/invalid
/// index surface immediately as errors. The chain is built once here and
/// reused for every subsequent query; construct a session once per process
/// and pass it by reference to whatever handles incoming questions.
pub struct AssistantSession {
    chain: RetrievalChain,
}

impl AssistantSession {
    pub async fn new(config: Config) -> Result<Self> {
        let api_key = resolve_api_key(&config.model)?;

        let client = LanceDbClient::new(config.database.clone()).await?;
        client.ping().await?;

        let missing = SchemaManager::new(&client).verify().await?;
        if !missing.is_empty() {
            return Err(AssistantError::Index(format!(
                "Collection '{}' is missing required columns: {}",
                client.collection_name(),
                missing.join(", ")
            )));
        }

        let embedder = EmbeddingClient::new(
            config.model.api_base.clone(),
            api_key.clone(),
            config.model.embedding_model.clone(),
        );

        let generator = GenerationClient::new(
            config.model.api_base.clone(),
            api_key,
            config.model.generation_model.clone(),
        );

        let chain = RetrievalChain::new(embedder, generator, client, config.retrieval.top_k);

        info!("Assistant session ready");

        Ok(Self { chain })
    }

    /// Execute one question round trip.
    ///
    /// Always returns a well-formed response: on success the generated answer
    /// verbatim plus ordered, de-duplicated citations; on any chain failure
    /// the error shape ("Error: <message>", no sources). Callers never see a
    /// raised failure from this method, only from construction.
    pub async fn ask(&self, question: &str) -> AskResponse {
        info!("Query: {}", question);

        let timer = QueryTimer::start();
        let result = self.chain.invoke(question).await;
        timer.stop();

        match result {
            Ok(output) => AskResponse::new(output.answer, &output.passages),
            Err(e) => {
                warn!("Query failed: {}", e);
                AskResponse::from_error(e)
            }
        }
    }
}

/// Resolve the API key from configuration, falling back to the GROQ_API_KEY
/// environment variable. No interactive prompt: headless deployments need a
/// descriptive failure, not a blocked console read.
pub fn resolve_api_key(model: &ModelConfig) -> Result<String> {
    if let Some(key) = &model.api_key
        && !key.trim().is_empty()
    {
        return Ok(key.clone());
    }

    if let Ok(key) = std::env::var("GROQ_API_KEY")
        && !key.trim().is_empty()
    {
        return Ok(key);
    }

    Err(AssistantError::Credentials(
        "No API key configured; set model.api_key or the GROQ_API_KEY environment variable"
            .to_string(),
    ))
}
