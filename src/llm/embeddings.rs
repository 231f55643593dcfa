// file: src/llm/embeddings.rs
// description: hosted embedding model client over an OpenAI-compatible API
// reference: https://console.groq.com/docs/embeddings

use crate::error::{AssistantError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    input: Vec<String>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Client for the embedding endpoint that encodes query text into the same
/// vector space as the stored index.
pub struct EmbeddingClient {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl EmbeddingClient {
    pub fn new(api_base: String, api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_base,
            api_key,
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!("{}/embeddings", self.api_base.trim_end_matches('/'))
    }

    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = self.endpoint();

        let request = EmbeddingRequest {
            input: vec![text.to_string()],
            model: self.model.clone(),
        };

        debug!("Requesting embedding for {} chars", text.len());

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                AssistantError::Embedding(format!("Failed to send embedding request: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AssistantError::Embedding(format!(
                "Embedding request failed with status {}: {}",
                status, error_text
            )));
        }

        let embedding_response: EmbeddingResponse = response.json().await.map_err(|e| {
            AssistantError::Embedding(format!("Failed to parse embedding response: {}", e))
        })?;

        if let Some(embedding_data) = embedding_response.data.into_iter().next() {
            debug!(
                "Received embedding of dimension {}",
                embedding_data.embedding.len()
            );
            Ok(embedding_data.embedding)
        } else {
            Err(AssistantError::Embedding(
                "No embedding data returned".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_endpoint_joins_base() {
        let client = EmbeddingClient::new(
            "https://api.groq.com/openai/v1".to_string(),
            "key".to_string(),
            "BAAI/bge-small-en-v1.5".to_string(),
        );
        assert_eq!(client.endpoint(), "https://api.groq.com/openai/v1/embeddings");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = EmbeddingClient::new(
            "http://localhost:8080/v1/".to_string(),
            "key".to_string(),
            "BAAI/bge-small-en-v1.5".to_string(),
        );
        assert_eq!(client.endpoint(), "http://localhost:8080/v1/embeddings");
    }

    #[test]
    fn test_request_serialization() {
        let request = EmbeddingRequest {
            input: vec!["hours of service".to_string()],
            model: "BAAI/bge-small-en-v1.5".to_string(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["input"][0], "hours of service");
        assert_eq!(value["model"], "BAAI/bge-small-en-v1.5");
    }
}
