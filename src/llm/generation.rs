// file: src/llm/generation.rs
// description: hosted chat-completion client used to synthesize answers
// reference: https://console.groq.com/docs/api-reference#chat

use crate::error::{AssistantError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Client for the hosted generation model. One prompt in, one answer out;
/// retries and timeouts are left to the caller's environment.
pub struct GenerationClient {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl GenerationClient {
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
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }

    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let url = self.endpoint();

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        debug!(
            "Requesting completion from {} for {} prompt chars",
            self.model,
            prompt.len()
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                AssistantError::Generation(format!("Failed to send completion request: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AssistantError::Generation(format!(
                "Completion request failed with status {}: {}",
                status, error_text
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            AssistantError::Generation(format!("Failed to parse completion response: {}", e))
        })?;

        if let Some(choice) = chat_response.choices.into_iter().next() {
            debug!("Received completion of {} chars", choice.message.content.len());
            Ok(choice.message.content)
        } else {
            Err(AssistantError::Generation(
                "No completion choices returned".to_string(),
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
        let client = GenerationClient::new(
            "https://api.groq.com/openai/v1".to_string(),
            "key".to_string(),
            "llama-3.3-70b-versatile".to_string(),
        );
        assert_eq!(
            client.endpoint(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_response_parsing_takes_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"11 hours"}},{"message":{"role":"assistant","content":"other"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "11 hours");
    }
}
