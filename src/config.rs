// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{AssistantError, Result};
use crate::utils::validation;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub model: ModelConfig,
    pub retrieval: RetrievalConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub uri: String,
    pub collection: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    pub api_base: String,
    pub api_key: Option<String>,
    pub embedding_model: String,
    pub generation_model: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrievalConfig {
    /// Number of nearest passages handed to the generation model per query.
    /// Fixed configuration, not a per-call knob.
    pub top_k: usize,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("REG_ASSISTANT")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| AssistantError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| AssistantError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            database: DatabaseConfig {
                uri: "data/regulation_db".to_string(),
                collection: "fmcsa_regulations".to_string(),
            },
            model: ModelConfig {
                api_base: "https://api.groq.com/openai/v1".to_string(),
                api_key: None,
                embedding_model: "BAAI/bge-small-en-v1.5".to_string(),
                generation_model: "llama-3.3-70b-versatile".to_string(),
            },
            retrieval: RetrievalConfig { top_k: 3 },
        }
    }

    fn validate(&self) -> Result<()> {
        validation::ensure_collection_name(&self.database.collection)
            .map_err(|e| AssistantError::Config(e.to_string()))?;

        if self.retrieval.top_k == 0 {
            return Err(AssistantError::Config(
                "top_k must be greater than 0".to_string(),
            ));
        }

        validation::ensure_api_base(&self.model.api_base)
            .map_err(|e| AssistantError::Config(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_config();
        assert_eq!(config.database.collection, "fmcsa_regulations");
        assert_eq!(config.retrieval.top_k, 3);
        assert!(config.model.api_key.is_none());
    }

    #[test]
    fn test_validate_rejects_zero_top_k() {
        let mut config = Config::default_config();
        config.retrieval.top_k = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_api_base() {
        let mut config = Config::default_config();
        config.model.api_base = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_collection() {
        let mut config = Config::default_config();
        config.database.collection = " ".to_string();
        assert!(config.validate().is_err());
    }
}
