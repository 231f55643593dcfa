// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod database;
pub mod error;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod session;
pub mod utils;

pub use config::{Config, DatabaseConfig, ModelConfig, RetrievalConfig};
pub use database::{LanceDbClient, SchemaManager};
pub use error::{AssistantError, Result};
pub use llm::{EmbeddingClient, GenerationClient};
pub use models::{AskResponse, ConversationTurn, Role, ScoredPassage, Transcript};
pub use pipeline::{ChainOutput, PromptTemplate, RetrievalChain};
pub use session::AssistantSession;
pub use utils::{Condition, ProbeResult, QueryTimer, StatusReport};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _config = Config::default_config();
        let _transcript = Transcript::new();
    }
}
