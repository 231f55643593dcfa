// file: src/database/schema.rs
// description: LanceDB collection schema verification
// reference: https://docs.rs/lancedb

use crate::database::client::LanceDbClient;
use crate::error::{AssistantError, Result};
use arrow_schema::SchemaRef;
use tracing::{info, warn};

/// Columns the query pipeline reads from the persisted collection.
pub const REQUIRED_COLUMNS: [&str; 4] = ["content", "source", "page", "embedding"];

pub struct SchemaManager<'a> {
    client: &'a LanceDbClient,
}

impl<'a> SchemaManager<'a> {
    pub fn new(client: &'a LanceDbClient) -> Self {
        Self { client }
    }

    /// Verify the collection exists and carries every column the pipeline
    /// reads. Returns the list of missing columns, empty when valid.
    pub async fn verify(&self) -> Result<Vec<String>> {
        let collection = self.client.collection_name();

        if !self.client.collection_exists().await? {
            warn!("Collection '{}' does not exist", collection);
            return Err(AssistantError::Index(format!(
                "Collection '{}' not found; the storage path does not contain a valid index",
                collection
            )));
        }

        let table = self.client.get_collection().await?;
        let schema: SchemaRef = table
            .schema()
            .await
            .map_err(|e| AssistantError::Index(format!("Failed to read collection schema: {}", e)))?;

        let missing = Self::missing_columns(&schema);

        if missing.is_empty() {
            info!("Collection '{}' schema verification passed", collection);
        } else {
            warn!(
                "Collection '{}' is missing columns: {}",
                collection,
                missing.join(", ")
            );
        }

        Ok(missing)
    }

    fn missing_columns(schema: &SchemaRef) -> Vec<String> {
        REQUIRED_COLUMNS
            .iter()
            .filter(|column| schema.field_with_name(column).is_err())
            .map(|column| column.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow_schema::{DataType, Field, Schema};
    use std::sync::Arc;

    #[test]
    fn test_complete_schema_has_no_missing_columns() {
        let schema: SchemaRef = Arc::new(Schema::new(vec![
            Field::new("content", DataType::Utf8, false),
            Field::new("source", DataType::Utf8, false),
            Field::new("page", DataType::Int64, true),
            Field::new(
                "embedding",
                DataType::FixedSizeList(Arc::new(Field::new("item", DataType::Float32, true)), 384),
                false,
            ),
        ]));

        assert!(SchemaManager::missing_columns(&schema).is_empty());
    }

    #[test]
    fn test_missing_columns_are_reported() {
        let schema: SchemaRef = Arc::new(Schema::new(vec![Field::new(
            "content",
            DataType::Utf8,
            false,
        )]));

        let missing = SchemaManager::missing_columns(&schema);
        assert_eq!(missing, vec!["source", "page", "embedding"]);
    }
}
