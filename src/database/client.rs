// file: src/database/client.rs
// description: LanceDB client wrapper with connection management
// reference: https://docs.rs/lancedb

use crate::config::DatabaseConfig;
use crate::error::{AssistantError, Result};
use crate::models::{PAGE_UNKNOWN, ScoredPassage};
use arrow_array::{Array, Float32Array, Int64Array, StringArray};
use futures::StreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use lancedb::{Connection, Table, connect};
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct LanceDbClient {
    connection: Connection,
    config: DatabaseConfig,
}

impl LanceDbClient {
    pub async fn new(config: DatabaseConfig) -> Result<Self> {
        info!("Connecting to LanceDB at {}", config.uri);

        let connection = connect(&config.uri)
            .execute()
            .await
            .map_err(|e| AssistantError::Index(format!("Failed to connect to LanceDB: {}", e)))?;

        Ok(Self { connection, config })
    }

    pub fn collection_name(&self) -> &str {
        &self.config.collection
    }

    pub async fn ping(&self) -> Result<bool> {
        debug!("Checking LanceDB connection");

        // Try to list tables as a ping equivalent
        match self.connection.table_names().execute().await {
            Ok(_) => {
                info!("LanceDB connection successful");
                Ok(true)
            }
            Err(e) => Err(AssistantError::Index(format!(
                "LanceDB connection failed: {}",
                e
            ))),
        }
    }

    pub async fn collection_exists(&self) -> Result<bool> {
        let table_names = self
            .connection
            .table_names()
            .execute()
            .await
            .map_err(|e| AssistantError::Index(format!("Failed to list tables: {}", e)))?;

        Ok(table_names
            .iter()
            .any(|name| name == &self.config.collection))
    }

    pub async fn get_collection(&self) -> Result<Table> {
        self.connection
            .open_table(&self.config.collection)
            .execute()
            .await
            .map_err(|e| {
                AssistantError::Index(format!(
                    "Failed to open collection {}: {}",
                    self.config.collection, e
                ))
            })
    }

    pub async fn get_passage_count(&self) -> Result<u64> {
        if !self.collection_exists().await? {
            return Ok(0);
        }

        let table = self.get_collection().await?;
        let count = table
            .count_rows(None)
            .await
            .map_err(|e| AssistantError::Index(format!("Failed to count rows: {}", e)))?;

        Ok(count as u64)
    }

    /// Search the collection for the passages nearest to a query embedding
    ///
    /// # Arguments
    /// * `query_embedding` - The query vector to search for
    /// * `limit` - Maximum number of results to return
    ///
    /// # Returns
    /// Vector of ScoredPassage in index-ranked order (most similar first);
    /// the order is taken as-is from LanceDB and never re-sorted here.
    pub async fn vector_search(
        &self,
        query_embedding: Vec<f32>,
        limit: usize,
    ) -> Result<Vec<ScoredPassage>> {
        if !self.collection_exists().await? {
            warn!("Collection does not exist, returning empty results");
            return Ok(Vec::new());
        }

        let table = self.get_collection().await?;

        debug!("Performing vector search with limit {}", limit);

        let query = table
            .vector_search(query_embedding)
            .map_err(|e| AssistantError::Index(format!("Failed to create vector search: {}", e)))?
            .limit(limit);

        let mut results_stream = query
            .execute()
            .await
            .map_err(|e| AssistantError::Index(format!("Vector search failed: {}", e)))?;

        // Convert Arrow RecordBatch results to ScoredPassage objects
        let mut passages = Vec::new();

        while let Some(batch_result) = results_stream.next().await {
            let batch = batch_result
                .map_err(|e| AssistantError::Index(format!("Failed to read result batch: {}", e)))?;

            let num_rows = batch.num_rows();

            let contents = batch
                .column_by_name("content")
                .ok_or_else(|| AssistantError::Index("Missing 'content' column".to_string()))?
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| AssistantError::Index("Invalid 'content' column type".to_string()))?;

            let sources = batch
                .column_by_name("source")
                .ok_or_else(|| AssistantError::Index("Missing 'source' column".to_string()))?
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| AssistantError::Index("Invalid 'source' column type".to_string()))?;

            // Page metadata may be null or missing entirely in older
            // collections; both map to the unknown-page sentinel
            let pages = batch
                .column_by_name("page")
                .and_then(|col| col.as_any().downcast_ref::<Int64Array>());

            // LanceDB returns distance score in a special column
            let distances = batch
                .column_by_name("_distance")
                .and_then(|col| col.as_any().downcast_ref::<Float32Array>());

            for i in 0..num_rows {
                let content = contents.value(i).to_string();
                let source = sources.value(i).to_string();

                let page = match pages {
                    Some(page_array) if !page_array.is_null(i) => page_array.value(i),
                    _ => PAGE_UNKNOWN,
                };

                // Convert distance to similarity (lower distance = higher similarity)
                let (score, distance) = if let Some(dist_array) = distances {
                    let dist = dist_array.value(i);
                    let similarity = 1.0 / (1.0 + dist);
                    (similarity, Some(dist))
                } else {
                    (0.0, None)
                };

                passages.push(ScoredPassage::new(content, source, page, score, distance));
            }
        }

        debug!("Vector search returned {} passages", passages.len());

        Ok(passages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(dir: &std::path::Path) -> DatabaseConfig {
        DatabaseConfig {
            uri: dir.join("db").display().to_string(),
            collection: "fmcsa_regulations".to_string(),
        }
    }

    #[tokio::test]
    async fn test_connect_and_ping_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let client = LanceDbClient::new(temp_config(dir.path())).await.unwrap();

        assert!(client.ping().await.unwrap());
        assert!(!client.collection_exists().await.unwrap());
    }

    #[tokio::test]
    async fn test_passage_count_is_zero_without_collection() {
        let dir = tempfile::tempdir().unwrap();
        let client = LanceDbClient::new(temp_config(dir.path())).await.unwrap();

        assert_eq!(client.get_passage_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_vector_search_without_collection_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let client = LanceDbClient::new(temp_config(dir.path())).await.unwrap();

        let results = client.vector_search(vec![0.0; 384], 3).await.unwrap();
        assert!(results.is_empty());
    }
}
