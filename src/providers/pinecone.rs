//! Pinecone vector store provider
//!
//! Index management goes through the controller plane
//! (`controller.{environment}.pinecone.io`); upserts go to the per-index
//! data-plane host reported by the describe call. Every request carries the
//! `Api-Key` header from the injected credentials.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::PineconeConfig;
use crate::error::{Error, Result};
use crate::types::VectorRecord;

use super::vector_store::VectorStoreProvider;

/// Pinecone-backed vector store
pub struct PineconeStore {
    client: reqwest::Client,
    api_key: String,
    environment: String,
    batch_size: usize,
    /// Data-plane hosts, resolved once per index
    hosts: RwLock<HashMap<String, String>>,
}

#[derive(Serialize)]
struct CreateIndexRequest<'a> {
    name: &'a str,
    dimension: usize,
    metric: &'a str,
}

#[derive(Deserialize)]
struct DescribeIndexResponse {
    status: IndexStatus,
}

#[derive(Deserialize)]
struct IndexStatus {
    host: String,
    #[serde(default)]
    ready: bool,
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    vectors: &'a [VectorRecord],
}

impl PineconeStore {
    /// Create a new Pinecone store from explicit credentials
    pub fn new(config: &PineconeConfig, batch_size: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            environment: config.environment.clone(),
            batch_size,
            hosts: RwLock::new(HashMap::new()),
        }
    }

    fn controller_url(&self, path: &str) -> String {
        format!("https://controller.{}.pinecone.io{}", self.environment, path)
    }

    /// List the names of all indexes in this environment
    async fn list_indexes(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(self.controller_url("/databases"))
            .header("Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| Error::vector_db(format!("Pinecone list indexes failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::vector_db(format!(
                "Pinecone list indexes failed ({}): {}",
                status, body
            )));
        }

        let names: Vec<String> = response
            .json()
            .await
            .map_err(|e| Error::vector_db(format!("Failed to parse index list: {}", e)))?;
        Ok(names)
    }

    async fn create_index(&self, name: &str, dimension: usize) -> Result<()> {
        let request = CreateIndexRequest {
            name,
            dimension,
            metric: "cosine",
        };

        let response = self
            .client
            .post(self.controller_url("/databases"))
            .header("Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::vector_db(format!("Pinecone create index failed: {}", e)))?;

        // 409 means another run created it between our list and create
        if response.status() == reqwest::StatusCode::CONFLICT {
            return Ok(());
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::vector_db(format!(
                "Pinecone create index failed ({}): {}",
                status, body
            )));
        }

        Ok(())
    }

    /// Resolve (and cache) the data-plane host for an index
    async fn index_host(&self, name: &str) -> Result<String> {
        if let Some(host) = self.hosts.read().get(name) {
            return Ok(host.clone());
        }

        let response = self
            .client
            .get(self.controller_url(&format!("/databases/{}", name)))
            .header("Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| Error::vector_db(format!("Pinecone describe index failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::vector_db(format!(
                "Pinecone describe index '{}' failed ({}): {}",
                name, status, body
            )));
        }

        let described: DescribeIndexResponse = response
            .json()
            .await
            .map_err(|e| Error::vector_db(format!("Failed to parse index description: {}", e)))?;

        if !described.status.ready {
            tracing::warn!("Pinecone index '{}' is not ready yet", name);
        }

        self.hosts
            .write()
            .insert(name.to_string(), described.status.host.clone());
        Ok(described.status.host)
    }
}

#[async_trait]
impl VectorStoreProvider for PineconeStore {
    async fn ensure_index(&self, index_name: &str, dimension: usize) -> Result<()> {
        let existing = self.list_indexes().await?;
        if existing.iter().any(|n| n == index_name) {
            return Ok(());
        }

        tracing::info!(
            "Creating Pinecone index '{}' with dimension {}",
            index_name,
            dimension
        );
        self.create_index(index_name, dimension).await
    }

    async fn upsert_batch(&self, index_name: &str, records: &[VectorRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let host = self.index_host(index_name).await?;
        let url = format!("https://{}/vectors/upsert", host);

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&UpsertRequest { vectors: records })
            .send()
            .await
            .map_err(|e| Error::vector_db(format!("Pinecone upsert failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::vector_db(format!(
                "Pinecone upsert failed ({}): {}",
                status, body
            )));
        }

        tracing::debug!("Upserted {} records into '{}'", records.len(), index_name);
        Ok(())
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.list_indexes().await.is_ok())
    }

    fn name(&self) -> &str {
        "pinecone"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChunkMetadata;

    #[test]
    fn test_upsert_wire_format() {
        let records = vec![VectorRecord {
            id: "abc".to_string(),
            values: vec![0.5, -0.25],
            metadata: ChunkMetadata {
                source: "docs/a.txt".to_string(),
                chunk_index: 2,
            },
        }];

        let body = serde_json::to_value(UpsertRequest { vectors: &records }).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "vectors": [{
                    "id": "abc",
                    "values": [0.5, -0.25],
                    "metadata": { "source": "docs/a.txt", "chunk_index": 2 }
                }]
            })
        );
    }

    #[test]
    fn test_create_index_wire_format() {
        let body = serde_json::to_value(CreateIndexRequest {
            name: "support-index",
            dimension: 384,
            metric: "cosine",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "name": "support-index", "dimension": 384, "metric": "cosine" })
        );
    }
}
