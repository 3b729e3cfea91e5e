//! Vector store provider trait for persisting embeddings

use async_trait::async_trait;

use crate::error::Result;
use crate::types::VectorRecord;

/// Default number of records per upsert request
pub const DEFAULT_UPSERT_BATCH: usize = 100;

/// Trait for remote vector index storage
///
/// Implementations:
/// - `PineconeStore`: managed Pinecone index over REST
#[async_trait]
pub trait VectorStoreProvider: Send + Sync {
    /// Create the index if it does not exist yet
    async fn ensure_index(&self, index_name: &str, dimension: usize) -> Result<()>;

    /// Upsert one batch of records in a single remote call
    async fn upsert_batch(&self, index_name: &str, records: &[VectorRecord]) -> Result<()>;

    /// Upsert all records in sequential `batch_size()` slices.
    ///
    /// Returns the number of records written. A failing batch aborts the
    /// call; batches already written stay persisted.
    async fn upsert(&self, index_name: &str, records: &[VectorRecord]) -> Result<usize> {
        for batch in records.chunks(self.batch_size()) {
            self.upsert_batch(index_name, batch).await?;
        }
        Ok(records.len())
    }

    /// Records per upsert request
    fn batch_size(&self) -> usize {
        DEFAULT_UPSERT_BATCH
    }

    /// Check if the provider is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
