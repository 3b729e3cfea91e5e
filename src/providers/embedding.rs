//! Embedding provider trait for generating text embeddings

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Chunk, EmbeddedChunk};

/// Trait for generating text embeddings
///
/// Implementations:
/// - `OnnxEmbedder`: local ONNX Runtime session (all-MiniLM-L6-v2)
/// - `OllamaEmbedder`: local Ollama server (nomic-embed-text)
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts, preserving input order.
    ///
    /// Default implementation calls `embed` sequentially.
    /// Implementations should override for better performance.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    /// Get embedding dimensions (e.g., 384 for all-MiniLM-L6-v2)
    fn dimensions(&self) -> usize;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}

/// Embed chunks, pairing each vector with its chunk's metadata and text.
///
/// Order follows the input. The first provider failure aborts the whole
/// call with no partial results.
pub async fn embed_chunks(
    provider: &dyn EmbeddingProvider,
    chunks: Vec<Chunk>,
) -> Result<Vec<EmbeddedChunk>> {
    let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
    let vectors = provider.embed_batch(&texts).await?;

    Ok(chunks
        .into_iter()
        .zip(vectors)
        .map(|(chunk, vector)| EmbeddedChunk {
            vector,
            metadata: chunk.metadata,
            text: chunk.text,
        })
        .collect())
}
