//! Configuration for the indexing pipeline

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Main indexer configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IndexerConfig {
    /// Chunking configuration
    pub chunking: ChunkingConfig,
    /// Embedding configuration
    pub embeddings: EmbeddingConfig,
    /// Upload configuration
    pub upload: UploadConfig,
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Chunk size in characters
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 100,
        }
    }
}

/// Embedding backend selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// Local ONNX Runtime session
    Onnx,
    /// Ollama HTTP API
    Ollama,
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Backend used to compute vectors
    pub backend: EmbeddingBackend,
    /// Model name (default: all-MiniLM-L6-v2)
    pub model: String,
    /// Embedding dimensions (384 for MiniLM, 768 for nomic-embed-text)
    pub dimensions: usize,
    /// Batch size for embedding generation
    pub batch_size: usize,
    /// Maximum token sequence length
    pub max_length: usize,
    /// Cache directory for downloaded model files
    pub cache_dir: PathBuf,
    /// Ollama base URL (only used by the Ollama backend)
    pub ollama_url: String,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::Onnx,
            model: "all-MiniLM-L6-v2".to_string(),
            dimensions: 384,
            batch_size: 32,
            max_length: 256,
            cache_dir: dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("rag-indexer")
                .join("models"),
            ollama_url: "http://localhost:11434".to_string(),
        }
    }
}

/// Vector upload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Records per upsert request
    pub batch_size: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self { batch_size: 100 }
    }
}

/// Pinecone credentials, injected into the store explicitly.
///
/// Held out of `IndexerConfig` so the secret never lands in serialized or
/// logged configuration.
#[derive(Debug, Clone)]
pub struct PineconeConfig {
    /// API key sent as the `Api-Key` header
    pub api_key: String,
    /// Environment/region, e.g. `us-east1-gcp`
    pub environment: String,
}

impl PineconeConfig {
    /// Read credentials from `PINECONE_API_KEY` and `PINECONE_ENVIRONMENT`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("PINECONE_API_KEY")
            .map_err(|_| Error::config("PINECONE_API_KEY is not set"))?;
        let environment = std::env::var("PINECONE_ENVIRONMENT")
            .map_err(|_| Error::config("PINECONE_ENVIRONMENT is not set"))?;
        Ok(Self {
            api_key,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IndexerConfig::default();
        assert_eq!(config.chunking.chunk_size, 1000);
        assert_eq!(config.chunking.overlap, 100);
        assert_eq!(config.embeddings.backend, EmbeddingBackend::Onnx);
        assert_eq!(config.embeddings.model, "all-MiniLM-L6-v2");
        assert_eq!(config.embeddings.dimensions, 384);
        assert_eq!(config.upload.batch_size, 100);
    }
}
