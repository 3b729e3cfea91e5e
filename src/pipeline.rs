//! Directory-to-index orchestration

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use walkdir::WalkDir;

use crate::config::IndexerConfig;
use crate::error::Result;
use crate::ingestion::DocumentProcessor;
use crate::providers::embedding::{embed_chunks, EmbeddingProvider};
use crate::providers::vector_store::VectorStoreProvider;
use crate::types::{Chunk, VectorRecord};

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Files processed
    pub files: usize,
    /// Chunks produced across all files
    pub chunks: usize,
    /// Vectors upserted into the index
    pub uploaded: usize,
}

/// Batch pipeline: walk a directory, chunk every file, embed, upload
pub struct Pipeline {
    processor: DocumentProcessor,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStoreProvider>,
}

impl Pipeline {
    /// Create a pipeline, validating the chunking configuration
    pub fn new(
        config: &IndexerConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStoreProvider>,
    ) -> Result<Self> {
        Ok(Self {
            processor: DocumentProcessor::new(&config.chunking)?,
            embedder,
            store,
        })
    }

    /// Process every file under `directory` and upsert into `index_name`.
    ///
    /// Fully sequential: all files are chunked first, then the whole
    /// collection is embedded, then uploaded. The first error from any
    /// stage aborts the run; batches already upserted stay in the index.
    pub async fn run(&self, directory: &Path, index_name: &str) -> Result<RunSummary> {
        let started = Instant::now();

        let mut all_chunks: Vec<Chunk> = Vec::new();
        let mut files = 0usize;

        for entry in WalkDir::new(directory) {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let chunks = self.processor.process_file(path)?;
            tracing::debug!("{}: {} chunks", path.display(), chunks.len());

            files += 1;
            all_chunks.extend(chunks);
        }

        let chunk_count = all_chunks.len();
        tracing::info!("Chunked {} files into {} chunks", files, chunk_count);

        if all_chunks.is_empty() {
            return Ok(RunSummary {
                files,
                chunks: 0,
                uploaded: 0,
            });
        }

        let embedded = embed_chunks(self.embedder.as_ref(), all_chunks).await?;
        tracing::info!(
            "Embedded {} chunks with {} provider",
            embedded.len(),
            self.embedder.name()
        );

        let records: Vec<VectorRecord> = embedded.iter().map(|e| e.to_record()).collect();
        let dimension = records[0].values.len();

        self.store.ensure_index(index_name, dimension).await?;
        let uploaded = self.store.upsert(index_name, &records).await?;

        tracing::info!(
            "Upserted {} vectors into '{}' via {} in {:.2?}",
            uploaded,
            index_name,
            self.store.name(),
            started.elapsed()
        );

        Ok(RunSummary {
            files,
            chunks: chunk_count,
            uploaded,
        })
    }
}
