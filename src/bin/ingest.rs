//! Batch indexing binary
//!
//! Run with: cargo run -- ./documents support-index

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rag_indexer::config::{EmbeddingBackend, IndexerConfig, PineconeConfig};
use rag_indexer::pipeline::Pipeline;
use rag_indexer::providers::{
    EmbeddingProvider, OllamaEmbedder, OnnxEmbedder, PineconeStore, VectorStoreProvider,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    /// Local ONNX Runtime session
    Onnx,
    /// Ollama HTTP API
    Ollama,
}

#[derive(Parser)]
#[command(
    name = "rag-indexer",
    version,
    about = "Chunk, embed, and upsert a directory of documents into Pinecone"
)]
struct Args {
    /// Directory of documents to ingest (pdf, txt, md, html)
    documents_dir: PathBuf,

    /// Target Pinecone index name
    index_name: String,

    /// Chunk size in characters
    #[arg(long, default_value_t = 1000)]
    chunk_size: usize,

    /// Overlap between consecutive chunks in characters
    #[arg(long, default_value_t = 100)]
    overlap: usize,

    /// Embedding backend
    #[arg(long, value_enum, default_value_t = Backend::Onnx)]
    backend: Backend,

    /// Embedding model name (default: all-MiniLM-L6-v2)
    #[arg(long)]
    model: Option<String>,

    /// Embedding dimensions (default: 384, matching all-MiniLM-L6-v2)
    #[arg(long)]
    dimensions: Option<usize>,

    /// Records per upsert request
    #[arg(long, default_value_t = 100)]
    upload_batch_size: usize,

    /// Ollama base URL (only used with --backend ollama)
    #[arg(long, default_value = "http://localhost:11434")]
    ollama_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rag_indexer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = IndexerConfig::default();
    config.chunking.chunk_size = args.chunk_size;
    config.chunking.overlap = args.overlap;
    config.upload.batch_size = args.upload_batch_size;
    config.embeddings.backend = match args.backend {
        Backend::Onnx => EmbeddingBackend::Onnx,
        Backend::Ollama => EmbeddingBackend::Ollama,
    };
    config.embeddings.ollama_url = args.ollama_url;
    if let Some(model) = args.model {
        config.embeddings.model = model;
    }
    if let Some(dimensions) = args.dimensions {
        config.embeddings.dimensions = dimensions;
    }

    // Credentials are read here, once, and injected into the store
    let pinecone = PineconeConfig::from_env()?;

    tracing::info!("Documents: {}", args.documents_dir.display());
    tracing::info!("Index: {}", args.index_name);
    tracing::info!(
        "Chunking: size {} / overlap {}",
        config.chunking.chunk_size,
        config.chunking.overlap
    );
    tracing::info!(
        "Embeddings: {} ({} dims)",
        config.embeddings.model,
        config.embeddings.dimensions
    );

    let embedder: Arc<dyn EmbeddingProvider> = match config.embeddings.backend {
        EmbeddingBackend::Onnx => Arc::new(OnnxEmbedder::new(&config.embeddings).await?),
        EmbeddingBackend::Ollama => Arc::new(OllamaEmbedder::new(&config.embeddings)),
    };
    if !embedder.health_check().await? {
        tracing::warn!("Embedding backend '{}' is not reachable", embedder.name());
    }

    let store: Arc<dyn VectorStoreProvider> =
        Arc::new(PineconeStore::new(&pinecone, config.upload.batch_size));

    let pipeline = Pipeline::new(&config, embedder, store)?;
    let summary = pipeline.run(&args.documents_dir, &args.index_name).await?;

    tracing::info!(
        "Done: {} files, {} chunks, {} vectors upserted",
        summary.files,
        summary.chunks,
        summary.uploaded
    );

    Ok(())
}
