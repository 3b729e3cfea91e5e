//! rag-indexer: batch document indexer for vector search
//!
//! Walks a directory of PDF, text, Markdown, and HTML files, splits each
//! document into overlapping character chunks, embeds every chunk with a
//! sentence-embedding model, and upserts the vectors with their source
//! metadata into a named Pinecone index.

pub mod config;
pub mod error;
pub mod ingestion;
pub mod pipeline;
pub mod providers;
pub mod types;

pub use config::IndexerConfig;
pub use error::{Error, Result};
pub use pipeline::{Pipeline, RunSummary};
pub use types::{Chunk, ChunkMetadata, EmbeddedChunk, FileType, VectorRecord};
