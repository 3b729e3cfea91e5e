//! Core data types

pub mod document;

pub use document::{vector_id, Chunk, ChunkMetadata, EmbeddedChunk, FileType, VectorRecord};
