//! Pluggable embedding and vector store backends

pub mod embedding;
pub mod ollama;
pub mod onnx;
pub mod pinecone;
pub mod vector_store;

pub use embedding::{embed_chunks, EmbeddingProvider};
pub use ollama::OllamaEmbedder;
pub use onnx::OnnxEmbedder;
pub use pinecone::PineconeStore;
pub use vector_store::VectorStoreProvider;
