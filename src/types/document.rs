//! Document, chunk, and vector record types

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Supported file types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// PDF document
    Pdf,
    /// Plain text file
    Txt,
    /// Markdown file
    Markdown,
    /// HTML document
    Html,
    /// Unknown file type
    Unknown,
}

impl FileType {
    /// Detect file type from extension.
    ///
    /// The match is exact and case-sensitive: `pdf` is a PDF, `PDF` is not.
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "pdf" => Self::Pdf,
            "txt" => Self::Txt,
            "md" => Self::Markdown,
            "html" => Self::Html,
            _ => Self::Unknown,
        }
    }

    /// Check if this is a supported file type
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Get display name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Pdf => "PDF",
            Self::Txt => "Text File",
            Self::Markdown => "Markdown",
            Self::Html => "HTML",
            Self::Unknown => "Unknown",
        }
    }
}

/// Provenance carried by every chunk and every upserted vector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkMetadata {
    /// Path of the file the chunk was cut from
    pub source: String,
    /// 0-based position of the chunk within its source
    pub chunk_index: u32,
}

/// A bounded slice of a document's text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Text content
    pub text: String,
    /// Source information
    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(text: String, source: String, chunk_index: u32) -> Self {
        Self {
            text,
            metadata: ChunkMetadata {
                source,
                chunk_index,
            },
        }
    }
}

/// A chunk paired with its embedding vector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddedChunk {
    /// Embedding vector (length = model output dimension)
    pub vector: Vec<f32>,
    /// Source information, unchanged from the chunk
    pub metadata: ChunkMetadata,
    /// Text content, unchanged from the chunk
    pub text: String,
}

impl EmbeddedChunk {
    /// Convert to the wire shape upserted into the vector index
    pub fn to_record(&self) -> VectorRecord {
        VectorRecord {
            id: vector_id(&self.metadata.source, self.metadata.chunk_index),
            values: self.vector.clone(),
            metadata: self.metadata.clone(),
        }
    }
}

/// One upserted `(id, vector, metadata)` record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorRecord {
    /// Record identifier, stable across runs
    pub id: String,
    /// Embedding vector
    pub values: Vec<f32>,
    /// Source information
    pub metadata: ChunkMetadata,
}

/// Derive a stable vector id from a chunk's provenance.
///
/// Hashing `source:chunk_index` makes re-ingesting the same tree overwrite
/// its previous vectors instead of piling up duplicates.
pub fn vector_id(source: &str, chunk_index: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    hasher.update(b":");
    hasher.update(chunk_index.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_dispatch() {
        assert_eq!(FileType::from_extension("pdf"), FileType::Pdf);
        assert_eq!(FileType::from_extension("txt"), FileType::Txt);
        assert_eq!(FileType::from_extension("md"), FileType::Markdown);
        assert_eq!(FileType::from_extension("html"), FileType::Html);
        assert_eq!(FileType::from_extension("xyz"), FileType::Unknown);
        assert_eq!(FileType::from_extension(""), FileType::Unknown);
    }

    #[test]
    fn test_extension_match_is_case_sensitive() {
        assert_eq!(FileType::from_extension("PDF"), FileType::Unknown);
        assert_eq!(FileType::from_extension("Txt"), FileType::Unknown);
    }

    #[test]
    fn test_vector_id_is_deterministic() {
        let a = vector_id("docs/faq.md", 3);
        let b = vector_id("docs/faq.md", 3);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_vector_id_distinguishes_source_and_index() {
        assert_ne!(vector_id("a.txt", 0), vector_id("a.txt", 1));
        assert_ne!(vector_id("a.txt", 0), vector_id("b.txt", 0));
    }

    #[test]
    fn test_record_carries_chunk_metadata() {
        let embedded = EmbeddedChunk {
            vector: vec![0.1, 0.2, 0.3],
            metadata: ChunkMetadata {
                source: "notes.txt".to_string(),
                chunk_index: 7,
            },
            text: "hello".to_string(),
        };

        let record = embedded.to_record();
        assert_eq!(record.id, vector_id("notes.txt", 7));
        assert_eq!(record.values, vec![0.1, 0.2, 0.3]);
        assert_eq!(record.metadata, embedded.metadata);
    }
}
