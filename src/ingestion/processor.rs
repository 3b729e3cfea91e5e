//! Per-file ingestion: extract, normalize, chunk

use std::path::Path;

use crate::config::ChunkingConfig;
use crate::error::Result;
use crate::types::Chunk;

use super::chunker::TextChunker;
use super::parser::FileParser;
use super::preprocess;

/// Turns one file into its ordered chunks
pub struct DocumentProcessor {
    chunker: TextChunker,
}

impl DocumentProcessor {
    /// Create a processor, validating the chunking configuration
    pub fn new(config: &ChunkingConfig) -> Result<Self> {
        Ok(Self {
            chunker: TextChunker::new(config.chunk_size, config.overlap)?,
        })
    }

    /// Extract, normalize, and chunk a single file.
    ///
    /// The chunks carry the file's path as their `source`.
    pub fn process_file(&self, path: &Path) -> Result<Vec<Chunk>> {
        let raw = FileParser::read(path)?;
        let text = preprocess::clean(&raw);
        Ok(self.chunker.chunk_document(text, &path.to_string_lossy()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processor() -> DocumentProcessor {
        DocumentProcessor::new(&ChunkingConfig::default()).unwrap()
    }

    #[test]
    fn test_file_is_trimmed_before_chunking() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("padded.txt");
        std::fs::write(&path, "   hello world   ").unwrap();

        let chunks = processor().process_file(&path).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "hello world");
        assert_eq!(chunks[0].metadata.source, path.to_string_lossy());
    }

    #[test]
    fn test_whitespace_only_file_yields_no_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.txt");
        std::fs::write(&path, " \n\t ").unwrap();

        assert!(processor().process_file(&path).unwrap().is_empty());
    }

    #[test]
    fn test_unsupported_file_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tool.exe");
        std::fs::write(&path, b"MZ").unwrap();

        assert!(processor().process_file(&path).is_err());
    }
}
