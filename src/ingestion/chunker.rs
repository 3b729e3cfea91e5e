//! Fixed-stride sliding window chunking

use crate::error::{Error, Result};
use crate::types::Chunk;

/// Splits text into fixed-size, overlapping character windows
pub struct TextChunker {
    /// Window size in characters
    chunk_size: usize,
    /// Characters shared between consecutive windows
    overlap: usize,
}

impl TextChunker {
    /// Create a chunker.
    ///
    /// `chunk_size` must be positive and `overlap` strictly smaller,
    /// otherwise the window never advances.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::config("chunk_size must be positive"));
        }
        if overlap >= chunk_size {
            return Err(Error::config(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                overlap, chunk_size
            )));
        }
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    /// Slice text into overlapping windows of `chunk_size` characters.
    ///
    /// Windows are measured in characters, not bytes, so multi-byte input
    /// never splits a UTF-8 scalar. The final window may be shorter; empty
    /// input yields no windows.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let stride = self.chunk_size - self.overlap;

        let mut chunks = Vec::new();
        let mut start = 0;
        while start < chars.len() {
            let end = (start + self.chunk_size).min(chars.len());
            chunks.push(chars[start..end].iter().collect());
            start += stride;
        }
        chunks
    }

    /// Chunk text from `source`, tagging each window with its ordinal index
    pub fn chunk_document(&self, text: &str, source: &str) -> Vec<Chunk> {
        self.chunk(text)
            .into_iter()
            .enumerate()
            .map(|(i, window)| Chunk::new(window, source.to_string(), i as u32))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_is_rejected() {
        assert!(matches!(TextChunker::new(0, 0), Err(Error::Config(_))));
        assert!(matches!(TextChunker::new(100, 100), Err(Error::Config(_))));
        assert!(matches!(TextChunker::new(100, 150), Err(Error::Config(_))));
        assert!(TextChunker::new(100, 99).is_ok());
    }

    #[test]
    fn test_default_window_over_1500_chars() {
        let chunker = TextChunker::new(1000, 100).unwrap();
        let text: String = (0..1500).map(|i| char::from(b'a' + (i % 26) as u8)).collect();

        let chunks = chunker.chunk(&text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], text[0..1000]);
        assert_eq!(chunks[1], text[900..1500]);
        assert_eq!(chunks[1].len(), 600);
    }

    #[test]
    fn test_consecutive_windows_share_overlap() {
        let chunker = TextChunker::new(10, 3).unwrap();
        let text = "abcdefghijklmnopqrstuvwxyz";

        let chunks = chunker.chunk(text);
        for pair in chunks.windows(2) {
            let tail = &pair[0][pair[0].len() - 3..];
            assert!(pair[1].starts_with(tail));
        }
        assert!(chunks.last().unwrap().ends_with('z'));
    }

    #[test]
    fn test_short_text_is_a_single_chunk() {
        let chunker = TextChunker::new(1000, 100).unwrap();
        assert_eq!(chunker.chunk("short text"), vec!["short text"]);
        // exact fit is also one chunk
        let exact: String = "x".repeat(1000);
        assert_eq!(chunker.chunk(&exact), vec![exact.clone()]);
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        let chunker = TextChunker::new(1000, 100).unwrap();
        assert!(chunker.chunk("").is_empty());
    }

    #[test]
    fn test_chunking_is_deterministic() {
        let chunker = TextChunker::new(7, 2).unwrap();
        let text = "the quick brown fox jumps over the lazy dog";
        assert_eq!(chunker.chunk(text), chunker.chunk(text));
    }

    #[test]
    fn test_multibyte_text_splits_on_character_boundaries() {
        let chunker = TextChunker::new(4, 1).unwrap();
        let text = "héllö wörld 日本語テキスト";

        let chunks = chunker.chunk(text);
        assert_eq!(chunks[0].chars().count(), 4);
        assert!(chunks.iter().all(|c| c.chars().count() <= 4));
        // the final window reaches the last character
        assert!(chunks.last().unwrap().ends_with('ト'));
    }

    #[test]
    fn test_document_chunks_carry_source_and_index() {
        let chunker = TextChunker::new(5, 1).unwrap();
        let chunks = chunker.chunk_document("abcdefghij", "data/a.txt");

        assert!(!chunks.is_empty());
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.metadata.source, "data/a.txt");
            assert_eq!(chunk.metadata.chunk_index, i as u32);
        }
    }
}
