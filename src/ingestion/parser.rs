//! Multi-format file parser

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::FileType;

/// Multi-format text extractor
pub struct FileParser;

impl FileParser {
    /// Read a file and extract its text content.
    pub fn read(path: &Path) -> Result<String> {
        let data = std::fs::read(path)?;
        Self::parse(&path.to_string_lossy(), &data)
    }

    /// Extract text from in-memory file data based on its extension
    pub fn parse(filename: &str, data: &[u8]) -> Result<String> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        match FileType::from_extension(extension) {
            FileType::Pdf => Self::parse_pdf(filename, data),
            FileType::Txt | FileType::Markdown => Ok(Self::parse_text(data)),
            FileType::Html => Ok(Self::parse_html(data)),
            FileType::Unknown => Err(Error::UnsupportedFileType(extension.to_string())),
        }
    }

    /// Extract PDF text page by page, joined with single spaces
    fn parse_pdf(filename: &str, data: &[u8]) -> Result<String> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(data)
            .map_err(|e| Error::file_parse(filename, e.to_string()))?;
        Ok(pages.join(" "))
    }

    /// Plain text and markdown are returned verbatim
    fn parse_text(data: &[u8]) -> String {
        String::from_utf8_lossy(data).to_string()
    }

    /// Strip HTML markup, keeping visible body text
    fn parse_html(data: &[u8]) -> String {
        let html = String::from_utf8_lossy(data);
        let document = scraper::Html::parse_document(&html);

        let body_selector = scraper::Selector::parse("body").unwrap();
        let mut content = String::new();

        if let Some(body) = document.select(&body_selector).next() {
            for text in body.text() {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    if !content.is_empty() {
                        content.push(' ');
                    }
                    content.push_str(trimmed);
                }
            }
        }

        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_and_markdown_are_verbatim() {
        let data = b"# Title\n\nbody text\n";
        assert_eq!(FileParser::parse("notes.txt", data).unwrap(), "# Title\n\nbody text\n");
        assert_eq!(FileParser::parse("notes.md", data).unwrap(), "# Title\n\nbody text\n");
    }

    #[test]
    fn test_html_markup_is_stripped() {
        let data = b"<html><body><h1>Refunds</h1><p>Contact <b>support</b> first.</p></body></html>";
        let text = FileParser::parse("faq.html", data).unwrap();
        assert_eq!(text, "Refunds Contact support first.");
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = FileParser::parse("setup.exe", b"MZ").unwrap_err();
        match err {
            Error::UnsupportedFileType(ext) => assert_eq!(ext, "exe"),
            other => panic!("expected UnsupportedFileType, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_extension_is_rejected() {
        let err = FileParser::parse("README", b"plain").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileType(_)));
    }

    #[test]
    fn test_extension_case_mismatch_is_rejected() {
        let err = FileParser::parse("notes.TXT", b"plain").unwrap_err();
        match err {
            Error::UnsupportedFileType(ext) => assert_eq!(ext, "TXT"),
            other => panic!("expected UnsupportedFileType, got {other:?}"),
        }
    }

    #[test]
    fn test_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("greeting.txt");
        std::fs::write(&path, "hello from disk").unwrap();

        assert_eq!(FileParser::read(&path).unwrap(), "hello from disk");
    }
}
