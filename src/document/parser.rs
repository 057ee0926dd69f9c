use anyhow::{anyhow, Result};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1250};
use lopdf::Document as PdfDocument;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub filename: String,
    pub content: String,
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone)]
pub struct DocumentMetadata {
    pub file_type: String,
    pub pages: Option<usize>,
    pub char_count: usize,
    pub encoding: String,
}

/// Text extraction boundary. Everything downstream works on the
/// (filename, text) pair this produces.
pub struct DocumentParser;

impl DocumentParser {
    pub fn parse(path: &Path) -> Result<ParsedDocument> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow!("Invalid file name: {:?}", path))?
            .to_string();

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        debug!("Parsing file: {:?} (type: {})", path, extension);

        let (content, metadata) = match extension.as_str() {
            "pdf" => Self::parse_pdf(path)?,
            // Markdown keeps its structure markers, so it reads as text
            _ => Self::parse_text(path)?,
        };

        debug!("Parsed {} characters from {:?}", content.len(), path);

        Ok(ParsedDocument {
            filename,
            content,
            metadata,
        })
    }

    /// Extract text page by page, skipping pages lopdf cannot decode
    fn parse_pdf(path: &Path) -> Result<(String, DocumentMetadata)> {
        let doc = PdfDocument::load(path)?;
        let pages = doc.get_pages();
        let page_count = pages.len();

        let mut content = String::new();

        for (page_num, _) in pages.iter() {
            match doc.extract_text(&[*page_num]) {
                Ok(text) => {
                    content.push_str(&text);
                    content.push('\n');
                }
                Err(e) => {
                    warn!("Failed to extract text from page {}: {}", page_num, e);
                }
            }
        }

        let metadata = DocumentMetadata {
            file_type: "application/pdf".to_string(),
            pages: Some(page_count),
            char_count: content.chars().count(),
            encoding: "UTF-8".to_string(),
        };

        Ok((content, metadata))
    }

    fn parse_text(path: &Path) -> Result<(String, DocumentMetadata)> {
        let raw_content = fs::read(path)?;
        let (content, encoding) = Self::decode_text(&raw_content);

        let metadata = DocumentMetadata {
            file_type: mime_guess::from_path(path)
                .first_or_text_plain()
                .essence_str()
                .to_string(),
            pages: None,
            char_count: content.chars().count(),
            encoding: encoding.name().to_string(),
        };

        Ok((content, metadata))
    }

    /// UTF-8 first, Windows-1250 fallback for older Serbian material
    fn decode_text(bytes: &[u8]) -> (String, &'static Encoding) {
        if let Ok(text) = std::str::from_utf8(bytes) {
            return (text.to_string(), UTF_8);
        }

        let (decoded, _, _) = WINDOWS_1250.decode(bytes);
        (decoded.into_owned(), WINDOWS_1250)
    }
}
