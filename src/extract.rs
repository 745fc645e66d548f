//! Multi-format text extraction for resume documents.
//!
//! Intake supplies raw bytes plus a detected [`DocumentFormat`]; this module
//! returns plain UTF-8 text. Extraction never panics on malformed input:
//! failures come back as [`ExtractError`] so the caller can skip the file
//! and keep the batch going.

use std::io::Read;
use std::path::Path;

/// Maximum decompressed bytes to read from a single ZIP entry (zip-bomb
/// protection).
const MAX_XML_ENTRY_BYTES: u64 = 50 * 1024 * 1024;

/// File formats the extractor understands, detected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    PlainText,
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Detects the format from a path's extension (case-insensitive).
    /// Unknown or missing extensions yield `None`.
    pub fn from_extension(path: &Path) -> Option<DocumentFormat> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        DocumentFormat::from_name(&ext)
    }

    /// Resolves a format name as used by the `--format` CLI override.
    pub fn from_name(name: &str) -> Option<DocumentFormat> {
        match name {
            "txt" => Some(DocumentFormat::PlainText),
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::PlainText => "txt",
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }

    fn extractor(&self) -> &'static dyn TextExtractor {
        match self {
            DocumentFormat::PlainText => &PlainTextExtractor,
            DocumentFormat::Pdf => &PdfExtractor,
            DocumentFormat::Docx => &DocxExtractor,
        }
    }
}

/// Extraction error. Intake maps these to per-resume skip reasons instead of
/// aborting the run.
#[derive(Debug)]
pub enum ExtractError {
    UnsupportedFormat(String),
    Pdf(String),
    Docx(String),
    InvalidUtf8(String),
    TooLarge { size: u64, limit: u64 },
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::UnsupportedFormat(name) => {
                write!(f, "unsupported file format: {}", name)
            }
            ExtractError::Pdf(e) => write!(f, "PDF extraction failed: {}", e),
            ExtractError::Docx(e) => write!(f, "DOCX extraction failed: {}", e),
            ExtractError::InvalidUtf8(e) => write!(f, "text file is not valid UTF-8: {}", e),
            ExtractError::TooLarge { size, limit } => {
                write!(f, "file is {} bytes, over the {} byte limit", size, limit)
            }
        }
    }
}

impl std::error::Error for ExtractError {}

/// Per-format extraction capability. One implementation per
/// [`DocumentFormat`]; dispatch goes through [`extract_text`].
pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

/// Extracts plain text from raw document bytes.
pub fn extract_text(bytes: &[u8], format: DocumentFormat) -> Result<String, ExtractError> {
    format.extractor().extract(bytes)
}

/// Strict UTF-8 passthrough. The content is the text, byte for byte.
struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        String::from_utf8(bytes.to_vec()).map_err(|e| ExtractError::InvalidUtf8(e.to_string()))
    }
}

/// PDF text, pages concatenated in document order. No layout or column
/// reconstruction is attempted.
struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
    }
}

/// DOCX text from `word/document.xml`, paragraphs separated by newlines in
/// document order.
struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))
            .map_err(|e| ExtractError::Docx(e.to_string()))?;
        let mut doc_xml = Vec::new();
        let mut found = false;
        for i in 0..archive.len() {
            let entry = archive
                .by_index(i)
                .map_err(|e| ExtractError::Docx(e.to_string()))?;
            if entry.name() == "word/document.xml" {
                entry
                    .take(MAX_XML_ENTRY_BYTES)
                    .read_to_end(&mut doc_xml)
                    .map_err(|e| ExtractError::Docx(e.to_string()))?;
                if doc_xml.len() as u64 >= MAX_XML_ENTRY_BYTES {
                    return Err(ExtractError::Docx(
                        "word/document.xml exceeds size limit".to_string(),
                    ));
                }
                found = true;
                break;
            }
        }
        if !found {
            return Err(ExtractError::Docx(
                "word/document.xml not found".to_string(),
            ));
        }
        extract_paragraph_text(&doc_xml)
    }
}

/// Walks the document XML collecting `<w:t>` text runs; every closed
/// `<w:p>` contributes a newline so paragraphs stay separated (the final
/// paragraph does not add a trailing one).
fn extract_paragraph_text(xml: &[u8]) -> Result<String, ExtractError> {
    let mut out = String::new();
    let mut reader = quick_xml::Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Start(e)) => {
                if e.local_name().as_ref() == b"t" {
                    if let Ok(quick_xml::events::Event::Text(te)) = reader.read_event_into(&mut buf)
                    {
                        out.push_str(te.unescape().unwrap_or_default().as_ref());
                    }
                }
            }
            Ok(quick_xml::events::Event::End(e)) => {
                if e.local_name().as_ref() == b"p" {
                    out.push('\n');
                }
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => return Err(ExtractError::Docx(e.to_string())),
            _ => {}
        }
        buf.clear();
    }
    if out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}
