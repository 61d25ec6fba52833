//! Plain-text extraction for uploaded judgments.
//!
//! Uploads arrive as pdf, docx, doc, or txt. PDFs go through `pdf-extract`; Word documents are
//! read as OOXML (`word/document.xml`) with one output line per non-empty paragraph. Legacy
//! binary `.doc` files are not OOXML and fail as an extraction error.

use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Maximum decompressed bytes read from `word/document.xml`.
const MAX_XML_ENTRY_BYTES: u64 = 50 * 1024 * 1024;

/// File extensions accepted by the upload endpoints.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "doc", "docx", "txt"];

/// Errors raised while turning uploaded bytes into text.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The file extension is not one of [`ALLOWED_EXTENSIONS`].
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    /// The PDF could not be parsed.
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
    /// The Word document could not be parsed.
    #[error("Word extraction failed: {0}")]
    Word(String),
    /// Reading the uploaded file failed.
    #[error("Failed to read upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Read `path` and extract its text, choosing the parser from `filename`'s extension.
pub fn extract_text_from_file(path: &Path, filename: &str) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path)?;
    extract_text(&bytes, filename)
}

/// Extract text from in-memory bytes, choosing the parser from `filename`'s extension.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<String, ExtractError> {
    let extension = file_extension(filename).unwrap_or_default();
    match extension.as_str() {
        "pdf" => extract_pdf(bytes),
        "doc" | "docx" => extract_docx(bytes),
        "txt" => Ok(String::from_utf8_lossy(bytes).into_owned()),
        _ => Err(ExtractError::UnsupportedType(format!(".{extension}"))),
    }
}

/// Lower-cased extension after the last `.`, if any.
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_lowercase())
}

/// Whether `filename` carries one of the accepted extensions.
pub fn allowed_file(filename: &str) -> bool {
    file_extension(filename)
        .map(|extension| ALLOWED_EXTENSIONS.contains(&extension.as_str()))
        .unwrap_or(false)
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map(|text| text.trim().to_string())
        .map_err(|e| ExtractError::Pdf(e.to_string()))
}

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))
        .map_err(|e| ExtractError::Word(e.to_string()))?;
    let entry = archive
        .by_name("word/document.xml")
        .map_err(|_| ExtractError::Word("word/document.xml not found".to_string()))?;
    let mut doc_xml = Vec::new();
    entry
        .take(MAX_XML_ENTRY_BYTES)
        .read_to_end(&mut doc_xml)
        .map_err(|e| ExtractError::Word(e.to_string()))?;
    if doc_xml.len() as u64 >= MAX_XML_ENTRY_BYTES {
        return Err(ExtractError::Word(
            "word/document.xml exceeds size limit".to_string(),
        ));
    }
    extract_paragraphs(&doc_xml)
}

fn extract_paragraphs(xml: &[u8]) -> Result<String, ExtractError> {
    use quick_xml::events::Event;

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text = false;
    let mut reader = quick_xml::Reader::from_reader(xml);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => in_text = true,
            Ok(Event::Text(te)) if in_text => {
                current.push_str(te.unescape().unwrap_or_default().as_ref());
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    if !current.is_empty() {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractError::Word(e.to_string())),
            _ => {}
        }
        buf.clear();
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }
    Ok(paragraphs.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn docx_with(document_xml: &str) -> Vec<u8> {
        let mut cursor = std::io::Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            let options = zip::write::SimpleFileOptions::default();
            writer
                .start_file("word/document.xml", options)
                .expect("start entry");
            writer
                .write_all(document_xml.as_bytes())
                .expect("write entry");
            writer.finish().expect("finish archive");
        }
        cursor.into_inner()
    }

    #[test]
    fn allowed_file_checks_extension_case_insensitively() {
        assert!(allowed_file("judgment.PDF"));
        assert!(allowed_file("order.docx"));
        assert!(!allowed_file("notes.md"));
        assert!(!allowed_file("no_extension"));
    }

    #[test]
    fn txt_is_decoded_lossily() {
        let text = extract_text(b"The appellant\xff argued", "a.txt").expect("text");
        assert!(text.starts_with("The appellant"));
        assert!(text.ends_with("argued"));
    }

    #[test]
    fn docx_paragraphs_become_lines() {
        let xml = r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body>
<w:p><w:r><w:t>The petition is </w:t></w:r><w:r><w:t>allowed.</w:t></w:r></w:p>
<w:p></w:p>
<w:p><w:r><w:t>Costs &amp; interest awarded.</w:t></w:r></w:p>
</w:body>
</w:document>"#;
        let text = extract_text(&docx_with(xml), "order.docx").expect("docx text");
        assert_eq!(text, "The petition is allowed.\nCosts & interest awarded.");
    }

    #[test]
    fn invalid_pdf_returns_error() {
        let err = extract_text(b"not a pdf", "a.pdf").unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
    }

    #[test]
    fn legacy_doc_is_an_extraction_error() {
        let err = extract_text(b"\xd0\xcf\x11\xe0 binary", "old.doc").unwrap_err();
        assert!(matches!(err, ExtractError::Word(_)));
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let err = extract_text(b"data", "image.png").unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedType(ext) if ext == ".png"));
    }
}
