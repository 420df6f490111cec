//! Upload text extraction
//!
//! Turns an uploaded file (filename, declared content type, bytes) into the
//! UTF-8 text the analysis pipeline consumes. Kind detection uses only the
//! declared content type and filename suffix; file contents are never
//! sniffed. Word-processor documents are read as OOXML containers: the text
//! runs of each paragraph in `word/document.xml`, paragraphs joined with
//! newlines.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::Read;
use thiserror::Error;

const CONTENT_TYPE_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const DOCX_DOCUMENT_PATH: &str = "word/document.xml";

/// Text extraction failures, mapped to intake HTTP statuses in `error.rs`.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file type: {filename} ({content_type}). Please upload .txt, .md, or .docx.")]
    UnsupportedType {
        content_type: String,
        filename: String,
    },

    #[error("Failed to decode file as UTF-8: {0}")]
    Decode(String),

    #[error("Failed to parse word-processor document: {0}")]
    DocumentParse(String),

    #[error("Extracted text content is empty.")]
    Empty,
}

/// Extract UTF-8 text from an uploaded file.
///
/// Plain text and markdown decode strictly; a word-processor document has
/// its paragraph text concatenated with `\n` separators; any other declared
/// kind is tried as UTF-8 text and rejected as unsupported if that fails.
/// Empty or whitespace-only extractions are rejected here, before the
/// pipeline ever runs.
pub fn extract_text(filename: &str, content_type: &str, data: &[u8]) -> Result<String, ExtractError> {
    let lowered = filename.to_ascii_lowercase();

    let text = if content_type == CONTENT_TYPE_DOCX || lowered.ends_with(".docx") {
        tracing::debug!(filename, "processing upload as word-processor document");
        extract_docx_text(data)?
    } else if content_type.starts_with("text/")
        || lowered.ends_with(".txt")
        || lowered.ends_with(".md")
        || lowered.ends_with(".markdown")
    {
        tracing::debug!(filename, content_type, "processing upload as text");
        decode_utf8(data)?
    } else {
        // Unknown declared kind: try it as UTF-8 text before rejecting.
        tracing::debug!(
            filename,
            content_type,
            "unknown upload kind, attempting UTF-8 decode"
        );
        match decode_utf8(data) {
            Ok(text) => text,
            Err(_) => {
                return Err(ExtractError::UnsupportedType {
                    content_type: content_type.to_string(),
                    filename: filename.to_string(),
                })
            }
        }
    };

    if text.trim().is_empty() {
        tracing::warn!(filename, "upload yielded no text content");
        return Err(ExtractError::Empty);
    }
    Ok(text)
}

fn decode_utf8(data: &[u8]) -> Result<String, ExtractError> {
    std::str::from_utf8(data)
        .map(str::to_string)
        .map_err(|e| ExtractError::Decode(e.to_string()))
}

/// Pull paragraph text out of the OOXML main document part.
///
/// Text runs (`w:t`) accumulate into the current paragraph; explicit breaks
/// and tabs inside a run map to `\n` and `\t`; each closed paragraph
/// (`w:p`), including empty ones, becomes one output line.
fn extract_docx_text(data: &[u8]) -> Result<String, ExtractError> {
    let cursor = std::io::Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor)
        .map_err(|e| ExtractError::DocumentParse(format!("not a .docx container: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCX_DOCUMENT_PATH)
        .map_err(|e| ExtractError::DocumentParse(format!("missing {DOCX_DOCUMENT_PATH}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::DocumentParse(format!("unreadable {DOCX_DOCUMENT_PATH}: {e}")))?;

    let mut reader = Reader::from_str(&xml);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"p" => current.clear(),
                b"t" => in_text_run = true,
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"p" => paragraphs.push(std::mem::take(&mut current)),
                b"t" => in_text_run = false,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"br" => current.push('\n'),
                b"tab" => current.push('\t'),
                b"p" => paragraphs.push(String::new()),
                _ => {}
            },
            Ok(Event::Text(ref t)) if in_text_run => {
                let text = t
                    .unescape()
                    .map_err(|e| ExtractError::DocumentParse(format!("bad text run: {e}")))?;
                current.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ExtractError::DocumentParse(format!(
                    "malformed document XML: {e}"
                )))
            }
        }
    }

    Ok(paragraphs.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Build a minimal .docx container around the given document.xml body.
    fn docx_with_body(body: &str) -> Vec<u8> {
        let xml = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
             <w:body>{body}</w:body></w:document>"
        );
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();
        writer.start_file(DOCX_DOCUMENT_PATH, options).unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_plain_text_decodes() {
        let text = extract_text("speech.txt", "text/plain", b"We must act now.").unwrap();
        assert_eq!(text, "We must act now.");
    }

    #[test]
    fn test_markdown_by_content_type() {
        let text = extract_text("notes", "text/markdown", b"# Heading\n\nBody").unwrap();
        assert_eq!(text, "# Heading\n\nBody");
    }

    #[test]
    fn test_markdown_by_suffix_with_generic_content_type() {
        let text = extract_text("notes.md", "application/octet-stream", b"*emphasis*").unwrap();
        assert_eq!(text, "*emphasis*");
    }

    #[test]
    fn test_invalid_utf8_in_text_file_is_decode_error() {
        let err = extract_text("speech.txt", "text/plain", &[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, ExtractError::Decode(_)));
    }

    #[test]
    fn test_unknown_kind_with_valid_utf8_is_accepted() {
        let text = extract_text("data.bin", "application/octet-stream", b"readable text").unwrap();
        assert_eq!(text, "readable text");
    }

    #[test]
    fn test_unknown_kind_with_binary_content_is_unsupported() {
        let err =
            extract_text("img.png", "image/png", &[0x89, 0x50, 0x4e, 0x47, 0xff]).unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedType { .. }));
    }

    #[test]
    fn test_whitespace_only_text_is_empty() {
        let err = extract_text("blank.txt", "text/plain", b"  \n\t  ").unwrap_err();
        assert!(matches!(err, ExtractError::Empty));
    }

    #[test]
    fn test_docx_paragraphs_joined_with_newlines() {
        let docx = docx_with_body(
            "<w:p><w:r><w:t>First paragraph.</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Second </w:t></w:r><w:r><w:t>paragraph.</w:t></w:r></w:p>",
        );
        let text = extract_text(
            "doc.docx",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            &docx,
        )
        .unwrap();
        assert_eq!(text, "First paragraph.\nSecond paragraph.");
    }

    #[test]
    fn test_docx_empty_paragraph_preserved_as_blank_line() {
        let docx = docx_with_body(
            "<w:p><w:r><w:t>Above.</w:t></w:r></w:p>\
             <w:p/>\
             <w:p><w:r><w:t>Below.</w:t></w:r></w:p>",
        );
        let text = extract_text("doc.docx", CONTENT_TYPE_DOCX, &docx).unwrap();
        assert_eq!(text, "Above.\n\nBelow.");
    }

    #[test]
    fn test_docx_break_and_tab_inside_run() {
        let docx = docx_with_body(
            "<w:p><w:r><w:t>One</w:t><w:br/><w:t>Two</w:t><w:tab/><w:t>Three</w:t></w:r></w:p>",
        );
        let text = extract_text("doc.docx", CONTENT_TYPE_DOCX, &docx).unwrap();
        assert_eq!(text, "One\nTwo\tThree");
    }

    #[test]
    fn test_docx_detected_by_suffix_alone() {
        let docx = docx_with_body("<w:p><w:r><w:t>Suffix detection.</w:t></w:r></w:p>");
        let text = extract_text("doc.DOCX", "application/octet-stream", &docx).unwrap();
        assert_eq!(text, "Suffix detection.");
    }

    #[test]
    fn test_docx_invalid_container_is_parse_error() {
        let err = extract_text("doc.docx", CONTENT_TYPE_DOCX, b"not a zip file").unwrap_err();
        assert!(matches!(err, ExtractError::DocumentParse(_)));
    }

    #[test]
    fn test_docx_without_document_part_is_parse_error() {
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();
        writer.start_file("word/other.xml", options).unwrap();
        writer.write_all(b"<w:document/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = extract_text("doc.docx", CONTENT_TYPE_DOCX, &bytes).unwrap_err();
        assert!(matches!(err, ExtractError::DocumentParse(_)));
    }

    #[test]
    fn test_docx_with_no_text_is_empty() {
        let docx = docx_with_body("<w:p/><w:p/>");
        let err = extract_text("doc.docx", CONTENT_TYPE_DOCX, &docx).unwrap_err();
        assert!(matches!(err, ExtractError::Empty));
    }
}
