//! Text Extractor — renders raw document bytes to plain text, dispatched on
//! the declared media type. Stateless; quality of the output is a downstream
//! concern (a garbled legacy .doc is not an extraction error).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to extract text: {0}")]
    Failed(String),
}

/// The document formats the pipeline accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Pdf,
    Docx,
    Doc,
}

impl MediaType {
    /// Maps a declared MIME type onto a supported format. `None` means the
    /// upload must be rejected before any file is written.
    pub fn from_mime(mime: &str) -> Option<MediaType> {
        match mime {
            "application/pdf" => Some(MediaType::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(MediaType::Docx)
            }
            "application/msword" => Some(MediaType::Doc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Pdf => "pdf",
            MediaType::Docx => "docx",
            MediaType::Doc => "doc",
        }
    }
}

/// Extracts a plain-text rendering from document bytes.
///
/// Fails only on a genuinely unreadable file; an empty or ugly rendering is
/// returned as-is for the heuristics to chew on.
pub fn extract_text(bytes: &[u8], media_type: MediaType) -> Result<String, ExtractionError> {
    match media_type {
        MediaType::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractionError::Failed(format!("PDF decode error: {e}"))),
        MediaType::Docx => extract_docx(bytes),
        // No safe decoder for the legacy binary format; coerce bytes to text
        // and let the line heuristics salvage what they can.
        MediaType::Doc => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}

/// Walks the DOCX document tree and joins paragraph runs with newlines.
/// Tables and headers are skipped; resumes carry their signal in paragraphs.
fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| ExtractionError::Failed(format!("DOCX parse error: {e}")))?;

    let mut text = String::new();
    for child in &docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            let para_text = paragraph_text(paragraph);
            if !para_text.trim().is_empty() {
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(&para_text);
            }
        }
    }
    Ok(text)
}

fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    let mut content = String::new();
    for para_child in &paragraph.children {
        if let docx_rs::ParagraphChild::Run(run) = para_child {
            for run_child in &run.children {
                if let docx_rs::RunChild::Text(text) = run_child {
                    content.push_str(&text.text);
                }
            }
        }
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_allow_list() {
        assert_eq!(MediaType::from_mime("application/pdf"), Some(MediaType::Pdf));
        assert_eq!(
            MediaType::from_mime(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            ),
            Some(MediaType::Docx)
        );
        assert_eq!(
            MediaType::from_mime("application/msword"),
            Some(MediaType::Doc)
        );
        assert_eq!(MediaType::from_mime("image/png"), None);
        assert_eq!(MediaType::from_mime("text/plain"), None);
    }

    #[test]
    fn test_legacy_doc_coercion_never_fails() {
        // Arbitrary non-UTF8 bytes must still yield text, however garbled.
        let bytes = vec![0xd0, 0xcf, 0x11, 0xe0, b'J', b'o', b'b', 0xff];
        let text = extract_text(&bytes, MediaType::Doc).unwrap();
        assert!(text.contains("Job"));
    }

    #[test]
    fn test_corrupt_pdf_is_extraction_failure() {
        let err = extract_text(b"not a pdf at all", MediaType::Pdf).unwrap_err();
        assert!(matches!(err, ExtractionError::Failed(_)));
    }

    #[test]
    fn test_corrupt_docx_is_extraction_failure() {
        let err = extract_text(b"not a zip archive", MediaType::Docx).unwrap_err();
        assert!(matches!(err, ExtractionError::Failed(_)));
    }
}
