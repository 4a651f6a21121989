use std::path::Path;

use thiserror::Error;
use tracing::debug;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// The document formats a resume may be uploaded in.
/// Anything else is rejected at the upload boundary before extraction runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            PDF_MIME => Some(Self::Pdf),
            DOCX_MIME => Some(Self::Docx),
            _ => None,
        }
    }

    /// Fallback for clients that omit a content type on the file part.
    pub fn from_filename(name: &str) -> Option<Self> {
        let extension = Path::new(name).extension().and_then(|ext| ext.to_str())?;
        match extension.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unreadable document: {0}")]
    Unreadable(String),
}

/// Extracts plain text from an uploaded document.
/// The blob is read once; nothing is written anywhere.
pub fn extract_text(data: &[u8], format: DocumentFormat) -> Result<String, ExtractError> {
    match format {
        DocumentFormat::Pdf => extract_text_from_pdf(data),
        DocumentFormat::Docx => extract_text_from_docx(data),
    }
}

/// Pages are visited in document order and their text concatenated with no
/// separator. A page with no extractable text contributes an empty fragment,
/// never an error; only a blob that cannot be opened at all fails.
fn extract_text_from_pdf(data: &[u8]) -> Result<String, ExtractError> {
    let doc = lopdf::Document::load_mem(data)
        .map_err(|e| ExtractError::Unreadable(format!("PDF: {e}")))?;

    let mut text = String::new();
    for page_number in doc.get_pages().keys() {
        match doc.extract_text(&[*page_number]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => {
                debug!("no text extracted from page {page_number}: {e}");
            }
        }
    }
    Ok(text)
}

fn extract_text_from_docx(data: &[u8]) -> Result<String, ExtractError> {
    let docx =
        docx_rs::read_docx(data).map_err(|e| ExtractError::Unreadable(format!("DOCX: {e}")))?;

    let mut text = String::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            for child in paragraph.children {
                if let docx_rs::ParagraphChild::Run(run) = child {
                    for child in run.children {
                        if let docx_rs::RunChild::Text(t) = child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }
    Ok(text)
}
