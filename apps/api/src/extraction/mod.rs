//! Resume text extraction. Dispatches on file extension; PDF and DOCX only.

pub mod docx;
pub mod pdf;

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file format. Only PDF and DOCX are supported.")]
    UnsupportedFormat,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("DOCX parsing failed: {0}")]
    DocxParsing(String),
}

/// Document formats a resume may be uploaded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Case-insensitive match on the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }
}

/// Extracts plain text from a PDF or DOCX resume on disk.
///
/// PDF pages and DOCX paragraphs are joined with `\n`.
pub fn extract_from_doc(path: &Path) -> Result<String, ExtractionError> {
    match DocumentKind::from_path(path) {
        Some(DocumentKind::Pdf) => pdf::extract_text(path),
        Some(DocumentKind::Docx) => docx::extract_text(path),
        None => Err(ExtractionError::UnsupportedFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_kind_from_extension_is_case_insensitive() {
        assert_eq!(
            DocumentKind::from_path(&PathBuf::from("cv.PDF")),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::from_path(&PathBuf::from("/tmp/resume.Docx")),
            Some(DocumentKind::Docx)
        );
    }

    #[test]
    fn test_kind_rejects_other_formats() {
        assert_eq!(DocumentKind::from_path(&PathBuf::from("resume.doc")), None);
        assert_eq!(DocumentKind::from_path(&PathBuf::from("resume")), None);
    }

    #[test]
    fn test_unsupported_format_error_message() {
        let err = extract_from_doc(&PathBuf::from("resume.txt")).unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat));
        assert_eq!(
            err.to_string(),
            "Unsupported file format. Only PDF and DOCX are supported."
        );
    }

    #[test]
    fn test_missing_pdf_is_io_error() {
        let err = extract_from_doc(&PathBuf::from("/nonexistent/resume.pdf")).unwrap_err();
        assert!(matches!(err, ExtractionError::Io(_)));
    }
}
