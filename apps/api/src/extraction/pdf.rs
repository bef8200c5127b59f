//! PDF text extraction through the page text layer.

use std::path::Path;

use super::ExtractionError;

/// Reads every page's text layer and joins the pages with `\n`.
/// Scanned PDFs without a text layer yield empty text, not an error.
pub fn extract_text(path: &Path) -> Result<String, ExtractionError> {
    let bytes = std::fs::read(path)?;
    let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes)
        .map_err(|e| ExtractionError::PdfParsing(e.to_string()))?;
    Ok(pages.join("\n"))
}
