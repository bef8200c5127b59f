//! DOCX text extraction: reads `word/document.xml` out of the zip container
//! and rebuilds paragraph text from its `<w:t>` runs.

use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Text runs, tab characters, line breaks and paragraph ends, in document order.
/// `<w:tab .../>` elements with attributes are tab-stop definitions and are skipped.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:tab\s*/>|<w:br(?:\s[^>]*)?/>|</w:p>|<w:p(?:\s[^>]*)?/>")
        .unwrap()
});

static NUMERIC_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").unwrap());

pub fn extract_text(path: &Path) -> Result<String, ExtractionError> {
    let file = std::fs::File::open(path)?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| ExtractionError::DocxParsing(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::DocxParsing(format!("{DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)?;

    Ok(paragraphs(&xml).join("\n"))
}

/// Splits `document.xml` into paragraph strings. Empty paragraphs are kept.
fn paragraphs(xml: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();

    for token in TOKEN.captures_iter(xml) {
        if let Some(run) = token.get(1) {
            current.push_str(&unescape(run.as_str()));
            continue;
        }
        let tag = &token[0];
        if tag.starts_with("<w:tab") {
            current.push('\t');
        } else if tag.starts_with("<w:br") {
            current.push('\n');
        } else {
            out.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn unescape(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let named = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'");
    let numeric = NUMERIC_ENTITY.replace_all(&named, |caps: &Captures| {
        let code = &caps[1];
        let value = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse::<u32>().ok(),
        };
        value
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });
    numeric.replace("&amp;", "&")
}
