//! PDF reader backed by `pdf-extract`.

use tracing::warn;

use super::{DocumentReader, ParseError};

/// Extracts text from PDF bytes. Pages come back concatenated in document
/// order; `pdf-extract` inserts whitespace between runs so adjacent words
/// stay separate tokens.
pub struct PdfReader;

impl DocumentReader for PdfReader {
    fn read(&self, bytes: &[u8]) -> Result<String, ParseError> {
        let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            warn!("PDF extraction failed: {e}");
            ParseError::Malformed(e.to_string())
        })?;

        if text.trim().is_empty() {
            return Err(ParseError::Empty);
        }

        Ok(text)
    }
}
