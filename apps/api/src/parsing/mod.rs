//! Document Readers — turn raw file bytes of a known format into plain text.
//!
//! One reader per supported content type, registered once at startup in a
//! `ReaderRegistry`. Reading runs on the blocking pool under a wall-clock
//! timeout; a timeout discards any partially extracted text. Extraction is
//! text-only — no macro, script, or embedded content in a document is ever
//! evaluated.

pub mod docx;
pub mod pdf;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::errors::AppError;

/// Content types admitted by the validation gate, keyed by signature
/// detection — never by filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectedType {
    Pdf,
    Docx,
}

impl DetectedType {
    pub fn mime_type(&self) -> &'static str {
        match self {
            DetectedType::Pdf => "application/pdf",
            DetectedType::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    /// Maps a sniffed MIME type onto the allow-list.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/pdf" => Some(DetectedType::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(DetectedType::Docx)
            }
            _ => None,
        }
    }
}

impl fmt::Display for DetectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_type())
    }
}

/// Errors produced while turning document bytes into text.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed document: {0}")]
    Malformed(String),

    #[error("No text content found in document")]
    Empty,
}

/// A reader for one document format. Implementations are synchronous and
/// CPU-bound; `read_document` handles the blocking pool and the timeout.
pub trait DocumentReader: Send + Sync {
    /// Extracts plain text, concatenating pages/sections in document order
    /// with separators that keep word boundaries intact.
    fn read(&self, bytes: &[u8]) -> Result<String, ParseError>;
}

impl fmt::Debug for dyn DocumentReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DocumentReader")
    }
}

/// Reader Selector — a pure lookup populated at startup, one reader per
/// supported type. A miss means the validation allow-list and this registry
/// have drifted apart; that is a configuration fault, not a caller error.
pub struct ReaderRegistry {
    readers: HashMap<DetectedType, Arc<dyn DocumentReader>>,
}

impl ReaderRegistry {
    /// Registry with the standard readers: PDF and DOCX.
    pub fn standard() -> Self {
        let mut readers: HashMap<DetectedType, Arc<dyn DocumentReader>> = HashMap::new();
        readers.insert(DetectedType::Pdf, Arc::new(pdf::PdfReader));
        readers.insert(DetectedType::Docx, Arc::new(docx::DocxReader));
        Self { readers }
    }

    pub fn select(&self, content_type: DetectedType) -> Result<Arc<dyn DocumentReader>, AppError> {
        self.readers
            .get(&content_type)
            .cloned()
            .ok_or_else(|| AppError::UnsupportedFormat(content_type.to_string()))
    }
}

/// Reads a document to text under a wall-clock timeout.
///
/// The reader runs via `spawn_blocking`; on timeout the join handle is
/// dropped and whatever partial text the reader produced never escapes.
pub async fn read_document(
    reader: Arc<dyn DocumentReader>,
    bytes: bytes::Bytes,
    budget: Duration,
) -> Result<String, AppError> {
    let parse = tokio::task::spawn_blocking(move || reader.read(&bytes));

    let joined = timeout(budget, parse)
        .await
        .map_err(|_| AppError::ParsingTimeout(budget.as_secs()))?;

    let result = joined.map_err(|e| AppError::Internal(anyhow::anyhow!("reader task failed: {e}")))?;

    match result {
        Ok(text) => {
            info!("Document parsed, text length {}", text.len());
            let head: String = text.chars().take(120).collect();
            debug!("Extracted text head: {head:?}");
            Ok(text)
        }
        Err(e) => Err(AppError::ParsingFailed(e.to_string())),
    }
}
