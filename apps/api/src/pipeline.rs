//! The extraction pipeline — the single entry point the HTTP layer calls.
//!
//! Flow: validate upload → select reader → read to text → fan out field
//! strategies → assembled `ResumeData`.
//!
//! Validation and reader failures are fatal to the request and surface as a
//! single typed error. Per-field failures never escape the coordinator —
//! the caller always receives either an error for the whole request or a
//! complete `ResumeData` in which unresolved fields are simply empty.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::extraction::coordinator::extract_fields;
use crate::models::resume::ResumeData;
use crate::parsing::read_document;
use crate::state::AppState;
use crate::validation::{sanitize_filename, validate_upload};

/// Processes one uploaded resume document into structured data.
pub async fn process_resume(
    bytes: Bytes,
    filename: &str,
    state: &AppState,
) -> Result<ResumeData, AppError> {
    let label = sanitize_filename(filename);
    info!("Starting resume processing: {label} ({} bytes)", bytes.len());

    let detected = validate_upload(
        &bytes,
        filename,
        state.config.max_file_size,
        &state.config.allowed_content_types,
    )?;
    debug!("Validated {label} as {detected}");

    let reader = state.readers.select(detected)?;

    let text = read_document(reader, bytes, state.config.parsing_timeout()).await?;
    // The document bytes are released here; strategies only ever see text.
    let text: Arc<str> = Arc::from(text);

    let report = extract_fields(
        &state.strategies,
        text,
        state.config.strategy_timeout(),
        state.config.coordinator_budget(),
    )
    .await;

    for failure in &report.failures {
        warn!(
            "Field '{}' failed for {label}: {}",
            failure.field, failure.reason
        );
    }

    info!(
        "Resume processing completed: {label}, name={:?}, email={:?}, {} skills",
        report.data.name,
        report.data.email,
        report.data.skills.len()
    );

    Ok(report.data)
}
