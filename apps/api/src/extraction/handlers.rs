use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::ResumeData;
use crate::pipeline::process_resume;
use crate::state::AppState;
use crate::validation::sanitize_filename;

/// Response envelope for a parsed resume.
#[derive(Debug, Serialize)]
pub struct ParseResumeResponse {
    pub success: bool,
    pub data: ResumeData,
    pub filename: String,
}

/// POST /parse-resume
///
/// Accepts a multipart upload with a single `file` field (PDF or DOCX) and
/// returns the extracted resume data. All real work happens in the
/// pipeline; this handler only unpacks the multipart body.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParseResumeResponse>, AppError> {
    let mut upload: Option<(bytes::Bytes, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("resume").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
            upload = Some((data, filename));
        }
    }

    let Some((data, filename)) = upload else {
        return Err(AppError::BadRequest(
            "Multipart field 'file' is required".to_string(),
        ));
    };

    info!("Received resume upload: {} ({} bytes)", sanitize_filename(&filename), data.len());

    let resume = process_resume(data, &filename, &state).await?;

    Ok(Json(ParseResumeResponse {
        success: true,
        data: resume,
        filename: sanitize_filename(&filename),
    }))
}
