//! Axum route handlers for resume analysis.

use std::path::Path;

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::DocumentKind;
use crate::pipeline::report::ApplicationReport;
use crate::pipeline::ApplicationState;
use crate::routes::pages::{render_form, render_results};
use crate::state::AppState;

const MISSING_INPUT: &str =
    "Please upload your resume and enter a job description to continue.";

/// A parsed form submission.
#[derive(Debug)]
pub struct ApplicationUpload {
    pub job_description: String,
    pub file_name: String,
    pub resume: Bytes,
}

/// Reads the `resume` and `job_description` multipart fields.
/// Unknown fields are ignored.
pub async fn read_upload(
    mut multipart: Multipart,
    max_upload_bytes: usize,
) -> Result<ApplicationUpload, AppError> {
    let mut job_description = String::new();
    let mut resume: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "Malformed form data", max_upload_bytes))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "job_description" => {
                job_description = field
                    .text()
                    .await
                    .map_err(|e| {
                        multipart_error(e, "Unreadable job description", max_upload_bytes)
                    })?;
            }
            "resume" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| {
                        multipart_error(e, "Failed to read file data", max_upload_bytes)
                    })?;
                if !bytes.is_empty() {
                    resume = Some((file_name, bytes));
                }
            }
            _ => {}
        }
    }

    let (file_name, resume) = match resume {
        Some(upload) if !job_description.trim().is_empty() => upload,
        _ => return Err(AppError::Validation(MISSING_INPUT.to_string())),
    };

    if resume.len() > max_upload_bytes {
        return Err(too_large(max_upload_bytes));
    }

    Ok(ApplicationUpload {
        job_description,
        file_name,
        resume,
    })
}

fn too_large(max_upload_bytes: usize) -> AppError {
    AppError::PayloadTooLarge(format!(
        "File too large. Maximum {} MB.",
        max_upload_bytes / (1024 * 1024)
    ))
}

/// A body that overran the router's limit surfaces here as a stream error.
fn multipart_error(e: MultipartError, context: &str, max_upload_bytes: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        too_large(max_upload_bytes)
    } else {
        AppError::Validation(format!("{context}: {e}"))
    }
}

/// Stages the upload in a temp file, runs the pipeline, and builds the report.
/// The temp file is removed when this returns.
pub async fn analyze_upload(
    state: &AppState,
    upload: ApplicationUpload,
) -> Result<ApplicationReport, AppError> {
    let kind = DocumentKind::from_path(Path::new(&upload.file_name)).ok_or_else(|| {
        AppError::UnsupportedMediaType(
            "Unsupported file format. Only PDF and DOCX are supported.".to_string(),
        )
    })?;

    let staged = tempfile::Builder::new()
        .prefix("resume-")
        .suffix(&format!(".{}", kind.extension()))
        .tempfile()
        .map_err(|e| AppError::Internal(e.into()))?;
    tokio::fs::write(staged.path(), &upload.resume)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    info!(
        "Analyzing '{}' ({} bytes) against a {}-character job description",
        upload.file_name,
        upload.resume.len(),
        upload.job_description.len()
    );

    let application = ApplicationState::new(upload.job_description, staged.path());
    let finished = state.workflow.invoke(application).await;
    Ok(ApplicationReport::from_state(&finished))
}

/// POST /api/v1/applications/analyze
///
/// Multipart: `resume` (PDF or DOCX) + `job_description`. Returns the report as JSON.
/// Stage failures are reported inside the body; the request itself still succeeds.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ApplicationReport>, AppError> {
    let upload = read_upload(multipart, state.config.max_upload_bytes).await?;
    let report = analyze_upload(&state, upload).await?;
    Ok(Json(report))
}

/// POST /analyze
///
/// Target of the HTML form. Renders the results page, or the form again
/// with a warning when the submission is unusable.
pub async fn handle_analyze_form(State(state): State<AppState>, multipart: Multipart) -> Response {
    let result = match read_upload(multipart, state.config.max_upload_bytes).await {
        Ok(upload) => analyze_upload(&state, upload).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(report) => Html(render_results(&report)).into_response(),
        Err(e) => {
            let (status, _, message) = e.parts();
            (status, Html(render_form(Some(&message)))).into_response()
        }
    }
}
