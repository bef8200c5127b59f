use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::outreach::{build_mailto, OutreachError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OutreachRequest {
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct MailtoResponse {
    pub mailto_link: String,
}

#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub sent: usize,
    pub message: String,
}

/// POST /api/v1/outreach/mailto
pub async fn handle_mailto(
    Json(request): Json<OutreachRequest>,
) -> Result<Json<MailtoResponse>, AppError> {
    if request.recipients.is_empty() {
        return Err(OutreachError::NoRecipients.into());
    }
    Ok(Json(MailtoResponse {
        mailto_link: build_mailto(&request.recipients, &request.subject, &request.body),
    }))
}

/// POST /api/v1/outreach/send
///
/// Sends the email to every recipient through the configured SMTP relay.
pub async fn handle_send(
    State(state): State<AppState>,
    Json(request): Json<OutreachRequest>,
) -> Result<Json<SendResponse>, AppError> {
    let sent = state
        .mailer
        .send_all(&request.recipients, &request.subject, &request.body)
        .await?;
    Ok(Json(SendResponse {
        sent,
        message: "Emails sent successfully!".to_string(),
    }))
}
