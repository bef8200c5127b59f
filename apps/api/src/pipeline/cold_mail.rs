//! Stage 2: drafts a cold email from the extracted resume and the job description.

use async_trait::async_trait;
use tracing::info;

use crate::llm_client::prompts::{json_only_system, SCHEMA_INSTRUCTION};
use crate::llm_client::LlmClient;
use crate::pipeline::prompts::{render, COLD_MAIL_PROMPT_TEMPLATE, COLD_MAIL_ROLE};
use crate::pipeline::{ApplicationState, ColdEmail, Stage, StageError};

pub struct ColdMailWriterStage {
    llm: LlmClient,
}

impl ColdMailWriterStage {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Stage for ColdMailWriterStage {
    fn name(&self) -> &'static str {
        "cold_mail_writer"
    }

    fn internal_message(&self) -> &'static str {
        "Internal server error in cold mail generation."
    }

    async fn run(&self, state: &mut ApplicationState) -> Result<(), StageError> {
        let job_description = state.job_description().trim();
        let resume_content = state.resume_content().unwrap_or_default().trim();
        if job_description.is_empty() || resume_content.is_empty() {
            return Err(StageError::Validation(
                "Job description or resume content is missing.".to_string(),
            ));
        }

        let prompt = render(
            COLD_MAIL_PROMPT_TEMPLATE,
            SCHEMA_INSTRUCTION,
            resume_content,
            job_description,
        );
        let email: ColdEmail = self
            .llm
            .call_json(&prompt, &json_only_system(COLD_MAIL_ROLE))
            .await
            .map_err(StageError::internal)?;

        info!(
            "Cold email drafted: subject={:?}, {} words",
            email.subject,
            email.main_body.split_whitespace().count()
        );

        state.set_cold_email(email)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{anthropic_reply, spawn_stub};
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::json;

    fn ready_state() -> ApplicationState {
        let mut state = ApplicationState::new("Backend Engineer (Rust)", "/tmp/cv.pdf");
        state
            .set_resume_content("Built Rust services handling 20k rps".to_string())
            .unwrap();
        state
    }

    async fn stage_against(router: Router) -> ColdMailWriterStage {
        let base = spawn_stub(router).await;
        let llm = LlmClient::new("test-key".into(), format!("{base}/v1/messages")).unwrap();
        ColdMailWriterStage::new(llm)
    }

    #[tokio::test]
    async fn test_llm_failure_hides_upstream_detail() {
        let stage = stage_against(Router::new().route(
            "/v1/messages",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": {"type": "invalid_request_error", "message": "secret upstream detail"}})),
                )
            }),
        ))
        .await;
        let mut state = ready_state();

        let err = stage.run(&mut state).await.unwrap_err();
        assert!(matches!(err, StageError::Internal(_)));
        assert_eq!(
            err.public_message(stage.internal_message()),
            "Internal server error in cold mail generation."
        );
        assert_eq!(
            err.to_string().matches("secret upstream detail").count(),
            1,
            "{err}"
        );
        assert!(state.cold_email().is_none());
    }

    #[tokio::test]
    async fn test_second_write_reports_stage_message() {
        let stage = stage_against(Router::new().route(
            "/v1/messages",
            post(|| async {
                Json(anthropic_reply(
                    &json!({"subject": "Second", "main_body": "Body"}).to_string(),
                ))
            }),
        ))
        .await;
        let mut state = ready_state();
        state
            .set_cold_email(ColdEmail {
                subject: "First".to_string(),
                main_body: "Body".to_string(),
            })
            .unwrap();

        let err = stage.run(&mut state).await.unwrap_err();
        assert!(matches!(err, StageError::AlreadyWritten("cold_mail_writer_agent")));
        assert_eq!(
            err.public_message(stage.internal_message()),
            "Internal server error in cold mail generation."
        );
        assert_eq!(state.cold_email().unwrap().subject, "First");
    }

    #[tokio::test]
    async fn test_missing_resume_content_is_validation() {
        let stage = ColdMailWriterStage::new(
            LlmClient::new("test-key".into(), "http://127.0.0.1:9/v1/messages".into()).unwrap(),
        );
        let mut state = ApplicationState::new("Backend Engineer", "/tmp/cv.pdf");

        let err = stage.run(&mut state).await.unwrap_err();
        assert_eq!(
            err.public_message(stage.internal_message()),
            "Job description or resume content is missing."
        );
    }
}
