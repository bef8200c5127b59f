//! Stage 1: extracts the resume text and scores it against the job description.

use async_trait::async_trait;
use tracing::info;

use crate::extraction::{extract_from_doc, ExtractionError};
use crate::llm_client::prompts::{json_only_system, SCHEMA_INSTRUCTION};
use crate::llm_client::LlmClient;
use crate::pipeline::prompts::{render, ATS_PROMPT_TEMPLATE, ATS_ROLE};
use crate::pipeline::{ApplicationState, AtsAnalysis, Stage, StageError};

const INTERNAL_MESSAGE: &str = "Internal server error in ATS analysis.";

pub struct AtsAnalysisStage {
    llm: LlmClient,
}

impl AtsAnalysisStage {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Stage for AtsAnalysisStage {
    fn name(&self) -> &'static str {
        "ats_analysis"
    }

    fn internal_message(&self) -> &'static str {
        INTERNAL_MESSAGE
    }

    async fn run(&self, state: &mut ApplicationState) -> Result<(), StageError> {
        let job_description = state.job_description().trim();
        if job_description.is_empty() || state.resume_file().as_os_str().is_empty() {
            return Err(StageError::Validation(
                "Missing resume file or job description.".to_string(),
            ));
        }

        let path = state.resume_file().to_path_buf();
        let resume_content = tokio::task::spawn_blocking(move || extract_from_doc(&path))
            .await
            .map_err(StageError::internal)?
            .map_err(|e| match e {
                ExtractionError::UnsupportedFormat => StageError::Validation(e.to_string()),
                other => StageError::internal(other),
            })?;
        info!(
            "Extracted {} characters from {}",
            resume_content.len(),
            state.resume_file().display()
        );

        let prompt = render(
            ATS_PROMPT_TEMPLATE,
            SCHEMA_INSTRUCTION,
            &resume_content,
            job_description,
        );
        let analysis: AtsAnalysis = self
            .llm
            .call_json(&prompt, &json_only_system(ATS_ROLE))
            .await
            .map_err(StageError::internal)?;

        info!(
            "ATS analysis: company={:?} score={}",
            analysis.company_name, analysis.job_description_match_score
        );

        state.set_resume_content(resume_content)?;
        state.set_ats_analysis(analysis)?;
        Ok(())
    }
}
