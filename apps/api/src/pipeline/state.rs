//! Shared state threaded through the pipeline, plus the structured records
//! each stage produces.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::contacts::ContactLookup;
use crate::pipeline::StageError;

/// Structured output of the ATS analysis stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsAnalysis {
    /// `<null>` when the job description does not name the company.
    pub company_name: String,
    #[serde(rename = "job_ID")]
    pub job_id: String,
    /// Always within 0..=100, whatever the model returned.
    #[serde(deserialize_with = "deserialize_score")]
    pub job_description_match_score: u8,
    pub missing_keywords: Vec<String>,
    pub matching_keywords: Vec<String>,
    /// Markdown.
    pub resume_edit_suggestions: String,
}

/// Structured output of the cold mail stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColdEmail {
    pub subject: String,
    pub main_body: String,
}

/// A stage that did not complete, with the message shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageFailure {
    pub stage: &'static str,
    pub message: String,
}

/// State for a single pipeline invocation. Stage outputs are write-once:
/// a second write to the same field is rejected.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationState {
    run_id: Uuid,
    job_description: String,
    resume_file: PathBuf,
    resume_content: Option<String>,
    ats_analysis_agent: Option<AtsAnalysis>,
    email_finder_agent: Option<ContactLookup>,
    cold_mail_writer_agent: Option<ColdEmail>,
    failures: Vec<StageFailure>,
}

impl ApplicationState {
    pub fn new(job_description: impl Into<String>, resume_file: impl Into<PathBuf>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            job_description: job_description.into(),
            resume_file: resume_file.into(),
            resume_content: None,
            ats_analysis_agent: None,
            email_finder_agent: None,
            cold_mail_writer_agent: None,
            failures: Vec::new(),
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn resume_file(&self) -> &Path {
        &self.resume_file
    }

    pub fn resume_content(&self) -> Option<&str> {
        self.resume_content.as_deref()
    }

    pub fn ats_analysis(&self) -> Option<&AtsAnalysis> {
        self.ats_analysis_agent.as_ref()
    }

    pub fn contacts(&self) -> Option<&ContactLookup> {
        self.email_finder_agent.as_ref()
    }

    pub fn cold_email(&self) -> Option<&ColdEmail> {
        self.cold_mail_writer_agent.as_ref()
    }

    pub fn failures(&self) -> &[StageFailure] {
        &self.failures
    }

    pub fn set_resume_content(&mut self, text: String) -> Result<(), StageError> {
        write_once(&mut self.resume_content, text, "resume_content")
    }

    pub fn set_ats_analysis(&mut self, analysis: AtsAnalysis) -> Result<(), StageError> {
        write_once(&mut self.ats_analysis_agent, analysis, "ats_analysis_agent")
    }

    pub fn set_contacts(&mut self, lookup: ContactLookup) -> Result<(), StageError> {
        write_once(&mut self.email_finder_agent, lookup, "email_finder_agent")
    }

    pub fn set_cold_email(&mut self, email: ColdEmail) -> Result<(), StageError> {
        write_once(&mut self.cold_mail_writer_agent, email, "cold_mail_writer_agent")
    }

    pub(crate) fn record_failure(&mut self, stage: &'static str, message: String) {
        self.failures.push(StageFailure { stage, message });
    }
}

fn write_once<T>(slot: &mut Option<T>, value: T, field: &'static str) -> Result<(), StageError> {
    if slot.is_some() {
        return Err(StageError::AlreadyWritten(field));
    }
    *slot = Some(value);
    Ok(())
}

/// Accepts integers, floats and numeric strings; rounds and clamps to 0..=100.
fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let score = match &raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|s| s.is_finite())
    .ok_or_else(|| {
        <D::Error as serde::de::Error>::custom(format!("invalid match score: {raw}"))
    })?;

    Ok(score.round().clamp(0.0, 100.0) as u8)
}
