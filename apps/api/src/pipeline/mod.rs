// Application pipeline: ATS analysis → cold mail drafting → contact lookup.
// Stages share one ApplicationState and run strictly in sequence.
// All LLM calls go through llm_client; nothing here calls Anthropic directly.

pub mod ats;
pub mod cold_mail;
pub mod email_finder;
pub mod prompts;
pub mod report;
pub mod state;
pub mod workflow;

use async_trait::async_trait;
use thiserror::Error;

pub use state::{ApplicationState, AtsAnalysis, ColdEmail, StageFailure};
pub use workflow::Workflow;

/// Why a stage did not complete.
#[derive(Debug, Error)]
pub enum StageError {
    /// The stage's inputs were missing or unusable. Shown to the user verbatim.
    #[error("{0}")]
    Validation(String),

    /// Something broke underneath the stage. The cause only goes to the log;
    /// the user sees the stage's own internal error message.
    #[error("{0}")]
    Internal(String),

    #[error("state field '{0}' was already written")]
    AlreadyWritten(&'static str),
}

impl StageError {
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        Self::Internal(cause.to_string())
    }

    /// The message recorded on the state for the user to see.
    pub fn public_message(&self, internal_message: &str) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Internal(_) | Self::AlreadyWritten(_) => internal_message.to_string(),
        }
    }
}

/// One step of the pipeline. A stage reads the fields it needs from the
/// state, validates them itself, and writes only the fields it owns.
#[async_trait]
pub trait Stage: Send + Sync {
    fn name(&self) -> &'static str;

    /// Shown to the user when the stage fails for any reason other than
    /// a validation error.
    fn internal_message(&self) -> &'static str;

    async fn run(&self, state: &mut ApplicationState) -> Result<(), StageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_cause_stays_out_of_public_message() {
        let err = StageError::internal("API error (status 400): upstream detail");
        assert_eq!(err.to_string(), "API error (status 400): upstream detail");
        assert_eq!(err.public_message("Stage failed."), "Stage failed.");
    }

    #[test]
    fn test_already_written_uses_stage_message() {
        let err = StageError::AlreadyWritten("resume_content");
        assert_eq!(err.public_message("Stage failed."), "Stage failed.");
    }

    #[test]
    fn test_validation_message_is_shown_verbatim() {
        let err = StageError::Validation("Organization details not found.".to_string());
        assert_eq!(
            err.public_message("Stage failed."),
            "Organization details not found."
        );
    }
}
