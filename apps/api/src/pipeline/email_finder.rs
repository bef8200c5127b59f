//! Stage 3: looks up the hiring company's domain and contact emails.

use async_trait::async_trait;
use tracing::info;

use crate::contacts::{ContactError, HunterClient};
use crate::pipeline::{ApplicationState, Stage, StageError};

/// Values the ATS stage uses for "the job description names no company".
const MISSING_COMPANY_MARKERS: &[&str] = &["<not found>", "<null>", "null"];

pub struct EmailFinderStage {
    contacts: HunterClient,
}

impl EmailFinderStage {
    pub fn new(contacts: HunterClient) -> Self {
        Self { contacts }
    }
}

fn company_is_known(name: &str) -> bool {
    !name.is_empty()
        && !MISSING_COMPANY_MARKERS
            .iter()
            .any(|m| name.eq_ignore_ascii_case(m))
}

#[async_trait]
impl Stage for EmailFinderStage {
    fn name(&self) -> &'static str {
        "email_finder"
    }

    fn internal_message(&self) -> &'static str {
        "Internal server error in email lookup."
    }

    async fn run(&self, state: &mut ApplicationState) -> Result<(), StageError> {
        let company_name = state
            .ats_analysis()
            .map(|a| a.company_name.trim().to_string())
            .unwrap_or_default();

        if !company_is_known(&company_name) {
            return Err(StageError::Validation(
                "Organization details not found.".to_string(),
            ));
        }

        let lookup = self
            .contacts
            .find_company_contacts(&company_name)
            .await
            .map_err(|e| match e {
                ContactError::MissingApiKey => StageError::Validation(e.to_string()),
                other => StageError::internal(other),
            })?;

        info!(
            "Contact lookup for '{}': {} emails",
            company_name,
            lookup.emails().len()
        );

        state.set_contacts(lookup)?;
        Ok(())
    }
}
