//! Runs the stages in order over one `ApplicationState`.
//!
//! Every stage runs inside its own error boundary: a failure is logged and
//! recorded on the state, and the next stage still runs. Later stages check
//! their own inputs, so a missing upstream result surfaces as their own
//! validation failure. Nothing is retried.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::contacts::HunterClient;
use crate::llm_client::LlmClient;
use crate::pipeline::ats::AtsAnalysisStage;
use crate::pipeline::cold_mail::ColdMailWriterStage;
use crate::pipeline::email_finder::EmailFinderStage;
use crate::pipeline::{ApplicationState, Stage, StageError};

#[derive(Clone)]
pub struct Workflow {
    stages: Vec<Arc<dyn Stage>>,
}

impl Workflow {
    pub fn new(stages: Vec<Arc<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// ats_analysis → cold_mail_writer → email_finder
    pub fn standard(llm: LlmClient, contacts: HunterClient) -> Self {
        Self::new(vec![
            Arc::new(AtsAnalysisStage::new(llm.clone())),
            Arc::new(ColdMailWriterStage::new(llm)),
            Arc::new(EmailFinderStage::new(contacts)),
        ])
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub async fn invoke(&self, mut state: ApplicationState) -> ApplicationState {
        let run_id = state.run_id();
        info!("Pipeline run {run_id} started");

        for stage in &self.stages {
            let name = stage.name();
            match stage.run(&mut state).await {
                Ok(()) => info!("Run {run_id}: stage '{name}' completed"),
                Err(e) => {
                    match &e {
                        StageError::Validation(msg) => {
                            warn!("Run {run_id}: stage '{name}' skipped: {msg}")
                        }
                        other => error!("Run {run_id}: stage '{name}' failed: {other}"),
                    }
                    state.record_failure(name, e.public_message(stage.internal_message()));
                }
            }
        }

        info!(
            "Pipeline run {run_id} finished with {} failed stage(s)",
            state.failures().len()
        );
        state
    }
}
