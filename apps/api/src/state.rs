use crate::config::Config;
use crate::outreach::SmtpMailer;
use crate::pipeline::Workflow;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The three-stage pipeline. Each request gets its own `ApplicationState`.
    pub workflow: Workflow,
    pub mailer: SmtpMailer,
    pub config: Config,
}
