pub mod applications;
pub mod health;
pub mod outreach;
pub mod pages;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Room for the multipart framing and the job description on top of the file itself.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + FORM_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Interactive form
        .route("/", get(pages::handle_form))
        .route("/analyze", post(applications::handle_analyze_form))
        // JSON API
        .route(
            "/api/v1/applications/analyze",
            post(applications::handle_analyze),
        )
        .route("/api/v1/outreach/mailto", post(outreach::handle_mailto))
        .route("/api/v1/outreach/send", post(outreach::handle_send))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
