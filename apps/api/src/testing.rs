//! Test helpers: local axum servers standing in for the Anthropic and Hunter APIs.

use axum::Router;
use serde_json::{json, Value};

/// Binds `router` to an ephemeral localhost port and returns its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A Messages API response whose single text block is `text`.
pub fn anthropic_reply(text: &str) -> Value {
    json!({
        "content": [{"type": "text", "text": text}],
        "usage": {"input_tokens": 42, "output_tokens": 17}
    })
}
