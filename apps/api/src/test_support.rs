//! Shared helpers for tests that need a stand-in upstream service.

use std::time::Duration;

use axum::{routing::post, Json, Router};
use serde_json::{json, Value};

use crate::llm_client::LlmClient;

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{addr}")
}

/// A Messages API stand-in that always answers with `text`.
pub fn llm_replying(text: String) -> Router {
    Router::new().route(
        "/v1/messages",
        post(move || {
            let text = text.clone();
            async move {
                Json(json!({
                    "content": [{"type": "text", "text": text}],
                    "usage": {"input_tokens": 100, "output_tokens": 50}
                }))
            }
        }),
    )
}

/// Serves `app` and returns an `LlmClient` pointed at it.
pub async fn llm_client_for(app: Router) -> LlmClient {
    let url = format!("{}/v1/messages", serve(app).await);
    LlmClient::new("test-key".to_string(), url, Duration::from_secs(5)).unwrap()
}

/// Five well-formed scenarios as the model would return them.
pub fn sample_scenarios_json() -> Value {
    let kinds = ["email", "phone", "problem", "email", "phone"];
    Value::Array(
        kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                json!({
                    "type": kind,
                    "title": format!("Scenario {}", i + 1),
                    "prompt": "A customer says they were charged twice. Respond to them.",
                    "tips": ["Stay calm", "Apologize", "Check the receipt", "Offer a fix"],
                    "example": "I'm sorry about that. Let me check your receipt and fix it right away.",
                    "criteria": ["Empathy", "Clear next step", "Polite tone", "Accuracy", "Ownership"]
                })
            })
            .collect(),
    )
}

pub const SAMPLE_FEEDBACK: &str = "STRENGTHS: You apologized right away and stayed polite.\n\
    AREAS TO DEVELOP: Say exactly how you will fix the double charge.\n\
    OVERALL: Great effort - you are building strong customer service habits.";
