//! Axum route handlers for the coaching API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::coaching::feedback::{generate_feedback, ScenarioBrief};
use crate::coaching::scenarios::generate_scenarios;
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::occupation::OccupationDetail;
use crate::models::scenario::Scenario;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateScenariosRequest {
    pub occupation_details: Option<OccupationDetail>,
}

#[derive(Debug, Serialize)]
pub struct GenerateScenariosResponse {
    pub scenarios: Vec<Scenario>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub user_text: Option<String>,
    pub scenario: Option<ScenarioBrief>,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub feedback: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /generate-scenarios
pub async fn handle_generate_scenarios(
    State(state): State<AppState>,
    payload: Result<Json<GenerateScenariosRequest>, JsonRejection>,
) -> Result<Json<GenerateScenariosResponse>, AppError> {
    let Json(request) = payload.map_err(invalid_body)?;

    let detail = request
        .occupation_details
        .filter(|d| !d.title.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Missing occupation details".to_string()))?;

    let llm = require_llm(&state)?;
    let scenarios = generate_scenarios(llm, &detail).await?;

    Ok(Json(GenerateScenariosResponse { scenarios }))
}

/// POST /feedback
pub async fn handle_feedback(
    State(state): State<AppState>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let Json(request) = payload.map_err(invalid_body)?;

    let user_text = request
        .user_text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(missing_fields)?;
    let scenario = request
        .scenario
        .filter(|s| !s.prompt.trim().is_empty())
        .ok_or_else(missing_fields)?;

    let llm = require_llm(&state)?;
    let feedback = generate_feedback(llm, &scenario, &user_text).await?;

    Ok(Json(FeedbackResponse { feedback }))
}

fn require_llm(state: &AppState) -> Result<&LlmClient, AppError> {
    state
        .llm
        .as_ref()
        .ok_or_else(|| AppError::Config("ANTHROPIC_API_KEY is not set".to_string()))
}

fn missing_fields() -> AppError {
    AppError::Validation("Missing required fields".to_string())
}

fn invalid_body(rejection: JsonRejection) -> AppError {
    warn!("Rejected request body: {rejection}");
    AppError::Validation("Invalid request body".to_string())
}
