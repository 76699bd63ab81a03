//! Scenario generation: occupation detail → five validated practice scenarios.
//!
//! The model is trusted for content, not for shape. Output is checked against
//! the `Scenario` schema and a mismatch surfaces as `InvalidModelOutput`
//! instead of reaching the UI as a broken card.

use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::coaching::prompts::{fill_template, SCENARIO_PROMPT_TEMPLATE, SCENARIO_SYSTEM_ROLE};
use crate::errors::AppError;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, PLAIN_LANGUAGE_INSTRUCTION};
use crate::llm_client::{LlmClient, LlmError};
use crate::models::occupation::OccupationDetail;
use crate::models::scenario::{Scenario, SCENARIO_COUNT};

const SCENARIO_MAX_TOKENS: u32 = 4000;

const GENERATION_FAILED: &str = "Failed to generate scenarios";
const PARSE_FAILED: &str = "Failed to parse generated scenarios";

/// Ways a syntactically valid model reply can miss the scenario schema.
#[derive(Debug, Error, PartialEq)]
pub enum ScenarioShapeError {
    #[error("expected a JSON array of scenarios")]
    NotAnArray,

    #[error("expected {expected} scenarios, got {actual}")]
    WrongCount { expected: usize, actual: usize },

    #[error("scenario {index} does not match the schema: {reason}")]
    Malformed { index: usize, reason: String },

    #[error("scenario {index} has an empty `{field}`")]
    EmptyField { index: usize, field: &'static str },
}

/// Generates exactly `SCENARIO_COUNT` scenarios for an occupation.
pub async fn generate_scenarios(
    llm: &LlmClient,
    detail: &OccupationDetail,
) -> Result<Vec<Scenario>, AppError> {
    let prompt = build_scenario_prompt(detail);
    let system = format!("{SCENARIO_SYSTEM_ROLE} {JSON_ONLY_SYSTEM}");

    let raw: Value = llm
        .call_json(&prompt, &system, SCENARIO_MAX_TOKENS)
        .await
        .map_err(|e| match e {
            LlmError::Parse(_) | LlmError::EmptyContent => AppError::from_llm(e, PARSE_FAILED),
            other => AppError::from_llm(other, GENERATION_FAILED),
        })?;

    let scenarios = validate_scenarios(raw).map_err(|e| AppError::InvalidModelOutput {
        message: PARSE_FAILED,
        detail: e.to_string(),
    })?;

    info!(
        "Generated {} scenarios for {} ({})",
        scenarios.len(),
        detail.title,
        detail.code
    );

    Ok(scenarios)
}

/// Checks a parsed model reply against the scenario schema.
pub fn validate_scenarios(raw: Value) -> Result<Vec<Scenario>, ScenarioShapeError> {
    let Value::Array(items) = raw else {
        return Err(ScenarioShapeError::NotAnArray);
    };

    if items.len() != SCENARIO_COUNT {
        return Err(ScenarioShapeError::WrongCount {
            expected: SCENARIO_COUNT,
            actual: items.len(),
        });
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let scenario: Scenario =
                serde_json::from_value(item).map_err(|e| ScenarioShapeError::Malformed {
                    index,
                    reason: e.to_string(),
                })?;
            match scenario.missing_field() {
                Some(field) => Err(ScenarioShapeError::EmptyField { index, field }),
                None => Ok(scenario),
            }
        })
        .collect()
}

/// Fills the scenario template with every detail field, lists joined by `; `.
fn build_scenario_prompt(detail: &OccupationDetail) -> String {
    fill_template(
        SCENARIO_PROMPT_TEMPLATE,
        &[
            ("title", detail.title.as_str()),
            ("tasks", detail.tasks.join("; ").as_str()),
            ("skills", detail.skills.join("; ").as_str()),
            ("knowledge", detail.knowledge.join("; ").as_str()),
            ("work_activities", detail.work_activities.join("; ").as_str()),
            ("work_context", detail.work_context.join("; ").as_str()),
            ("work_styles", detail.work_styles.join("; ").as_str()),
            ("technology_skills", detail.technology_skills.join("; ").as_str()),
            ("plain_language", PLAIN_LANGUAGE_INSTRUCTION),
        ],
    )
}
