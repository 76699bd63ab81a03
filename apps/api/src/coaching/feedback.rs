//! Feedback on a user's answer to a scenario. The reply is returned as opaque text.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::coaching::prompts::{
    fill_template, FEEDBACK_PROMPT_TEMPLATE, FEEDBACK_SECTIONS, FEEDBACK_SYSTEM,
};
use crate::errors::AppError;
use crate::llm_client::prompts::PLAIN_LANGUAGE_INSTRUCTION;
use crate::llm_client::LlmClient;

const FEEDBACK_MAX_TOKENS: u32 = 1000;
const FEEDBACK_FAILED: &str = "Failed to get feedback from AI";

/// The parts of a scenario the feedback rubric needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioBrief {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub criteria: Vec<String>,
}

/// Asks the model to assess `user_text` against the scenario's criteria.
pub async fn generate_feedback(
    llm: &LlmClient,
    scenario: &ScenarioBrief,
    user_text: &str,
) -> Result<String, AppError> {
    let prompt = build_feedback_prompt(scenario, user_text);

    let feedback = llm
        .call_text(&prompt, FEEDBACK_SYSTEM, FEEDBACK_MAX_TOKENS)
        .await
        .map_err(|e| AppError::from_llm(e, FEEDBACK_FAILED))?;

    let missing = missing_sections(&feedback);
    if !missing.is_empty() {
        warn!("Feedback is missing sections {missing:?}; returning it unchanged");
    }
    info!("Generated {} chars of feedback", feedback.len());

    Ok(feedback)
}

/// Section labels from the requested format that do not appear in `feedback`.
pub fn missing_sections(feedback: &str) -> Vec<&'static str> {
    FEEDBACK_SECTIONS
        .iter()
        .copied()
        .filter(|label| !feedback.contains(label))
        .collect()
}

fn build_feedback_prompt(scenario: &ScenarioBrief, user_text: &str) -> String {
    fill_template(
        FEEDBACK_PROMPT_TEMPLATE,
        &[
            ("scenario_prompt", scenario.prompt.as_str()),
            ("criteria", scenario.criteria.join(", ").as_str()),
            ("user_text", user_text),
            ("plain_language", PLAIN_LANGUAGE_INSTRUCTION),
        ],
    )
}
