// All LLM prompt constants for the coaching module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Role statement for scenario generation. Combined with `JSON_ONLY_SYSTEM`.
pub const SCENARIO_SYSTEM_ROLE: &str = "You are a workplace skills coach who designs \
    realistic practice exercises from real occupation data.";

/// Scenario generation prompt template.
/// Replace: {title}, {tasks}, {skills}, {knowledge}, {work_activities},
///          {work_context}, {work_styles}, {technology_skills}, {plain_language}
pub const SCENARIO_PROMPT_TEMPLATE: &str = r#"Create practice scenarios for someone working as: {title}

Here is real data about this occupation from O*NET:

TASKS: {tasks}

SKILLS NEEDED: {skills}

KNOWLEDGE AREAS: {knowledge}

WORK ACTIVITIES: {work_activities}

WORK CONTEXT: {work_context}

WORK STYLES: {work_styles}

TECHNOLOGY SKILLS: {technology_skills}

Based on this REAL job data, create exactly 5 practice scenarios. Each scenario must be directly relevant to the actual tasks and skills this job requires.

Return a JSON ARRAY of exactly 5 objects in this format:
[
  {
    "type": "email",
    "title": "Short descriptive title",
    "prompt": "The scenario description - what the user needs to do",
    "tips": ["tip 1", "tip 2", "tip 3", "tip 4"],
    "example": "A model response showing best practices",
    "criteria": ["criterion 1", "criterion 2", "criterion 3", "criterion 4", "criterion 5"]
  }
]

HARD RULES:
1. `type` is exactly one of "email", "phone" or "problem"; use a mix of types
2. Scenarios must be based on the ACTUAL tasks and work activities listed above
3. Tips are practical and specific to this job
4. Examples demonstrate professional best practices
5. Criteria are specific things to evaluate in a response
6. Scenarios are realistic day-to-day situations for this exact job
7. {plain_language}"#;

/// Role statement for feedback. Feedback is plain text, not JSON.
pub const FEEDBACK_SYSTEM: &str = "You are a supportive workplace skills coach. \
    You give constructive, encouraging feedback on practice answers.";

/// Feedback prompt template.
/// Replace: {scenario_prompt}, {criteria}, {user_text}, {plain_language}
pub const FEEDBACK_PROMPT_TEMPLATE: &str = r#"Analyze this response to a workplace scenario and provide constructive, encouraging feedback.

Scenario: {scenario_prompt}

Key criteria to look for: {criteria}

User's response:
{user_text}

Provide feedback in this format:
STRENGTHS: [2-3 specific things they did well]
AREAS TO DEVELOP: [2-3 specific, actionable suggestions for improvement]
OVERALL: [1-2 encouraging sentences about their effort and progress]

Be specific, positive, and constructive. Focus on building confidence while offering practical improvements. {plain_language}"#;

/// Section labels the feedback format asks for, in order.
pub const FEEDBACK_SECTIONS: [&str; 3] = ["STRENGTHS", "AREAS TO DEVELOP", "OVERALL"];

/// Fills `{name}` placeholders in a single pass. Substituted values are
/// emitted verbatim, so braces inside them are never expanded. Braces that do
/// not name a known placeholder (the JSON sample above) are left as written.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let hit = tail[1..].find('}').and_then(|close| {
            let name = &tail[1..1 + close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close + 2))
        });
        match hit {
            Some((value, consumed)) => {
                out.push_str(value);
                rest = &tail[consumed..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
