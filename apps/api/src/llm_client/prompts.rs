// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Audience instruction shared by every coaching prompt.
pub const PLAIN_LANGUAGE_INSTRUCTION: &str = "\
    Keep language simple and clear: users may have learning disabilities. \
    Prefer short sentences and everyday words over jargon.";
