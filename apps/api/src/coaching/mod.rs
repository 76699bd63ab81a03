// Coaching: practice scenario generation and feedback on user answers.
// All LLM calls go through llm_client; no direct Anthropic calls here.

pub mod feedback;
pub mod handlers;
pub mod prompts;
pub mod scenarios;
