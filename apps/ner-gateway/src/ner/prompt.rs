//! Prompt construction

use super::schema::EntityField;
use super::types::{ChatMessage, ChatRequest};

/// Sampling temperature; extraction must be deterministic
pub const TEMPERATURE: f32 = 0.0;

pub const SYSTEM_PROMPT: &str = "You are an HR analyst specialised in information extraction. \
Return ONLY a valid JSON object using the keys and value rules defined in the provided schema, \
with no additional commentary.";

/// User message embedding the schema and the literal document text
pub fn build_user_prompt(text: &str) -> String {
    format!(
        "Required JSON schema:\n{}\n\nLetter:\n\"\"\"\n{}\n\"\"\"",
        EntityField::schema_json(),
        text
    )
}

pub fn build_request(text: &str, model: &str, max_tokens: u32) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        temperature: TEMPERATURE,
        max_tokens,
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(build_user_prompt(text)),
        ],
    }
}
