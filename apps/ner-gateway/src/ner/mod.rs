//! NER Module
//!
//! Entity extraction from plain text through a chat-completion model.
//!
//! The fixed [`EntityField`] schema is embedded in the prompt, the model is
//! asked for a JSON object, and the reply is parsed into an
//! [`EntityResult`]. Each call is a single attempt.

mod prompt;
mod provider;
mod schema;
mod service;
mod types;

pub use prompt::{build_request, build_user_prompt, SYSTEM_PROMPT};
pub use provider::{ChatModel, OpenAiChatModel};
pub use schema::EntityField;
pub use service::{EntityExtractor, ExtractionSettings};
pub use types::{ChatMessage, ChatRequest, ChatRole, EntityResult, NerError};

#[cfg(test)]
pub use provider::ScriptedModel;
