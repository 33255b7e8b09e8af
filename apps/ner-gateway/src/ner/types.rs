//! NER Types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::schema::EntityField;

/// Chat message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Chat-completion request, serialized as the OpenAI request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub messages: Vec<ChatMessage>,
}

/// Entities returned by the model
///
/// Keys keep the order the model produced them in. Values are whatever JSON
/// the model returned (usually a string, a number or null).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityResult(Map<String, Value>);

impl EntityResult {
    /// Parse a model reply; only a JSON object is accepted
    pub fn parse(reply: &str) -> Result<Self, NerError> {
        let value: Value = serde_json::from_str(reply.trim())
            .map_err(|e| NerError::unparseable(e.to_string()))?;

        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(NerError::unparseable(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys that are not part of the entity schema
    pub fn unknown_keys(&self) -> Vec<&str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|key| EntityField::from_key(key).is_none())
            .collect()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// NER error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum NerError {
    /// Empty or undecodable client input
    #[error("{0}")]
    InvalidInput(String),

    /// Model service failure or unusable reply
    #[error("{0}")]
    Dependency(String),
}

impl NerError {
    pub fn unparseable(reason: impl std::fmt::Display) -> Self {
        Self::Dependency(format!("Unparseable response from model: {}", reason))
    }

    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Dependency(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl axum::response::IntoResponse for NerError {
    fn into_response(self) -> axum::response::Response {
        match &self {
            Self::InvalidInput(msg) => tracing::warn!("Rejected extraction request: {}", msg),
            Self::Dependency(msg) => tracing::error!("Entity extraction failed: {}", msg),
        }
        let status = self.status_code();
        docpipe_common::ErrorDetail::new(self.to_string()).with_status(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_keeps_order() {
        let result = EntityResult::parse(
            "\n  {\"job_title\": \"Software Engineer\", \"employee_name\": \"Jane Doe\", \"salary\": 5000, \"end_date\": null}  \n",
        )
        .unwrap();

        assert_eq!(result.len(), 4);
        assert_eq!(result.get("employee_name").unwrap(), "Jane Doe");
        assert_eq!(result.get("salary").unwrap(), 5000);
        assert!(result.get("end_date").unwrap().is_null());

        let keys: Vec<String> = result.into_inner().keys().cloned().collect();
        assert_eq!(keys, ["job_title", "employee_name", "salary", "end_date"]);
    }

    #[test]
    fn test_parse_rejects_prose() {
        let err = EntityResult::parse("Sure! Here are the entities you asked for.").unwrap_err();
        assert!(matches!(err, NerError::Dependency(_)));
        assert!(err.to_string().starts_with("Unparseable response from model"));
    }

    #[test]
    fn test_parse_rejects_non_object_json() {
        let err = EntityResult::parse("[1, 2, 3]").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unparseable response from model: expected a JSON object, got an array"
        );
    }

    #[test]
    fn test_unknown_keys() {
        let result =
            EntityResult::parse(r#"{"employee_name": "Jane", "shoe_size": 42}"#).unwrap();
        assert_eq!(result.unknown_keys(), vec!["shoe_size"]);
    }

    #[test]
    fn test_chat_request_wire_format() {
        let request = ChatRequest {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.0,
            max_tokens: 512,
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("hi")],
        };

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["max_tokens"], 512);
        assert_eq!(body["temperature"], 0.0);
    }

    #[test]
    fn test_status_codes() {
        use axum::http::StatusCode;
        assert_eq!(
            NerError::InvalidInput(String::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            NerError::Dependency(String::new()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }
}
