//! Chat model providers
//!
//! Defines the provider trait and the OpenAI-compatible implementation.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::types::{ChatRequest, NerError};

/// Chat-completion provider trait
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &'static str;

    /// Send one request and return the assistant's text reply
    async fn complete(&self, request: &ChatRequest) -> Result<String, NerError>;
}

/// OpenAI `/chat/completions` provider
pub struct OpenAiChatModel {
    client: reqwest::Client,
    /// API base URL, e.g. `https://api.openai.com/v1`
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl OpenAiChatModel {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            timeout,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> NerError {
        if e.is_timeout() {
            NerError::Dependency(format!(
                "OpenAI request timed out after {} seconds",
                self.timeout.as_secs()
            ))
        } else {
            NerError::Dependency(format!("Failed to call OpenAI: {}", e))
        }
    }
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Pull `choices[0].message.content` out of a completion body
fn parse_completion(body: &str) -> Result<String, NerError> {
    let response: CompletionResponse =
        serde_json::from_str(body).map_err(|e| NerError::unparseable(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| NerError::unparseable("response has no choices[0].message.content"))
}

/// Prefer the API's own error message over the raw body
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorResponse>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<String, NerError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(NerError::Dependency(format!(
                "OpenAI returned {}: {}",
                status,
                api_error_message(&body)
            )));
        }

        parse_completion(&body)
    }
}

/// Scripted provider for tests
#[cfg(test)]
pub struct ScriptedModel {
    pub reply: Result<String, NerError>,
    pub calls: std::sync::atomic::AtomicUsize,
    pub last_request: std::sync::Mutex<Option<ChatRequest>>,
}

#[cfg(test)]
impl ScriptedModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: Default::default(),
            last_request: Default::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(NerError::Dependency(message.to_string())),
            calls: Default::default(),
            last_request: Default::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl ChatModel for ScriptedModel {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<String, NerError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.reply.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ner::build_request;
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};

    /// Serve `router` on an ephemeral port and return its base URL
    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn model(base_url: &str) -> OpenAiChatModel {
        OpenAiChatModel::new(base_url, "sk-test", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_complete_reads_first_choice() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["authorization"], "Bearer sk-test");
                assert_eq!(body["model"], "gpt-4o-mini");
                assert_eq!(body["temperature"], 0.0);
                assert_eq!(body["messages"][0]["role"], "system");
                Json(json!({
                    "id": "chatcmpl-1",
                    "choices": [
                        { "index": 0, "message": { "role": "assistant", "content": "{\"employee_name\": \"Jane Doe\"}" } }
                    ]
                }))
            }),
        );
        let base_url = spawn(router).await;

        let reply = model(&format!("{}/v1/", base_url))
            .complete(&build_request("Jane Doe", "gpt-4o-mini", 512))
            .await
            .unwrap();

        assert_eq!(reply, "{\"employee_name\": \"Jane Doe\"}");
    }

    #[tokio::test]
    async fn test_api_error_message_is_surfaced() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async {
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({ "error": { "message": "Rate limit reached", "type": "requests" } })),
                )
            }),
        );
        let base_url = spawn(router).await;

        let err = model(&base_url)
            .complete(&build_request("text", "gpt-4o-mini", 512))
            .await
            .unwrap_err();

        assert!(matches!(err, NerError::Dependency(_)));
        assert_eq!(
            err.to_string(),
            "OpenAI returned 429 Too Many Requests: Rate limit reached"
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_is_dependency_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = model(&format!("http://{}", addr))
            .complete(&build_request("text", "gpt-4o-mini", 512))
            .await
            .unwrap_err();

        assert!(matches!(err, NerError::Dependency(ref msg) if msg.starts_with("Failed to call OpenAI")));
    }

    #[test]
    fn test_parse_completion_without_content() {
        let err = parse_completion(r#"{"choices": []}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unparseable response from model: response has no choices[0].message.content"
        );

        let err = parse_completion("<html>gateway timeout</html>").unwrap_err();
        assert!(err.to_string().starts_with("Unparseable response from model"));
    }

    #[test]
    fn test_api_error_message_falls_back_to_body() {
        assert_eq!(api_error_message("upstream down"), "upstream down");
    }

    #[tokio::test]
    async fn test_slow_model_times_out() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({ "choices": [] }))
            }),
        );
        let base_url = spawn(router).await;
        let model = OpenAiChatModel::new(&base_url, "sk-test", Duration::from_secs(1)).unwrap();

        let err = model
            .complete(&build_request("Jane Doe", "gpt-4o-mini", 512))
            .await
            .unwrap_err();

        match err {
            NerError::Dependency(message) => {
                assert!(message.starts_with("OpenAI request timed out"), "{}", message);
            }
            other => panic!("expected a dependency error, got {:?}", other),
        }
    }
}
