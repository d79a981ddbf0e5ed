//! OpenAI Chat Completions client
//!
//! One request per call. No retries and no custom timeout: failures are
//! surfaced to the caller, which ends the current stage.

use super::{CompletionClient, CompletionRequest, LlmError, ResponseFormat};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::Authentication("API key cannot be empty".to_string()));
        }

        let http = Client::builder().build()?;

        Ok(Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Build the JSON body for the Chat Completions endpoint
    fn build_request_body(&self, request: &CompletionRequest) -> Value {
        debug!(model = %request.model, messages = request.messages.len(), "build_request_body");

        let response_format = match &request.response_format {
            ResponseFormat::Text => json!({ "type": "text" }),
            ResponseFormat::JsonSchema { name, schema } => json!({
                "type": "json_schema",
                "json_schema": {
                    "name": name,
                    "strict": true,
                    "schema": schema,
                }
            }),
        };

        json!({
            "model": request.model,
            "messages": request.messages,
            "response_format": response_format,
            "verbosity": request.verbosity.as_str(),
            "reasoning_effort": request.reasoning_effort.as_str(),
        })
    }

    fn headers(&self) -> Result<HeaderMap, LlmError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|_| LlmError::Authentication("Invalid API key format".to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = self.build_request_body(&request);

        let response = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            debug!(status = status.as_u16(), "complete: API error");
            return Err(LlmError::from_status(status.as_u16(), message));
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        extract_content(parsed)
    }
}

fn extract_content(response: ChatCompletionResponse) -> Result<String, LlmError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("no choices returned".to_string()))?;

    if let Some(refusal) = choice.message.refusal {
        return Err(LlmError::InvalidResponse(format!("model refused: {}", refusal)));
    }

    choice
        .message
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| LlmError::InvalidResponse("empty message content".to_string()))
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}
