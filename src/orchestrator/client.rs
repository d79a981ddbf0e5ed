//! Completion client contract

use super::LlmError;
use crate::config::{ReasoningEffort, StageSettings, Verbosity};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Chat message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Developer,
    User,
    Assistant,
}

/// One role-tagged chat turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn developer(content: impl Into<String>) -> Self {
        Self {
            role: Role::Developer,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Shape the response must take
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseFormat {
    /// Free-form text
    Text,
    /// JSON constrained by a schema
    JsonSchema { name: String, schema: Value },
}

/// A single completion call
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub response_format: ResponseFormat,
    pub verbosity: Verbosity,
    pub reasoning_effort: ReasoningEffort,
}

impl CompletionRequest {
    /// Build a request from stage settings
    pub fn new(settings: StageSettings, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: settings.model,
            messages,
            response_format: ResponseFormat::Text,
            verbosity: settings.verbosity,
            reasoning_effort: settings.reasoning_effort,
        }
    }

    /// Constrain the response to a JSON schema
    pub fn with_schema(mut self, name: impl Into<String>, schema: Value) -> Self {
        self.response_format = ResponseFormat::JsonSchema {
            name: name.into(),
            schema,
        };
        self
    }
}

/// Sends chat requests to a generative text API
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Return the text content of the first choice
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}
