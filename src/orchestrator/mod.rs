pub mod client;
pub mod error;
pub mod openai;
pub mod prompts;
pub mod structured;

pub use client::{ChatMessage, CompletionClient, CompletionRequest, ResponseFormat, Role};
pub use error::LlmError;
pub use openai::OpenAiClient;
pub use structured::complete_structured;
