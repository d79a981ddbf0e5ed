//! Schema-constrained completions

use super::{CompletionClient, CompletionRequest, LlmError};
use crate::validator::validate_against;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Run a schema-constrained completion and decode the result
///
/// The response text must parse as JSON, satisfy `schema`, and deserialize
/// into `T`. Any failure is returned as an error; nothing is retried.
pub async fn complete_structured<T: DeserializeOwned>(
    client: &dyn CompletionClient,
    name: &str,
    schema: Value,
    request: CompletionRequest,
) -> Result<T, LlmError> {
    let request = request.with_schema(name, schema.clone());
    let text = client.complete(request).await?;
    debug!(schema = name, len = text.len(), "complete_structured: response received");

    let value: Value = serde_json::from_str(text.trim())
        .map_err(|e| LlmError::InvalidResponse(format!("response is not valid JSON: {}", e)))?;

    validate_against(&schema, &value).map_err(|details| LlmError::SchemaViolation {
        name: name.to_string(),
        details,
    })?;

    Ok(serde_json::from_value(value)?)
}
