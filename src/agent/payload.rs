//! Helpers for picking apart chat-completions response payloads.

use serde_json::Value;

use crate::error::{Result, SqlPilotError};

fn first_message(response_json: &Value) -> Result<&Value> {
    let choices = response_json
        .get("choices")
        .and_then(|c| c.as_array())
        .ok_or_else(|| SqlPilotError::Other("No choices in response".to_string()))?;

    let first_choice = choices
        .first()
        .ok_or_else(|| SqlPilotError::Other("Empty choices array".to_string()))?;

    first_choice
        .get("message")
        .ok_or_else(|| SqlPilotError::Other("No message in response".to_string()))
}

/// Tool calls requested by the model, if any.
pub fn parse_tool_calls(response_json: &Value) -> Result<Option<Vec<Value>>> {
    let message = first_message(response_json)?;

    if let Some(tool_calls) = message.get("tool_calls").and_then(|tc| tc.as_array()) {
        if !tool_calls.is_empty() {
            return Ok(Some(tool_calls.clone()));
        }
    }

    Ok(None)
}

/// Assistant text content, if any.
pub fn extract_content(response_json: &Value) -> Result<Option<String>> {
    let message = first_message(response_json)?;

    Ok(message
        .get("content")
        .and_then(|c| c.as_str())
        .map(|s| s.to_string()))
}

/// Reasoning text, if the backend exposes it. Both field spellings show
/// up depending on the backend.
pub fn extract_reasoning(response_json: &Value) -> Result<Option<String>> {
    let message = first_message(response_json)?;

    Ok(message
        .get("reasoning_content")
        .or_else(|| message.get("reasoning"))
        .and_then(|r| r.as_str())
        .map(|s| s.to_string()))
}
