use std::time::Duration;

use async_trait::async_trait;
use colored::*;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

use super::payload::{extract_content, extract_reasoning, parse_tool_calls};
use super::prompt;
use super::wire::{Message, RequestBody, ToolCall};
use super::{Agent, AgentOutcome, MAX_REASONING_ROUNDS};
use crate::config::Config;
use crate::error::{Result, SqlPilotError};
use crate::session::{self, ChatMessage, Role};
use crate::toolkit::SqlToolkit;
use crate::transcript::Step;

/// Agent backed by an OpenAI-compatible chat-completions endpoint,
/// looping over tool calls until the model produces a final answer.
pub struct ChatApiAgent {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    system_prompt: Option<String>,
    history_limit: usize,
    verbose: bool,
    toolkit: SqlToolkit,
}

impl ChatApiAgent {
    pub fn new(config: &Config, toolkit: SqlToolkit) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key)).map_err(|e| {
                SqlPilotError::ConfigError(format!("Invalid authorization header: {}", e))
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.api_endpoint.clone(),
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
            history_limit: config.history_limit,
            verbose: config.verbose,
            toolkit,
        })
    }

    async fn request(&self, body: &RequestBody) -> Result<Value> {
        let response = self.client.post(&self.endpoint).json(body).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SqlPilotError::ApiError { status, message });
        }

        let payload = response.json::<Value>().await?;
        Ok(payload)
    }

    /// The outbound message list for one request: system instructions,
    /// the windowed prior conversation, then the new instruction.
    pub fn seed_messages(&self, instruction: &str, history: &[ChatMessage]) -> Vec<Message> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::system(prompt::system_instructions(
            self.system_prompt.as_deref(),
        )));

        for entry in session::recent_window(history, self.history_limit) {
            messages.push(match entry.role {
                Role::User => Message::user(entry.content.clone()),
                Role::Assistant => Message::assistant(entry.content.clone()),
            });
        }

        messages.push(Message::user(instruction));
        messages
    }

    /// Run one tool call, record the step, and feed the observation
    /// back into the conversation. Malformed calls become error
    /// observations so the model can recover.
    fn handle_tool_call(
        &self,
        call: &Value,
        index: usize,
        round_reasoning: &str,
        steps: &mut Vec<Step>,
        messages: &mut Vec<Message>,
    ) {
        let id = call
            .get("id")
            .and_then(|i| i.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("missing-id-{}", index));

        let function = call.get("function");
        let name = function.and_then(|f| f.get("name")).and_then(|n| n.as_str());
        let arguments_str = function
            .and_then(|f| f.get("arguments"))
            .and_then(|a| a.as_str());

        let (name, arguments_str) = match (name, arguments_str) {
            (Some(n), Some(a)) => (n, a),
            _ => {
                eprintln!(
                    "{}",
                    format!("Warning: tool call {} is malformed, skipping", id).yellow()
                );
                messages.push(Message::tool(
                    id,
                    "Error: tool call is missing its function name or arguments",
                ));
                return;
            }
        };

        if self.verbose {
            let preview: String = arguments_str.chars().take(100).collect();
            eprintln!(
                "{}",
                format!("[tools] calling '{}' with args: {}", name, preview).dimmed()
            );
        }

        let (tool_input, observation) = match serde_json::from_str::<Value>(arguments_str) {
            Err(err) => (
                arguments_str.to_string(),
                format!(
                    "Error: failed to parse arguments for tool '{}': {}",
                    name, err
                ),
            ),
            Ok(arguments) => {
                let input = SqlToolkit::tool_input_text(name, &arguments);
                let observation = match self.toolkit.validate_arguments(name, &arguments) {
                    Err(e) => format!("Error: {}", e),
                    Ok(()) => match self.toolkit.dispatch(name, &arguments) {
                        Ok(result) => result,
                        Err(e) => format!("Error: {}", e),
                    },
                };
                (input, observation)
            }
        };

        if self.verbose {
            eprintln!(
                "{}",
                format!("[tools] {} -> {} bytes", name, observation.len()).dimmed()
            );
        }

        steps.push(Step::Action {
            tool_name: name.to_string(),
            tool_input,
            observation: observation.clone(),
            reasoning: round_reasoning.to_string(),
        });
        messages.push(Message::tool(id, observation));
    }
}

#[async_trait]
impl Agent for ChatApiAgent {
    async fn run(&self, instruction: &str, history: &[ChatMessage]) -> Result<AgentOutcome> {
        let mut messages = self.seed_messages(instruction, history);
        let tools = Some(self.toolkit.definitions());
        let mut steps: Vec<Step> = Vec::new();

        for round in 0..MAX_REASONING_ROUNDS {
            if self.verbose {
                eprintln!(
                    "{}",
                    format!(
                        "[agent] round {} of {} ({} messages)",
                        round + 1,
                        MAX_REASONING_ROUNDS,
                        messages.len()
                    )
                    .dimmed()
                );
            }

            let body = RequestBody {
                model: self.model.clone(),
                messages: messages.clone(),
                stream: false,
                tools: tools.clone(),
            };
            let response = self.request(&body).await?;

            let reasoning = extract_reasoning(&response)?.unwrap_or_default();
            let content = extract_content(&response)?;

            let tool_calls = match parse_tool_calls(&response)? {
                Some(calls) => calls,
                None => {
                    // No tool calls, so the content is the final answer
                    let answer = content.unwrap_or_default();
                    if answer.trim().is_empty() {
                        return Err(SqlPilotError::AgentError(
                            "model returned neither tool calls nor content".to_string(),
                        ));
                    }
                    return Ok(AgentOutcome {
                        final_answer: answer,
                        steps,
                    });
                }
            };

            // Thought text for this round's steps: explicit reasoning
            // first, interim content as fallback
            let round_reasoning = if reasoning.is_empty() {
                content.clone().unwrap_or_default()
            } else {
                reasoning
            };

            let typed_calls: Vec<ToolCall> = tool_calls
                .iter()
                .filter_map(|tc| serde_json::from_value(tc.clone()).ok())
                .collect();
            messages.push(Message::assistant_with_calls(content, typed_calls));

            for (index, call) in tool_calls.iter().enumerate() {
                self.handle_tool_call(call, index, &round_reasoning, &mut steps, &mut messages);
            }
        }

        Err(SqlPilotError::AgentError(format!(
            "no final answer after {} reasoning rounds",
            MAX_REASONING_ROUNDS
        )))
    }
}
