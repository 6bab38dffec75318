//! Chat-completion wire types and reply parsing.
//!
//! # Responsibility
//! - Define the request body sent to the inference endpoint.
//! - Decode the reply through an explicit list of known envelope shapes.
//! - Extract the `{type, confidence, reasoning}` verdict, fenced or bare.
//!
//! # Invariants
//! - Envelope shapes are tried in fixed order: `messages`, `message`, flat
//!   `content`.
//! - A verdict is accepted only with a known type and confidence in `[0, 1]`.

use crate::model::classification::Category;
use crate::remote::RemoteError;
use serde::{Deserialize, Serialize};

const SYSTEM_PERSONA: &str = "You are a text classification assistant. You tell apart \
schedule entries from memos, for Chinese and English text alike.";

/// Message author role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Request body for the chat-completions endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatRequest {
    /// Builds the persona + classification prompt pair for `text`.
    pub fn classification(model: &str, text: &str, temperature: f32, max_tokens: u32) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: SYSTEM_PERSONA.to_string(),
                },
                ChatMessage {
                    role: Role::User,
                    content: classification_prompt(text),
                },
            ],
            temperature,
            max_tokens,
        }
    }
}

/// Renders the user-role prompt for one text.
pub fn classification_prompt(text: &str) -> String {
    format!(
        "Decide whether the text below is a \"schedule\" entry or a \"memo\".\n\
\n\
A schedule entry:\n\
- carries explicit time information (a date or a time of day)\n\
- describes something that will happen\n\
- usually mentions a meeting, appointment or activity\n\
\n\
A memo:\n\
- records thoughts, lessons or notes\n\
- has no concrete time requirement\n\
- is usually a personal record or summary\n\
\n\
Text:\n\
{text}\n\
\n\
Reply with a JSON object with these fields:\n\
{{\n\
\"type\": \"schedule\" or \"memo\",\n\
\"confidence\": a number between 0.0 and 1.0,\n\
\"reasoning\": \"why this category was chosen\"\n\
}}\n\
\n\
Reply with the JSON only."
    )
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChoiceEnvelope>,
}

/// Known layouts for where the assistant text lives inside one choice.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChoiceEnvelope {
    Messages { messages: MessageBody },
    Message { message: MessageBody },
    Flat { content: String },
}

impl ChoiceEnvelope {
    fn into_content(self) -> String {
        match self {
            Self::Messages { messages } => messages.content,
            Self::Message { message } => message.content,
            Self::Flat { content } => content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    content: String,
}

/// Classification verdict returned by the model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteVerdict {
    #[serde(rename = "type")]
    pub category: Category,
    pub confidence: f64,
    /// Informational only; never propagated into results.
    #[serde(default)]
    pub reasoning: Option<String>,
}

/// Decodes a raw response body into a verdict.
pub fn parse_reply(body: &str) -> Result<RemoteVerdict, RemoteError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|err| RemoteError::Malformed(format!("unrecognized response envelope: {err}")))?;
    let content = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| RemoteError::Malformed("response has no choices".to_string()))?
        .into_content();

    parse_verdict(&content)
}

/// Decodes assistant text (optionally markdown-fenced) into a verdict.
pub fn parse_verdict(content: &str) -> Result<RemoteVerdict, RemoteError> {
    let payload = strip_code_fence(content);
    let verdict: RemoteVerdict = serde_json::from_str(payload)
        .map_err(|err| RemoteError::Malformed(format!("invalid verdict json: {err}")))?;

    if !(0.0..=1.0).contains(&verdict.confidence) {
        return Err(RemoteError::Malformed(format!(
            "confidence {} outside [0, 1]",
            verdict.confidence
        )));
    }
    Ok(verdict)
}

/// Returns the body of the first markdown code block, or the trimmed input
/// when no fence is present.
///
/// A ```` ```json ```` fence takes precedence over a bare ```` ``` ```` fence.
pub fn strip_code_fence(content: &str) -> &str {
    let fenced = if let Some((_, rest)) = content.split_once("```json") {
        Some(rest)
    } else {
        content.split_once("```").map(|(_, rest)| rest)
    };

    match fenced {
        Some(rest) => rest.split("```").next().unwrap_or(rest).trim(),
        None => content.trim(),
    }
}
