//! Chat-completion HTTP payload serde models and conversion helpers.

use serde::Serialize;
use serde_json::Value;

use crate::{ChatRequest, ClientConfig, ErrorKind, Message, Role, truncate_context};

/// JSON body POSTed to the completion endpoint. Field names match the provider verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiRequest {
    pub messages: Vec<ApiMessage>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub stream: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiMessage {
    pub role: String,
    pub content: String,
}

impl From<Message> for ApiMessage {
    fn from(value: Message) -> Self {
        Self {
            role: value.role.as_str().to_string(),
            content: value.content,
        }
    }
}

/// Orders segments as system instructions, optional context, then the user text.
pub(crate) fn build_messages(request: &ChatRequest, config: &ClientConfig) -> Vec<Message> {
    let mut messages = vec![Message::new(Role::System, config.system_prompt.clone())];

    let context = truncate_context(&request.context_text, config.max_context_length);
    if !context.trim().is_empty() {
        messages.push(Message::new(Role::System, context));
    }

    messages.push(Message::new(Role::User, request.user_text.clone()));
    messages
}

pub(crate) fn build_api_request(request: &ChatRequest, config: &ClientConfig) -> ApiRequest {
    let model = if request.model_id.trim().is_empty() {
        config.model.clone()
    } else {
        request.model_id.clone()
    };

    ApiRequest {
        messages: build_messages(request, config)
            .into_iter()
            .map(ApiMessage::from)
            .collect(),
        model,
        max_tokens: config.max_tokens,
        temperature: config.temperature,
        stream: false,
    }
}

/// Extracts `choices[0].message.content` from a 2xx body.
///
/// Unparseable JSON is an upstream error. Parseable JSON of any other shape, or without
/// string content at that path, is malformed.
pub(crate) fn parse_answer(body: &str) -> Result<String, (ErrorKind, String)> {
    if body.trim().is_empty() {
        return Err((
            ErrorKind::MalformedResponse,
            "response body was empty".to_string(),
        ));
    }

    let parsed: Value = serde_json::from_str(body).map_err(|err| {
        (
            ErrorKind::UpstreamError,
            format!("invalid JSON response: {err}"),
        )
    })?;

    parsed
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            (
                ErrorKind::MalformedResponse,
                "response did not include choices[0].message.content".to_string(),
            )
        })
}
