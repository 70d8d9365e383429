//! JSON messages exchanged with the chat panel.
//!
//! ```rust
//! use dchat::{InboundMessage, UiEvent};
//!
//! let inbound = InboundMessage::from_json(r#"{"type":"userInput","text":"hi"}"#)
//!     .expect("valid inbound message");
//! assert_eq!(inbound.text(), "hi");
//!
//! let outbound = UiEvent::response("hello").to_json().expect("serializable");
//! assert_eq!(outbound, r#"{"type":"response","text":"hello"}"#);
//! ```

use serde::{Deserialize, Serialize};

use crate::ChatError;

/// Panel to host. Extra fields such as a client-side `apiKey` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InboundMessage {
    SendMessage { text: String },
    UserInput { text: String },
}

impl InboundMessage {
    pub fn from_json(raw: &str) -> Result<Self, ChatError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn text(&self) -> &str {
        match self {
            Self::SendMessage { text } | Self::UserInput { text } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::SendMessage { text } | Self::UserInput { text } => text,
        }
    }
}

/// Host to panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UiEvent {
    Response { text: String },
    Status { text: String },
    Error { text: String },
}

impl UiEvent {
    pub fn response(text: impl Into<String>) -> Self {
        Self::Response { text: text.into() }
    }

    pub fn status(text: impl Into<String>) -> Self {
        Self::Status { text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::Error { text: text.into() }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Response { .. } => "response",
            Self::Status { .. } => "status",
            Self::Error { .. } => "error",
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Response { text } | Self::Status { text } | Self::Error { text } => text,
        }
    }

    /// Status updates are informational; response and error end a submission.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Status { .. })
    }

    pub fn to_json(&self) -> Result<String, ChatError> {
        serde_json::to_string(self).map_err(|err| ChatError::ui(err.to_string()))
    }
}
