//! Request and result types for one completion cycle.
//!
//! ```rust
//! use dprovider::{ChatRequest, ChatResult, truncate_context};
//!
//! let request = ChatRequest::new("what does this do?").with_context("fn main() {}");
//! assert_eq!(request.context_text, "fn main() {}");
//!
//! assert_eq!(truncate_context("abcdef", 3), "abc");
//! assert_eq!(ChatResult::answer("X"), ChatResult::Answer("X".to_string()));
//! ```

use crate::ErrorKind;

pub const BUSY_MESSAGE: &str = "server busy, try again";
pub const MISSING_CREDENTIAL_MESSAGE: &str = "API key is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// One user submission. An empty `model_id` defers to the client config's model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub user_text: String,
    pub context_text: String,
    pub model_id: String,
}

impl ChatRequest {
    pub fn new(user_text: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            context_text: String::new(),
            model_id: String::new(),
        }
    }

    pub fn with_context(mut self, context_text: impl Into<String>) -> Self {
        self.context_text = context_text.into();
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }
}

/// Outcome of exactly one [`ChatRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatResult {
    Answer(String),
    Failure {
        kind: ErrorKind,
        display_text: String,
    },
}

impl ChatResult {
    pub fn answer(text: impl Into<String>) -> Self {
        Self::Answer(text.into())
    }

    pub fn failure(kind: ErrorKind) -> Self {
        Self::Failure {
            kind,
            display_text: kind.display_text().to_string(),
        }
    }

    pub fn is_answer(&self) -> bool {
        matches!(self, Self::Answer(_))
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Answer(_) => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }

    /// The text a UI should render for this result.
    pub fn display_text(&self) -> &str {
        match self {
            Self::Answer(text) => text,
            Self::Failure { display_text, .. } => display_text,
        }
    }
}

/// Keeps the first `max_chars` characters of `text`.
pub fn truncate_context(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
