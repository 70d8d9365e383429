//! Contracts for the host-side collaborators a chat session depends on.

use std::collections::HashMap;
use std::sync::Mutex;

use dcommon::BoxFuture;
use dprovider::Credential;
use tokio::sync::mpsc::UnboundedSender;

use crate::{ChatError, UiEvent};

pub type ChatFuture<'a, T> = BoxFuture<'a, T>;

/// Sole persistence of the API key.
pub trait SecretStore: Send + Sync {
    fn get<'a>(&'a self, key: &'a str) -> ChatFuture<'a, Result<Option<Credential>, ChatError>>;

    fn store<'a>(
        &'a self,
        key: &'a str,
        credential: Credential,
    ) -> ChatFuture<'a, Result<(), ChatError>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Entered(Credential),
    Declined,
}

/// Masked input asking the user for an API key.
pub trait CredentialPrompt: Send + Sync {
    fn prompt<'a>(&'a self) -> ChatFuture<'a, PromptOutcome>;
}

/// Text of the active editor document, or an empty string.
pub trait EditorContextProvider: Send + Sync {
    fn current_text<'a>(&'a self) -> ChatFuture<'a, String>;
}

pub trait UiSink: Send + Sync {
    fn emit(&self, event: UiEvent) -> Result<(), ChatError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoEditorContext;

impl EditorContextProvider for NoEditorContext {
    fn current_text<'a>(&'a self) -> ChatFuture<'a, String> {
        Box::pin(async { String::new() })
    }
}

#[derive(Debug, Default)]
pub struct InMemorySecretStore {
    secrets: Mutex<HashMap<String, Credential>>,
}

impl InMemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(self, key: impl Into<String>, credential: Credential) -> Self {
        if let Ok(mut secrets) = self.secrets.lock() {
            secrets.insert(key.into(), credential);
        }
        self
    }
}

impl SecretStore for InMemorySecretStore {
    fn get<'a>(&'a self, key: &'a str) -> ChatFuture<'a, Result<Option<Credential>, ChatError>> {
        Box::pin(async move {
            let secrets = self
                .secrets
                .lock()
                .map_err(|_| ChatError::secret_store("secret store lock poisoned"))?;

            Ok(secrets.get(key).cloned())
        })
    }

    fn store<'a>(
        &'a self,
        key: &'a str,
        credential: Credential,
    ) -> ChatFuture<'a, Result<(), ChatError>> {
        Box::pin(async move {
            let mut secrets = self
                .secrets
                .lock()
                .map_err(|_| ChatError::secret_store("secret store lock poisoned"))?;

            secrets.insert(key.to_string(), credential);
            Ok(())
        })
    }
}

/// Forwards events to a host event loop over an unbounded channel.
#[derive(Debug, Clone)]
pub struct UnboundedUiSink {
    sender: UnboundedSender<UiEvent>,
}

impl UnboundedUiSink {
    pub fn new(sender: UnboundedSender<UiEvent>) -> Self {
        Self { sender }
    }
}

impl UiSink for UnboundedUiSink {
    fn emit(&self, event: UiEvent) -> Result<(), ChatError> {
        self.sender
            .send(event)
            .map_err(|_| ChatError::ui("chat panel receiver was dropped"))
    }
}
