//! Stable construction surface: reqwest transport, tokio delay, tracing hooks.

use std::sync::Arc;

use reqwest::Client;

use crate::{
    ChatSession, ClientConfig, CompletionClient, ConfigError, CredentialPrompt,
    EditorContextProvider, HttpCompletionTransport, NoEditorContext, SafeCompletionHooks,
    SafeSessionHooks, SecretStore, SessionId, SessionOptions, TokioDelay,
    TracingObservabilityHooks, UiSink,
};

#[derive(Debug, Clone)]
pub struct ClientBuildConfig {
    pub client: ClientConfig,
    pub session_id: SessionId,
    pub options: SessionOptions,
}

impl Default for ClientBuildConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            session_id: SessionId::from("chat"),
            options: SessionOptions::default(),
        }
    }
}

impl ClientBuildConfig {
    pub fn new(client: ClientConfig) -> Self {
        Self {
            client,
            ..Self::default()
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<SessionId>) -> Self {
        self.session_id = session_id.into();
        self
    }

    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }
}

/// Host collaborators a chat session needs.
pub struct SessionParts {
    pub secrets: Arc<dyn SecretStore>,
    pub prompt: Arc<dyn CredentialPrompt>,
    pub editor: Option<Arc<dyn EditorContextProvider>>,
    pub ui: Arc<dyn UiSink>,
}

/// Builds a client whose HTTP transport enforces `config.timeout`.
pub fn build_completion_client(config: &ClientConfig) -> Result<CompletionClient, ConfigError> {
    config.validate()?;

    let http = Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|err| ConfigError::new(format!("failed to build HTTP client: {err}")))?;

    Ok(
        CompletionClient::new(Arc::new(HttpCompletionTransport::new(http)))
            .with_delay(Arc::new(TokioDelay))
            .with_hooks(Arc::new(SafeCompletionHooks::new(TracingObservabilityHooks))),
    )
}

pub fn build_chat_session(
    config: ClientBuildConfig,
    parts: SessionParts,
) -> Result<ChatSession, ConfigError> {
    let client = build_completion_client(&config.client)?;
    let editor = parts
        .editor
        .unwrap_or_else(|| Arc::new(NoEditorContext) as Arc<dyn EditorContextProvider>);

    tracing::debug!(
        session_id = %config.session_id,
        endpoint = config.client.endpoint.as_str(),
        model = config.client.model.as_str(),
        "building chat session"
    );

    Ok(ChatSession::builder(client, parts.secrets, parts.prompt, parts.ui)
        .id(config.session_id)
        .config(config.client)
        .options(config.options)
        .editor(editor)
        .hooks(Arc::new(SafeSessionHooks::new(TracingObservabilityHooks)))
        .build())
}
