//! One chat panel session: a submission in, exactly one terminal UI event out.

use std::sync::{Arc, Mutex, PoisonError};

use dcommon::SessionId;
use dprovider::{
    ChatRequest, ChatResult, ClientConfig, CompletionClient, Credential,
    MISSING_CREDENTIAL_MESSAGE,
};

use crate::{
    ChatError, CredentialPrompt, EditorContextProvider, InboundMessage, NoEditorContext,
    PromptOutcome, SecretStore, UiEvent, UiSink,
};

pub const DEFAULT_CREDENTIAL_KEY: &str = "deepseekKey";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingCredential,
    InFlight,
    Responded,
    Errored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub credential_key: String,
    pub thinking_status: Option<String>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            credential_key: DEFAULT_CREDENTIAL_KEY.to_string(),
            thinking_status: None,
        }
    }
}

impl SessionOptions {
    pub fn with_credential_key(mut self, key: impl Into<String>) -> Self {
        self.credential_key = key.into();
        self
    }

    /// Emits a non-terminal status event when a request goes in flight.
    pub fn with_thinking_status(mut self, text: impl Into<String>) -> Self {
        self.thinking_status = Some(text.into());
        self
    }
}

pub trait SessionHooks: Send + Sync {
    fn on_submission_rejected(&self, _session: &SessionId) {}

    fn on_state_change(&self, _session: &SessionId, _from: SessionState, _to: SessionState) {}

    fn on_credential_prompted(&self, _session: &SessionId, _accepted: bool) {}

    fn on_event_emitted(&self, _session: &SessionId, _event: &UiEvent) {}

    fn on_collaborator_error(&self, _session: &SessionId, _error: &ChatError) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSessionHooks;

impl SessionHooks for NoopSessionHooks {}

pub struct ChatSession {
    id: SessionId,
    client: CompletionClient,
    config: ClientConfig,
    options: SessionOptions,
    secrets: Arc<dyn SecretStore>,
    prompt: Arc<dyn CredentialPrompt>,
    editor: Arc<dyn EditorContextProvider>,
    ui: Arc<dyn UiSink>,
    hooks: Arc<dyn SessionHooks>,
    state: Mutex<SessionState>,
}

impl ChatSession {
    pub fn builder(
        client: CompletionClient,
        secrets: Arc<dyn SecretStore>,
        prompt: Arc<dyn CredentialPrompt>,
        ui: Arc<dyn UiSink>,
    ) -> ChatSessionBuilder {
        ChatSessionBuilder {
            id: SessionId::from("chat"),
            client,
            config: ClientConfig::default(),
            options: SessionOptions::default(),
            secrets,
            prompt,
            editor: Arc::new(NoEditorContext),
            ui,
            hooks: Arc::new(NoopSessionHooks),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Decodes one panel message and handles it as a submission.
    ///
    /// Undecodable input is an error and emits nothing.
    pub async fn handle_inbound(&self, raw: &str) -> Result<Option<UiEvent>, ChatError> {
        let message = InboundMessage::from_json(raw)?;
        Ok(self.handle_user_message(message.text()).await)
    }

    /// Handles one user submission and returns the terminal event it emitted.
    ///
    /// Blank text is dropped without a network call or any event.
    pub async fn handle_user_message(&self, text: &str) -> Option<UiEvent> {
        if text.trim().is_empty() {
            self.hooks.on_submission_rejected(&self.id);
            return None;
        }

        let context = self.editor.current_text().await;

        let Some(credential) = self.resolve_credential().await else {
            return Some(self.finish(
                UiEvent::error(MISSING_CREDENTIAL_MESSAGE),
                SessionState::Errored,
            ));
        };

        self.transition(SessionState::InFlight);
        if let Some(status) = &self.options.thinking_status {
            self.emit(UiEvent::status(status.clone()));
        }

        let request = ChatRequest::new(text)
            .with_context(context)
            .with_model(self.config.model.clone());

        let (event, state) = match self
            .client
            .complete(&request, Some(&credential), &self.config)
            .await
        {
            ChatResult::Answer(answer) => (UiEvent::response(answer), SessionState::Responded),
            ChatResult::Failure { display_text, .. } => {
                (UiEvent::error(display_text), SessionState::Errored)
            }
        };

        Some(self.finish(event, state))
    }

    async fn resolve_credential(&self) -> Option<Credential> {
        let key = self.options.credential_key.as_str();

        match self.secrets.get(key).await {
            Ok(Some(credential)) if !credential.is_empty() => return Some(credential),
            Ok(_) => {}
            Err(error) => self.hooks.on_collaborator_error(&self.id, &error),
        }

        self.transition(SessionState::AwaitingCredential);
        let credential = match self.prompt.prompt().await {
            PromptOutcome::Entered(credential) if !credential.is_empty() => credential,
            PromptOutcome::Entered(_) | PromptOutcome::Declined => {
                self.hooks.on_credential_prompted(&self.id, false);
                return None;
            }
        };

        self.hooks.on_credential_prompted(&self.id, true);
        if let Err(error) = self.secrets.store(key, credential.clone()).await {
            self.hooks.on_collaborator_error(&self.id, &error);
        }

        Some(credential)
    }

    fn finish(&self, event: UiEvent, state: SessionState) -> UiEvent {
        self.transition(state);
        self.emit(event.clone());
        self.transition(SessionState::Idle);
        event
    }

    fn emit(&self, event: UiEvent) {
        self.hooks.on_event_emitted(&self.id, &event);
        if let Err(error) = self.ui.emit(event) {
            self.hooks.on_collaborator_error(&self.id, &error);
        }
    }

    fn transition(&self, to: SessionState) {
        let from = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *state, to)
        };

        if from != to {
            self.hooks.on_state_change(&self.id, from, to);
        }
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("options", &self.options)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

pub struct ChatSessionBuilder {
    id: SessionId,
    client: CompletionClient,
    config: ClientConfig,
    options: SessionOptions,
    secrets: Arc<dyn SecretStore>,
    prompt: Arc<dyn CredentialPrompt>,
    editor: Arc<dyn EditorContextProvider>,
    ui: Arc<dyn UiSink>,
    hooks: Arc<dyn SessionHooks>,
}

impl ChatSessionBuilder {
    pub fn id(mut self, id: impl Into<SessionId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn editor(mut self, editor: Arc<dyn EditorContextProvider>) -> Self {
        self.editor = editor;
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn SessionHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn build(self) -> ChatSession {
        ChatSession {
            id: self.id,
            client: self.client,
            config: self.config,
            options: self.options,
            secrets: self.secrets,
            prompt: self.prompt,
            editor: self.editor,
            ui: self.ui,
            hooks: self.hooks,
            state: Mutex::new(SessionState::Idle),
        }
    }
}
