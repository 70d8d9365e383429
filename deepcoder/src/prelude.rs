//! Common imports for most deepcoder hosts.

pub use crate::{
    ChatError, ChatResult, ChatSession, ClientBuildConfig, ClientConfig, CompletionClient,
    Credential, CredentialPrompt, EditorContextProvider, ErrorKind, InMemorySecretStore,
    PromptOutcome, SecretStore, SessionOptions, SessionParts, UiEvent, UiSink,
    build_chat_session, build_completion_client, panel_channels, serve_panel,
};
