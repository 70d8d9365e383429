//! Mediation between a chat panel UI and the completion client.

mod collaborators;
mod error;
mod protocol;
mod session;

pub mod prelude {
    pub use crate::{
        ChatError, ChatErrorKind, ChatSession, ChatSessionBuilder, CredentialPrompt,
        EditorContextProvider, InMemorySecretStore, InboundMessage, NoopSessionHooks,
        PromptOutcome, SecretStore, SessionHooks, SessionOptions, SessionState, UiEvent, UiSink,
    };
    pub use dcommon::SessionId;
}

pub use collaborators::{
    ChatFuture, CredentialPrompt, EditorContextProvider, InMemorySecretStore, NoEditorContext,
    PromptOutcome, SecretStore, UiSink, UnboundedUiSink,
};
pub use error::{ChatError, ChatErrorKind};
pub use protocol::{InboundMessage, UiEvent};
pub use session::{
    ChatSession, ChatSessionBuilder, DEFAULT_CREDENTIAL_KEY, NoopSessionHooks, SessionHooks,
    SessionOptions, SessionState,
};
pub use dcommon::SessionId;
