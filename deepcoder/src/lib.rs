//! Unified facade over the deepcoder workspace crates.
//!
//! Most hosts only need this crate: it re-exports the completion client, the
//! chat session, and the observability hooks, and wires them with sensible
//! defaults.

pub mod panel;
pub mod prelude;
pub mod runtime;

pub use dchat;
pub use dcommon;
pub use dobserve;
pub use dprovider;

pub use dchat::{
    ChatError, ChatErrorKind, ChatFuture, ChatSession, ChatSessionBuilder, CredentialPrompt,
    EditorContextProvider, InMemorySecretStore, InboundMessage, NoEditorContext,
    NoopSessionHooks, PromptOutcome, SecretStore, SessionHooks, SessionOptions, SessionState,
    UiEvent, UiSink, UnboundedUiSink,
};
pub use dcommon::{BoxFuture, SessionId};
pub use dobserve::{
    MetricsObservabilityHooks, SafeCompletionHooks, SafeSessionHooks, TracingObservabilityHooks,
};
pub use dprovider::{
    ChatRequest, ChatResult, ClientConfig, CompletionClient, CompletionHooks,
    CompletionTransport, ConfigError, Credential, Delay, ErrorKind, HttpCompletionTransport,
    NoopCompletionHooks, RetryState, TokioDelay, TransportError,
};

pub use panel::{PanelChannels, panel_channels, serve_panel};
pub use runtime::{ClientBuildConfig, SessionParts, build_chat_session, build_completion_client};
