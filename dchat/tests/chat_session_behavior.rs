use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use dchat::{
    ChatError, ChatErrorKind, ChatFuture, ChatSession, CredentialPrompt, EditorContextProvider,
    InMemorySecretStore, PromptOutcome, SecretStore, SessionHooks, SessionId, SessionOptions,
    SessionState, UiEvent, UiSink,
};
use dprovider::{
    ApiRequest, BoxFuture, CompletionClient, CompletionTransport, Credential, Delay, HttpReply,
    ProviderFuture, TransportError,
};

#[derive(Debug, Default)]
struct ScriptedTransport {
    replies: Mutex<VecDeque<HttpReply>>,
    requests: Mutex<Vec<(ApiRequest, String)>>,
}

impl ScriptedTransport {
    fn answering(replies: Vec<HttpReply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        })
    }

    fn calls(&self) -> usize {
        self.requests.lock().expect("requests lock").len()
    }
}

impl CompletionTransport for ScriptedTransport {
    fn post<'a>(
        &'a self,
        _endpoint: &'a str,
        payload: &'a ApiRequest,
        credential: &'a Credential,
        _timeout: Duration,
    ) -> ProviderFuture<'a, Result<HttpReply, TransportError>> {
        Box::pin(async move {
            self.requests
                .lock()
                .expect("requests lock")
                .push((payload.clone(), credential.expose().to_string()));

            self.replies
                .lock()
                .expect("replies lock")
                .pop_front()
                .ok_or_else(|| TransportError::other("script exhausted"))
        })
    }
}

#[derive(Debug, Default)]
struct InstantDelay;

impl Delay for InstantDelay {
    fn sleep<'a>(&'a self, _duration: Duration) -> BoxFuture<'a, ()> {
        Box::pin(async {})
    }
}

#[derive(Debug, Default)]
struct RecordingUi {
    events: Mutex<Vec<UiEvent>>,
}

impl RecordingUi {
    fn events(&self) -> Vec<UiEvent> {
        self.events.lock().expect("events lock").clone()
    }
}

impl UiSink for RecordingUi {
    fn emit(&self, event: UiEvent) -> Result<(), ChatError> {
        self.events.lock().expect("events lock").push(event);
        Ok(())
    }
}

#[derive(Debug)]
struct ScriptedPrompt {
    outcome: PromptOutcome,
    calls: Mutex<u32>,
}

impl ScriptedPrompt {
    fn new(outcome: PromptOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: Mutex::new(0),
        })
    }

    fn calls(&self) -> u32 {
        *self.calls.lock().expect("calls lock")
    }
}

impl CredentialPrompt for ScriptedPrompt {
    fn prompt<'a>(&'a self) -> ChatFuture<'a, PromptOutcome> {
        Box::pin(async move {
            *self.calls.lock().expect("calls lock") += 1;
            self.outcome.clone()
        })
    }
}

struct StaticEditor(String);

impl EditorContextProvider for StaticEditor {
    fn current_text<'a>(&'a self) -> ChatFuture<'a, String> {
        Box::pin(async move { self.0.clone() })
    }
}

struct BrokenSecretStore;

impl SecretStore for BrokenSecretStore {
    fn get<'a>(&'a self, _key: &'a str) -> ChatFuture<'a, Result<Option<Credential>, ChatError>> {
        Box::pin(async { Err(ChatError::secret_store("keychain unavailable")) })
    }

    fn store<'a>(
        &'a self,
        _key: &'a str,
        _credential: Credential,
    ) -> ChatFuture<'a, Result<(), ChatError>> {
        Box::pin(async { Err(ChatError::secret_store("keychain unavailable")) })
    }
}

#[derive(Default)]
struct RecordingHooks {
    transitions: Mutex<Vec<(SessionState, SessionState)>>,
    errors: Mutex<Vec<ChatErrorKind>>,
}

impl SessionHooks for RecordingHooks {
    fn on_state_change(&self, _session: &SessionId, from: SessionState, to: SessionState) {
        self.transitions
            .lock()
            .expect("transitions lock")
            .push((from, to));
    }

    fn on_collaborator_error(&self, _session: &SessionId, error: &ChatError) {
        self.errors.lock().expect("errors lock").push(error.kind);
    }
}

fn answer(content: &str) -> HttpReply {
    HttpReply::new(
        200,
        format!(r#"{{"choices":[{{"message":{{"content":"{content}"}}}}]}}"#),
    )
}

fn client(transport: Arc<ScriptedTransport>) -> CompletionClient {
    CompletionClient::new(transport).with_delay(Arc::new(InstantDelay))
}

fn stored_key() -> Arc<InMemorySecretStore> {
    Arc::new(InMemorySecretStore::new().with_secret("deepseekKey", Credential::new("sk-stored")))
}

#[tokio::test]
async fn answer_is_relayed_as_a_single_response_event() {
    let transport = ScriptedTransport::answering(vec![answer("42")]);
    let ui = Arc::new(RecordingUi::default());
    let prompt = ScriptedPrompt::new(PromptOutcome::Declined);
    let session = ChatSession::builder(
        client(transport.clone()),
        stored_key(),
        prompt.clone(),
        ui.clone(),
    )
        .editor(Arc::new(StaticEditor("fn answer() -> u8 { 42 }".to_string())))
        .build();

    let emitted = session.handle_user_message("what does this return?").await;

    assert_eq!(emitted, Some(UiEvent::response("42")));
    assert_eq!(ui.events(), vec![UiEvent::response("42")]);
    assert_eq!(prompt.calls(), 0);
    assert_eq!(session.state(), SessionState::Idle);

    let requests = transport.requests.lock().expect("requests lock");
    let (payload, key) = &requests[0];
    assert_eq!(key, "sk-stored");
    assert_eq!(payload.messages[1].content, "fn answer() -> u8 { 42 }");
    assert_eq!(payload.messages[2].content, "what does this return?");
}

#[tokio::test]
async fn blank_submissions_emit_nothing_and_call_nothing() {
    let transport = ScriptedTransport::answering(vec![answer("unused")]);
    let ui = Arc::new(RecordingUi::default());
    let prompt = ScriptedPrompt::new(PromptOutcome::Declined);
    let session = ChatSession::builder(
        client(transport.clone()),
        stored_key(),
        prompt.clone(),
        ui.clone(),
    )
        .build();

    for text in ["", "   ", "\n\t "] {
        assert_eq!(session.handle_user_message(text).await, None);
    }

    assert!(ui.events().is_empty());
    assert_eq!(transport.calls(), 0);
    assert_eq!(prompt.calls(), 0);
}

#[tokio::test]
async fn declined_prompt_emits_api_key_required_without_network() {
    let transport = ScriptedTransport::answering(vec![answer("unused")]);
    let ui = Arc::new(RecordingUi::default());
    let prompt = ScriptedPrompt::new(PromptOutcome::Declined);
    let session = ChatSession::builder(
        client(transport.clone()),
        Arc::new(InMemorySecretStore::new()),
        prompt.clone(),
        ui.clone(),
    )
    .build();

    let emitted = session.handle_user_message("hello").await;

    assert_eq!(emitted, Some(UiEvent::error("API key is required")));
    assert_eq!(ui.events(), vec![UiEvent::error("API key is required")]);
    assert_eq!(prompt.calls(), 1);
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn blank_prompt_entry_counts_as_declined() {
    let transport = ScriptedTransport::answering(vec![answer("unused")]);
    let ui = Arc::new(RecordingUi::default());
    let prompt = ScriptedPrompt::new(PromptOutcome::Entered(Credential::new("  ")));
    let session = ChatSession::builder(
        client(transport.clone()),
        Arc::new(InMemorySecretStore::new()),
        prompt,
        ui.clone(),
    )
    .build();

    session.handle_user_message("hello").await;

    assert_eq!(ui.events(), vec![UiEvent::error("API key is required")]);
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn prompted_key_is_stored_and_reused_for_later_submissions() {
    let transport = ScriptedTransport::answering(vec![answer("first"), answer("second")]);
    let ui = Arc::new(RecordingUi::default());
    let secrets = Arc::new(InMemorySecretStore::new());
    let prompt = ScriptedPrompt::new(PromptOutcome::Entered(Credential::new("sk-entered")));
    let session = ChatSession::builder(
        client(transport.clone()),
        secrets.clone(),
        prompt.clone(),
        ui.clone(),
    )
        .build();

    session.handle_user_message("one").await;
    session.handle_user_message("two").await;

    assert_eq!(prompt.calls(), 1);
    assert_eq!(
        ui.events(),
        vec![UiEvent::response("first"), UiEvent::response("second")]
    );

    let stored = secrets.get("deepseekKey").await.expect("store readable");
    assert_eq!(stored.map(|key| key.expose().to_string()), Some("sk-entered".to_string()));
}

#[tokio::test]
async fn completion_failures_become_error_events() {
    let transport = ScriptedTransport::answering(vec![HttpReply::new(200, "{}")]);
    let ui = Arc::new(RecordingUi::default());
    let session = ChatSession::builder(
        client(transport),
        stored_key(),
        ScriptedPrompt::new(PromptOutcome::Declined),
        ui.clone(),
    )
    .build();

    let emitted = session.handle_user_message("hello").await;

    assert_eq!(emitted, Some(UiEvent::error("server busy, try again")));
    assert_eq!(ui.events(), vec![UiEvent::error("server busy, try again")]);
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn state_machine_walks_through_credential_and_flight() {
    let transport = ScriptedTransport::answering(vec![answer("ok")]);
    let hooks = Arc::new(RecordingHooks::default());
    let session = ChatSession::builder(
        client(transport),
        Arc::new(InMemorySecretStore::new()),
        ScriptedPrompt::new(PromptOutcome::Entered(Credential::new("sk-new"))),
        Arc::new(RecordingUi::default()),
    )
    .hooks(hooks.clone())
    .build();

    session.handle_user_message("hello").await;

    let transitions = hooks.transitions.lock().expect("transitions lock").clone();
    assert_eq!(
        transitions,
        vec![
            (SessionState::Idle, SessionState::AwaitingCredential),
            (SessionState::AwaitingCredential, SessionState::InFlight),
            (SessionState::InFlight, SessionState::Responded),
            (SessionState::Responded, SessionState::Idle),
        ]
    );
}

#[tokio::test]
async fn thinking_status_precedes_the_terminal_event_when_enabled() {
    let transport = ScriptedTransport::answering(vec![answer("done")]);
    let ui = Arc::new(RecordingUi::default());
    let session = ChatSession::builder(
        client(transport),
        stored_key(),
        ScriptedPrompt::new(PromptOutcome::Declined),
        ui.clone(),
    )
    .options(SessionOptions::default().with_thinking_status("Thinking..."))
    .build();

    session.handle_user_message("hello").await;

    assert_eq!(
        ui.events(),
        vec![UiEvent::status("Thinking..."), UiEvent::response("done")]
    );
}

#[tokio::test]
async fn secret_store_failures_fall_back_to_prompt_and_are_reported() {
    let transport = ScriptedTransport::answering(vec![answer("still works")]);
    let ui = Arc::new(RecordingUi::default());
    let hooks = Arc::new(RecordingHooks::default());
    let session = ChatSession::builder(
        client(transport),
        Arc::new(BrokenSecretStore),
        ScriptedPrompt::new(PromptOutcome::Entered(Credential::new("sk-typed"))),
        ui.clone(),
    )
    .hooks(hooks.clone())
    .build();

    session.handle_user_message("hello").await;

    assert_eq!(ui.events(), vec![UiEvent::response("still works")]);
    assert_eq!(
        *hooks.errors.lock().expect("errors lock"),
        vec![ChatErrorKind::SecretStore, ChatErrorKind::SecretStore]
    );
}

#[tokio::test]
async fn inbound_json_is_decoded_and_dispatched() {
    let transport = ScriptedTransport::answering(vec![answer("from panel")]);
    let ui = Arc::new(RecordingUi::default());
    let session = ChatSession::builder(
        client(transport.clone()),
        stored_key(),
        ScriptedPrompt::new(PromptOutcome::Declined),
        ui.clone(),
    )
    .build();

    let emitted = session
        .handle_inbound(r#"{"type":"sendMessage","text":"hi","apiKey":"sk-from-webview"}"#)
        .await
        .expect("valid message");
    assert_eq!(emitted, Some(UiEvent::response("from panel")));

    let requests = transport.requests.lock().expect("requests lock");
    assert_eq!(requests[0].1, "sk-stored");
    drop(requests);

    let error = session
        .handle_inbound(r#"{"type":"unknown"}"#)
        .await
        .expect_err("invalid message");
    assert_eq!(error.kind, ChatErrorKind::InvalidMessage);
    assert_eq!(ui.events().len(), 1);
}
