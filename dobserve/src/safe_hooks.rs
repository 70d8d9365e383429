use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use dchat::{ChatError, SessionHooks, SessionState, UiEvent};
use dcommon::SessionId;
use dprovider::{CompletionHooks, ErrorKind};

pub struct SafeCompletionHooks<H> {
    inner: H,
}

impl<H> SafeCompletionHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> CompletionHooks for SafeCompletionHooks<H>
where
    H: CompletionHooks,
{
    fn on_attempt_start(&self, model: &str, attempt: u32, delay: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_attempt_start(model, attempt, delay)
        }));
    }

    fn on_retry_scheduled(&self, model: &str, attempt: u32, next_delay: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_retry_scheduled(model, attempt, next_delay)
        }));
    }

    fn on_success(&self, model: &str, attempts: u32) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_success(model, attempts)));
    }

    fn on_failure(&self, model: &str, attempts: u32, kind: ErrorKind, detail: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_failure(model, attempts, kind, detail)
        }));
    }
}

pub struct SafeSessionHooks<H> {
    inner: H,
}

impl<H> SafeSessionHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> SessionHooks for SafeSessionHooks<H>
where
    H: SessionHooks,
{
    fn on_submission_rejected(&self, session: &SessionId) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_submission_rejected(session)
        }));
    }

    fn on_state_change(&self, session: &SessionId, from: SessionState, to: SessionState) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_state_change(session, from, to)
        }));
    }

    fn on_credential_prompted(&self, session: &SessionId, accepted: bool) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_credential_prompted(session, accepted)
        }));
    }

    fn on_event_emitted(&self, session: &SessionId, event: &UiEvent) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_event_emitted(session, event)
        }));
    }

    fn on_collaborator_error(&self, session: &SessionId, error: &ChatError) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_collaborator_error(session, error)
        }));
    }
}
