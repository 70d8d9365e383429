//! Tracing-based observability hooks for completion attempts and session lifecycle.
//!
//! ```rust
//! use dobserve::TracingObservabilityHooks;
//! use dprovider::CompletionHooks;
//!
//! fn accepts_completion_hooks(_hooks: &dyn CompletionHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_completion_hooks(&hooks);
//! ```

use std::time::Duration;

use dchat::{ChatError, SessionHooks, SessionState, UiEvent};
use dcommon::SessionId;
use dprovider::{CompletionHooks, ErrorKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl CompletionHooks for TracingObservabilityHooks {
    fn on_attempt_start(&self, model: &str, attempt: u32, delay: Duration) {
        tracing::info!(
            phase = "completion",
            event = "attempt_start",
            model,
            attempt,
            delay_ms = delay.as_millis() as u64
        );
    }

    fn on_retry_scheduled(&self, model: &str, attempt: u32, next_delay: Duration) {
        tracing::warn!(
            phase = "completion",
            event = "retry_scheduled",
            model,
            attempt,
            delay_ms = next_delay.as_millis() as u64,
            error_kind = %ErrorKind::RateLimited
        );
    }

    fn on_success(&self, model: &str, attempts: u32) {
        tracing::info!(phase = "completion", event = "success", model, attempts);
    }

    fn on_failure(&self, model: &str, attempts: u32, kind: ErrorKind, detail: &str) {
        tracing::error!(
            phase = "completion",
            event = "failure",
            model,
            attempts,
            error_kind = %kind,
            error = detail
        );
    }
}

impl SessionHooks for TracingObservabilityHooks {
    fn on_submission_rejected(&self, session: &SessionId) {
        tracing::debug!(
            phase = "session",
            event = "submission_rejected",
            session_id = %session
        );
    }

    fn on_state_change(&self, session: &SessionId, from: SessionState, to: SessionState) {
        tracing::debug!(
            phase = "session",
            event = "state_change",
            session_id = %session,
            from = ?from,
            to = ?to
        );
    }

    fn on_credential_prompted(&self, session: &SessionId, accepted: bool) {
        tracing::info!(
            phase = "session",
            event = "credential_prompted",
            session_id = %session,
            accepted
        );
    }

    fn on_event_emitted(&self, session: &SessionId, event: &UiEvent) {
        tracing::info!(
            phase = "session",
            event = "ui_event",
            session_id = %session,
            ui_event = event.kind()
        );
    }

    fn on_collaborator_error(&self, session: &SessionId, error: &ChatError) {
        tracing::warn!(
            phase = "session",
            event = "collaborator_error",
            session_id = %session,
            error_kind = ?error.kind,
            error = %error
        );
    }
}
