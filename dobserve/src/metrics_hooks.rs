//! Metrics-based observability hooks for completion attempts and session lifecycle.
//!
//! ```rust
//! use dobserve::MetricsObservabilityHooks;
//! use dchat::SessionHooks;
//!
//! fn accepts_session_hooks(_hooks: &dyn SessionHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_session_hooks(&hooks);
//! ```

use std::time::Duration;

use dchat::{ChatError, SessionHooks, SessionState, UiEvent};
use dcommon::SessionId;
use dprovider::{CompletionHooks, ErrorKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl CompletionHooks for MetricsObservabilityHooks {
    fn on_attempt_start(&self, model: &str, _attempt: u32, _delay: Duration) {
        metrics::counter!(
            "deepcoder_completion_attempt_start_total",
            "model" => model.to_string()
        )
        .increment(1);
    }

    fn on_retry_scheduled(&self, model: &str, _attempt: u32, next_delay: Duration) {
        metrics::counter!(
            "deepcoder_completion_retry_scheduled_total",
            "model" => model.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "deepcoder_completion_retry_delay_seconds",
            "model" => model.to_string()
        )
        .record(next_delay.as_secs_f64());
    }

    fn on_success(&self, model: &str, attempts: u32) {
        metrics::counter!(
            "deepcoder_completion_success_total",
            "model" => model.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "deepcoder_completion_attempts_per_success",
            "model" => model.to_string()
        )
        .record(attempts as f64);
    }

    fn on_failure(&self, model: &str, _attempts: u32, kind: ErrorKind, _detail: &str) {
        metrics::counter!(
            "deepcoder_completion_failure_total",
            "model" => model.to_string(),
            "error_kind" => kind.as_str()
        )
        .increment(1);
    }
}

impl SessionHooks for MetricsObservabilityHooks {
    fn on_submission_rejected(&self, _session: &SessionId) {
        metrics::counter!("deepcoder_session_rejected_submission_total").increment(1);
    }

    fn on_state_change(&self, _session: &SessionId, _from: SessionState, to: SessionState) {
        if to == SessionState::InFlight {
            metrics::counter!("deepcoder_session_in_flight_total").increment(1);
        }
    }

    fn on_credential_prompted(&self, _session: &SessionId, accepted: bool) {
        metrics::counter!(
            "deepcoder_session_credential_prompt_total",
            "accepted" => accepted.to_string()
        )
        .increment(1);
    }

    fn on_event_emitted(&self, _session: &SessionId, event: &UiEvent) {
        metrics::counter!(
            "deepcoder_session_ui_event_total",
            "type" => event.kind()
        )
        .increment(1);
    }

    fn on_collaborator_error(&self, _session: &SessionId, error: &ChatError) {
        metrics::counter!(
            "deepcoder_session_collaborator_error_total",
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
    }
}
