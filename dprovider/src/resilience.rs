//! Rate-limit backoff state, pre-attempt delays, and operational hook contracts.

use std::time::Duration;

use dcommon::BoxFuture;

use crate::{ClientConfig, ErrorKind};

/// Per-call retry budget. Created fresh for every `complete` call.
///
/// ```rust
/// use std::time::Duration;
/// use dprovider::{ClientConfig, RetryState};
///
/// let mut state = RetryState::new(&ClientConfig::default());
/// assert_eq!(state.current_delay, Duration::from_millis(1000));
///
/// assert!(state.record_rate_limited());
/// assert_eq!(state.attempts_remaining, 2);
/// assert_eq!(state.current_delay, Duration::from_millis(2000));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryState {
    pub attempts_remaining: u32,
    pub current_delay: Duration,
    multiplier: f64,
}

impl RetryState {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            attempts_remaining: config.max_retries,
            current_delay: config.initial_backoff,
            multiplier: config.backoff_multiplier,
        }
    }

    pub fn has_attempts(&self) -> bool {
        self.attempts_remaining > 0
    }

    /// Consumes one attempt and grows the delay. Returns whether another attempt remains.
    pub fn record_rate_limited(&mut self) -> bool {
        self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
        let grown = self.current_delay.as_secs_f64() * self.multiplier;
        self.current_delay = Duration::try_from_secs_f64(grown).unwrap_or(Duration::MAX);
        self.has_attempts()
    }
}

/// Suspends before each attempt. Swappable so tests do not sleep for real.
pub trait Delay: Send + Sync {
    fn sleep<'a>(&'a self, duration: Duration) -> BoxFuture<'a, ()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TokioDelay;

impl Delay for TokioDelay {
    fn sleep<'a>(&'a self, duration: Duration) -> BoxFuture<'a, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// Lifecycle callbacks for one `complete` call. `detail` never contains the credential.
pub trait CompletionHooks: Send + Sync {
    fn on_attempt_start(&self, _model: &str, _attempt: u32, _delay: Duration) {}

    fn on_retry_scheduled(&self, _model: &str, _attempt: u32, _next_delay: Duration) {}

    fn on_success(&self, _model: &str, _attempts: u32) {}

    fn on_failure(&self, _model: &str, _attempts: u32, _kind: ErrorKind, _detail: &str) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCompletionHooks;

impl CompletionHooks for NoopCompletionHooks {}
