//! Completion client: one request, pre-attempt throttling, 429 backoff, total result.

use std::sync::Arc;

use crate::serde_api::{build_api_request, parse_answer};
use crate::{
    ChatRequest, ChatResult, ClientConfig, CompletionHooks, CompletionTransport, Credential,
    Delay, ErrorKind, NoopCompletionHooks, RetryState, TokioDelay,
};

#[derive(Clone)]
pub struct CompletionClient {
    transport: Arc<dyn CompletionTransport>,
    delay: Arc<dyn Delay>,
    hooks: Arc<dyn CompletionHooks>,
}

impl CompletionClient {
    pub fn new(transport: Arc<dyn CompletionTransport>) -> Self {
        Self {
            transport,
            delay: Arc::new(TokioDelay),
            hooks: Arc::new(NoopCompletionHooks),
        }
    }

    pub fn with_delay(mut self, delay: Arc<dyn Delay>) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn CompletionHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Runs one completion. Never panics on remote failure and never returns an error:
    /// every outcome is a [`ChatResult`].
    ///
    /// Every attempt, including the first, is preceded by the current backoff delay.
    /// Only HTTP 429 is retried.
    pub async fn complete(
        &self,
        request: &ChatRequest,
        credential: Option<&Credential>,
        config: &ClientConfig,
    ) -> ChatResult {
        let Some(credential) = credential.filter(|credential| !credential.is_empty()) else {
            return self.fail(
                &config.model,
                0,
                ErrorKind::MissingCredential,
                "no API key available",
            );
        };

        if request.user_text.trim().is_empty() {
            return self.fail(
                &config.model,
                0,
                ErrorKind::UpstreamError,
                "user text must not be empty",
            );
        }

        if let Err(err) = config.validate() {
            return self.fail(&config.model, 0, ErrorKind::UpstreamError, &err.to_string());
        }

        let payload = build_api_request(request, config);
        let model = payload.model.as_str();
        let mut retry = RetryState::new(config);
        let mut attempt = 0;

        while retry.has_attempts() {
            attempt += 1;
            self.hooks.on_attempt_start(model, attempt, retry.current_delay);
            self.delay.sleep(retry.current_delay).await;

            let reply = match self
                .transport
                .post(&config.endpoint, &payload, credential, config.timeout)
                .await
            {
                Ok(reply) => reply,
                Err(err) => return self.fail(model, attempt, err.error_kind(), &err.to_string()),
            };

            if reply.is_rate_limited() {
                if retry.record_rate_limited() {
                    self.hooks.on_retry_scheduled(model, attempt, retry.current_delay);
                }
                continue;
            }

            if !reply.is_success() {
                let detail = format!("endpoint answered with status {}", reply.status);
                return self.fail(model, attempt, ErrorKind::UpstreamError, &detail);
            }

            return match parse_answer(&reply.body) {
                Ok(content) => {
                    self.hooks.on_success(model, attempt);
                    ChatResult::Answer(render_answer(content, config))
                }
                Err((kind, detail)) => self.fail(model, attempt, kind, &detail),
            };
        }

        self.fail(model, attempt, ErrorKind::RateLimited, "retry budget exhausted")
    }

    fn fail(&self, model: &str, attempts: u32, kind: ErrorKind, detail: &str) -> ChatResult {
        self.hooks.on_failure(model, attempts, kind, detail);
        ChatResult::failure(kind)
    }
}

fn render_answer(content: String, config: &ClientConfig) -> String {
    if config.wrap_answer_in_code_fence {
        format!("```\n{content}\n```")
    } else {
        content
    }
}

impl std::fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionClient")
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}
