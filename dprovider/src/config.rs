//! Endpoint, sampling, timeout, and backoff settings for one provider contract.

use std::time::Duration;

use crate::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "https://api.deepseek.com/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant";

/// Settings for [`crate::CompletionClient::complete`].
///
/// ```rust
/// use std::time::Duration;
/// use dprovider::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_model("deepseek-coder")
///     .with_timeout(Duration::from_secs(10));
///
/// assert_eq!(config.model, "deepseek-coder");
/// assert_eq!(config.max_retries, 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub backoff_multiplier: f64,
    pub max_context_length: usize,
    pub system_prompt: String,
    pub wrap_answer_in_code_fence: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 2048,
            temperature: 1.0,
            timeout: Duration::from_millis(30_000),
            max_retries: 3,
            initial_backoff: Duration::from_millis(1_000),
            backoff_multiplier: 2.0,
            max_context_length: 1_000,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            wrap_answer_in_code_fence: false,
        }
    }
}

impl ClientConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_backoff(mut self, initial_backoff: Duration) -> Self {
        self.initial_backoff = initial_backoff;
        self
    }

    pub fn with_backoff_multiplier(mut self, backoff_multiplier: f64) -> Self {
        self.backoff_multiplier = backoff_multiplier;
        self
    }

    pub fn with_max_context_length(mut self, max_context_length: usize) -> Self {
        self.max_context_length = max_context_length;
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn wrap_answer_in_code_fence(mut self, wrap: bool) -> Self {
        self.wrap_answer_in_code_fence = wrap;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::new("endpoint must not be empty"));
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::new("model must not be empty"));
        }

        if self.max_tokens == 0 {
            return Err(ConfigError::new("max_tokens must be greater than zero"));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::new(
                "temperature must be in the inclusive range 0.0..=2.0",
            ));
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::new("timeout must be greater than zero"));
        }

        if self.max_retries == 0 {
            return Err(ConfigError::new("max_retries must be at least one"));
        }

        if self.initial_backoff.is_zero() {
            return Err(ConfigError::new("initial_backoff must be greater than zero"));
        }

        if !(self.backoff_multiplier >= 1.0) {
            return Err(ConfigError::new("backoff_multiplier must be at least 1.0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_deepseek_contract() {
        let config = ClientConfig::default();

        assert_eq!(config.endpoint, "https://api.deepseek.com/chat/completions");
        assert_eq!(config.model, "deepseek-chat");
        assert_eq!(config.max_tokens, 2048);
        assert_eq!(config.temperature, 1.0);
        assert_eq!(config.timeout, Duration::from_millis(30_000));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.initial_backoff, Duration::from_millis(1_000));
        assert_eq!(config.backoff_multiplier, 2.0);
        assert_eq!(config.max_context_length, 1_000);
        assert!(!config.wrap_answer_in_code_fence);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_settings() {
        let cases = [
            ClientConfig::default().with_endpoint(" "),
            ClientConfig::default().with_model(""),
            ClientConfig::default().with_max_tokens(0),
            ClientConfig::default().with_temperature(2.5),
            ClientConfig::default().with_timeout(Duration::ZERO),
            ClientConfig::default().with_max_retries(0),
            ClientConfig::default().with_initial_backoff(Duration::ZERO),
            ClientConfig::default().with_backoff_multiplier(0.5),
            ClientConfig::default().with_backoff_multiplier(f64::NAN),
        ];

        for config in cases {
            assert!(config.validate().is_err(), "{config:?} should be rejected");
        }
    }
}
