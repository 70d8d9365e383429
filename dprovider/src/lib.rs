//! Chat-completion client for a single OpenAI-compatible provider contract.
//!
//! [`CompletionClient::complete`] is total: every transport or API failure is
//! folded into a [`ChatResult::Failure`] carrying a user-displayable message.
//!
//! ```rust
//! use dprovider::{ChatResult, ClientConfig, ErrorKind};
//!
//! let config = ClientConfig::default().with_max_retries(5);
//! assert_eq!(config.max_context_length, 1000);
//!
//! let failure = ChatResult::failure(ErrorKind::RateLimited);
//! assert_eq!(failure.display_text(), "server busy, try again");
//! ```

mod client;
mod config;
mod credentials;
mod error;
mod model;
mod resilience;
mod serde_api;
mod transport;

pub mod prelude;

pub use client::CompletionClient;
pub use config::ClientConfig;
pub use credentials::Credential;
pub use error::{ConfigError, ErrorKind, TransportError, TransportErrorKind};
pub use model::{
    BUSY_MESSAGE, ChatRequest, ChatResult, MISSING_CREDENTIAL_MESSAGE, Message, Role,
    truncate_context,
};
pub use resilience::{CompletionHooks, Delay, NoopCompletionHooks, RetryState, TokioDelay};
pub use serde_api::{ApiMessage, ApiRequest};
pub use transport::{CompletionTransport, HttpCompletionTransport, HttpReply, ProviderFuture};

pub use dcommon::BoxFuture;
