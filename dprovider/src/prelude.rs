//! Common `dprovider` imports for downstream crates.

pub use crate::{
    ChatRequest, ChatResult, ClientConfig, CompletionClient, CompletionHooks, CompletionTransport,
    Credential, Delay, ErrorKind, HttpCompletionTransport, NoopCompletionHooks, TokioDelay,
};
pub use dcommon::BoxFuture;
