//! Completion transport trait and reqwest-based HTTP implementation.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderValue};

use crate::{ApiRequest, Credential, TransportError};

pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Status and raw body of whatever the endpoint answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }
}

/// Performs exactly one network call per invocation. No retries here.
pub trait CompletionTransport: Send + Sync + std::fmt::Debug {
    fn post<'a>(
        &'a self,
        endpoint: &'a str,
        payload: &'a ApiRequest,
        credential: &'a Credential,
        timeout: Duration,
    ) -> ProviderFuture<'a, Result<HttpReply, TransportError>>;
}

#[derive(Debug, Clone)]
pub struct HttpCompletionTransport {
    client: Client,
}

impl HttpCompletionTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpCompletionTransport {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

impl CompletionTransport for HttpCompletionTransport {
    fn post<'a>(
        &'a self,
        endpoint: &'a str,
        payload: &'a ApiRequest,
        credential: &'a Credential,
        timeout: Duration,
    ) -> ProviderFuture<'a, Result<HttpReply, TransportError>> {
        Box::pin(async move {
            let response = self
                .client
                .post(endpoint)
                .header(ACCEPT, HeaderValue::from_static("application/json"))
                .bearer_auth(credential.expose())
                .timeout(timeout)
                .json(payload)
                .send()
                .await
                .map_err(classify_reqwest_error)?;

            let status = response.status().as_u16();
            let body = response.text().await.map_err(classify_reqwest_error)?;

            Ok(HttpReply { status, body })
        })
    }
}

fn classify_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::timeout(err.to_string());
    }

    if is_connection_reset(&err) {
        return TransportError::connection_reset(err.to_string());
    }

    TransportError::other(err.to_string())
}

fn is_connection_reset(err: &(dyn StdError + 'static)) -> bool {
    let mut source = Some(err);
    while let Some(current) = source {
        if let Some(io_err) = current.downcast_ref::<std::io::Error>() {
            if io_err.kind() == std::io::ErrorKind::ConnectionReset {
                return true;
            }
        }
        source = current.source();
    }

    false
}
