//! Failure taxonomy for completion calls and the errors transports report.
//!
//! ```rust
//! use dprovider::{ErrorKind, TransportError, TransportErrorKind};
//!
//! let reset = TransportError::connection_reset("socket closed by peer");
//! assert_eq!(reset.kind, TransportErrorKind::ConnectionReset);
//! assert_eq!(ErrorKind::MissingCredential.display_text(), "API key is required");
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::model::{BUSY_MESSAGE, MISSING_CREDENTIAL_MESSAGE};

/// Classification carried by every failed completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingCredential,
    ConnectionReset,
    RateLimited,
    MalformedResponse,
    UpstreamError,
}

impl ErrorKind {
    /// Message shown to the end user for this kind of failure.
    pub fn display_text(self) -> &'static str {
        match self {
            Self::MissingCredential => MISSING_CREDENTIAL_MESSAGE,
            Self::ConnectionReset
            | Self::RateLimited
            | Self::MalformedResponse
            | Self::UpstreamError => BUSY_MESSAGE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::ConnectionReset => "connection_reset",
            Self::RateLimited => "rate_limited",
            Self::MalformedResponse => "malformed_response",
            Self::UpstreamError => "upstream_error",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    ConnectionReset,
    Timeout,
    Other,
}

/// Failure to obtain any HTTP reply at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn connection_reset(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::ConnectionReset, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Other, message)
    }

    /// Timeouts and everything unrecognised are upstream errors; only resets are distinct.
    pub fn error_kind(&self) -> ErrorKind {
        match self.kind {
            TransportErrorKind::ConnectionReset => ErrorKind::ConnectionReset,
            TransportErrorKind::Timeout | TransportErrorKind::Other => ErrorKind::UpstreamError,
        }
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for TransportError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid client config: {}", self.message)
    }
}

impl Error for ConfigError {}
