//! Redacting, zero-on-drop holder for the provider API key.

use std::fmt::{Debug, Formatter};

/// The API key used to authenticate against the chat endpoint.
///
/// `Debug` never prints the value and the buffer is zeroed when dropped.
///
/// ```rust
/// use dprovider::Credential;
///
/// let key = Credential::new("sk-secret");
/// assert_eq!(format!("{key:?}"), "Credential([REDACTED])");
/// assert_eq!(key.expose(), "sk-secret");
/// ```
#[derive(PartialEq, Eq)]
pub struct Credential {
    value: String,
}

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Builds a credential from user input, rejecting blank entries.
    pub fn from_input(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }

        Some(Self::new(trimmed))
    }

    pub fn expose(&self) -> &str {
        self.value.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

impl Clone for Credential {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

impl Drop for Credential {
    fn drop(&mut self) {
        // Zero bytes keep the buffer valid UTF-8.
        unsafe {
            self.value.as_mut_vec().fill(0);
        }
    }
}
