//! API key handling with secure memory.
//!
//! Uses the `secrecy` crate so provider keys never end up in logs,
//! debug output or serialized config dumps.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// A provider API key that won't be logged or displayed.
pub struct ApiKey(SecretBox<str>);

impl ApiKey {
    /// Wrap a key.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Wrap a key, treating blank input as "no key".
    ///
    /// Environment variables are frequently present but empty; those must
    /// behave exactly like an unset variable.
    pub fn non_empty(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self::new(trimmed))
        }
    }

    /// Expose the key for use in a request header.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for ApiKey {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<&str> for ApiKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_not_in_debug_or_display() {
        let key = ApiKey::new("serper-live-123");
        assert_eq!(format!("{:?}", key), "[REDACTED]");
        assert_eq!(format!("{}", key), "[REDACTED]");
        assert_eq!(key.expose(), "serper-live-123");
    }

    #[test]
    fn test_blank_key_is_absent() {
        assert!(ApiKey::non_empty("").is_none());
        assert!(ApiKey::non_empty("   ").is_none());
        assert_eq!(ApiKey::non_empty(" abc ").unwrap().expose(), "abc");
    }
}
