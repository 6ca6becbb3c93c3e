//! Opaque session tokens.

use std::fmt;

use chrono::Utc;
use rand::Rng;
use serde::Serialize;

/// Upper bound (exclusive) for the random token component.
const RANDOM_SPAN: u64 = 10_000_000_000_000;

/// Opaque session identifier returned on login.
///
/// Not cryptographic: the value is the current epoch-millis timestamp
/// joined to a pseudo-random integer and carries no verifiable security
/// property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct SessionToken(String);

impl SessionToken {
    /// Issue a fresh token from the current time and a random component.
    pub fn issue() -> Self {
        let stamp = Utc::now().timestamp_millis();
        let nonce = rand::thread_rng().gen_range(0..RANDOM_SPAN);
        Self(format!("{stamp}-{nonce}"))
    }

    /// Borrow the token text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for SessionToken {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SessionToken> for String {
    fn from(value: SessionToken) -> Self {
        value.0
    }
}
