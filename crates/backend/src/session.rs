use std::fmt::{self, Display};

use chrono::Utc;

/// Identifies the conversation memory kept by the backend.
///
/// The identifier is generated on the client side, once per
/// conversation. It's unique enough for the backend to scope its memory,
/// but it's not guaranteed to be globally unique.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generates a new identifier from the current time.
    #[inline]
    pub fn generate() -> Self {
        Self(format!("user_{}", Utc::now().timestamp_millis()))
    }

    /// Returns the identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionId {
    #[inline]
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SessionId {
    #[inline]
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
