//! Session and caller identifier types.

use std::fmt;
use std::str::FromStr;

/// Identifier of a chat session.
///
/// A session is keyed by the transport's chat identifier, so the same
/// chat always maps to the same session for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(i64);

impl SessionId {
    /// Create a SessionId from a raw chat identifier.
    pub const fn from_raw(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw chat identifier.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chat-{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("chat-").unwrap_or(s).parse().map(SessionId)
    }
}

/// Identifier of the user who sent a message or pressed a button.
///
/// Displayed as the bare number, since it is embedded verbatim in
/// deep links and forwarded operator messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallerId(u64);

impl CallerId {
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_display_format() {
        assert_eq!(SessionId::from_raw(42).to_string(), "chat-42");
        assert_eq!(SessionId::from_raw(-100123).to_string(), "chat--100123");
        assert_eq!(CallerId::from_raw(42).to_string(), "42");
    }

    #[test]
    fn test_parse() {
        let id: SessionId = "chat-42".parse().unwrap();
        assert_eq!(id.as_i64(), 42);

        let id: SessionId = "-100123".parse().unwrap();
        assert_eq!(id.as_i64(), -100123);

        assert!("chat-abc".parse::<SessionId>().is_err());
        assert!("".parse::<SessionId>().is_err());
    }

    #[test]
    fn test_hash_eq() {
        let mut set = HashSet::new();
        set.insert(SessionId::from_raw(7));
        assert!(set.contains(&SessionId::from_raw(7)));
        assert!(!set.contains(&SessionId::from_raw(8)));
    }
}
