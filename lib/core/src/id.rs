//! Identifier types for domain entities.
//!
//! Assistants, threads, runs, and thread messages are owned by the external
//! assistant API; their identifiers are opaque strings we never parse or
//! mint ourselves. Chat turns are ours, so `TurnId` uses ULID for both
//! uniqueness and temporal ordering in logs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Macro to generate a newtype around an opaque identifier issued by the
/// external assistant API.
macro_rules! define_external_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an identifier exactly as issued by the external API.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_external_id!(
    /// Opaque identifier for an external assistant persona.
    AssistantId
);

define_external_id!(
    /// Opaque identifier for an external conversation thread.
    ThreadId
);

define_external_id!(
    /// Opaque identifier for an external run.
    RunId
);

define_external_id!(
    /// Opaque identifier for a message stored in an external thread.
    ExternalMessageId
);

/// Unique identifier for one request through the conversation relay.
///
/// Minted locally per chat turn and attached to every log line the turn
/// produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnId(Ulid);

impl TurnId {
    /// Creates a new turn ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Returns the underlying ULID.
    #[must_use]
    pub const fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "turn_{}", self.0)
    }
}

impl FromStr for TurnId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ulid_str = s.strip_prefix("turn_").unwrap_or(s);
        Ulid::from_str(ulid_str).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_id_round_trips_verbatim() {
        let id = AssistantId::new("asst_abc123");
        assert_eq!(id.as_str(), "asst_abc123");
        assert_eq!(id.to_string(), "asst_abc123");
    }

    #[test]
    fn external_id_serde_is_transparent() {
        let id = ThreadId::new("thread_xyz");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"thread_xyz\"");
        let parsed: ThreadId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(id, parsed);
    }

    #[test]
    fn external_id_equality_and_hash() {
        use std::collections::HashSet;

        let a = RunId::new("run_1");
        let b = RunId::new("run_1");
        let c = RunId::new("run_2");
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        set.insert(c);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn turn_id_display_format() {
        let id = TurnId::new();
        assert!(id.to_string().starts_with("turn_"));
    }

    #[test]
    fn turn_id_parse_with_prefix() {
        let id = TurnId::new();
        let parsed: TurnId = id.to_string().parse().expect("should parse");
        assert_eq!(id, parsed);
    }

    #[test]
    fn turn_id_parse_without_prefix() {
        let ulid = Ulid::new();
        let id: TurnId = ulid.to_string().parse().expect("should parse");
        assert_eq!(id.as_ulid(), ulid);
    }
}
