//! Error types for the directory crate.
//!
//! Absence of a mapping is not an error: lookups return `Option`. The
//! variants here all describe problems talking to the backing store, so
//! callers can distinguish "unknown company" from "store unreachable".

use std::fmt;

/// Errors from directory storage operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// The backing store could not be reached.
    StoreUnavailable { reason: String },
    /// The store rejected a command.
    RequestFailed { status: u16, reason: String },
    /// The store replied with something we could not interpret.
    MalformedResponse { reason: String },
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StoreUnavailable { reason } => {
                write!(f, "directory store unavailable: {reason}")
            }
            Self::RequestFailed { status, reason } => {
                write!(f, "directory store rejected command ({status}): {reason}")
            }
            Self::MalformedResponse { reason } => {
                write!(f, "malformed directory store response: {reason}")
            }
        }
    }
}

impl std::error::Error for DirectoryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_unavailable_display() {
        let err = DirectoryError::StoreUnavailable {
            reason: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("unavailable"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn request_failed_display() {
        let err = DirectoryError::RequestFailed {
            status: 401,
            reason: "bad token".to_string(),
        };
        assert!(err.to_string().contains("401"));
    }
}
