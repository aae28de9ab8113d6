//! Error types for the assistant API crate.

use std::fmt;

/// Errors from assistant API operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantApiError {
    /// The API could not be reached.
    Unavailable { reason: String },
    /// A request was rejected by the API.
    RequestFailed { status: u16, reason: String },
    /// A response could not be parsed.
    ResponseParse { reason: String },
    /// A request timed out.
    Timeout,
    /// The API rate-limited us.
    RateLimited,
}

impl fmt::Display for AssistantApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { reason } => {
                write!(f, "assistant API unavailable: {reason}")
            }
            Self::RequestFailed { status, reason } => {
                write!(f, "assistant API request failed ({status}): {reason}")
            }
            Self::ResponseParse { reason } => {
                write!(f, "failed to parse assistant API response: {reason}")
            }
            Self::Timeout => write!(f, "assistant API request timed out"),
            Self::RateLimited => write!(f, "assistant API rate limited"),
        }
    }
}

impl std::error::Error for AssistantApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_display() {
        let err = AssistantApiError::RequestFailed {
            status: 400,
            reason: "invalid assistant id".to_string(),
        };
        assert!(err.to_string().contains("400"));
        assert!(err.to_string().contains("invalid assistant id"));
    }

    #[test]
    fn unavailable_display() {
        let err = AssistantApiError::Unavailable {
            reason: "dns failure".to_string(),
        };
        assert!(err.to_string().contains("dns failure"));
    }
}
