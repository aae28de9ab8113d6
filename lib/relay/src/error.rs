//! Error types for the conversation relay.
//!
//! Every variant that interrupts a turn carries enough context (thread id,
//! run id, interrupted phase) for the caller to retry on the same thread.
//! The relay never converts a failure into a fabricated reply.

use crate::turn::TurnPhase;
use amber_dialer_assistant::{AssistantApiError, RunStatus};
use amber_dialer_core::{ExternalMessageId, RunId, Slug, ThreadId};
use amber_dialer_directory::DirectoryError;
use std::fmt;

/// Errors from relaying a chat turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// No assistant is mapped to the requested company slug. This is the
    /// caller addressing an unprovisioned demo, not a store failure.
    UnknownCompany { slug: Slug },
    /// The directory could not answer the slug lookup.
    Directory { source: DirectoryError },
    /// The assistant API failed mid-turn.
    Api {
        source: AssistantApiError,
        phase: TurnPhase,
        thread_id: Option<ThreadId>,
    },
    /// The run reached a terminal status other than completed.
    RunFailed {
        thread_id: ThreadId,
        run_id: RunId,
        status: RunStatus,
    },
    /// The polling budget ran out before the run reached a terminal status.
    RunTimedOut {
        thread_id: ThreadId,
        run_id: RunId,
        attempts: u32,
    },
    /// The run completed but no assistant reply newer than the run exists.
    MissingReply { thread_id: ThreadId, run_id: RunId },
    /// The reply message carries no text content.
    MalformedReply {
        thread_id: ThreadId,
        message_id: ExternalMessageId,
    },
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCompany { slug } => {
                write!(f, "no assistant mapped to company '{slug}'")
            }
            Self::Directory { source } => {
                write!(f, "directory lookup failed: {source}")
            }
            Self::Api {
                source,
                phase,
                thread_id,
            } => {
                write!(f, "assistant API failed during {phase}")?;
                if let Some(thread_id) = thread_id {
                    write!(f, " (thread {thread_id})")?;
                }
                write!(f, ": {source}")
            }
            Self::RunFailed {
                thread_id,
                run_id,
                status,
            } => {
                write!(f, "run {run_id} on thread {thread_id} ended {status}")
            }
            Self::RunTimedOut {
                thread_id,
                run_id,
                attempts,
            } => {
                write!(
                    f,
                    "run {run_id} on thread {thread_id} still not terminal after {attempts} checks"
                )
            }
            Self::MissingReply { thread_id, run_id } => {
                write!(
                    f,
                    "run {run_id} completed but no new assistant reply found on thread {thread_id}"
                )
            }
            Self::MalformedReply {
                thread_id,
                message_id,
            } => {
                write!(
                    f,
                    "reply {message_id} on thread {thread_id} has no text content"
                )
            }
        }
    }
}

impl std::error::Error for RelayError {}

impl RelayError {
    /// The thread the failed turn ran against, when one existed. Callers
    /// use it to resume the conversation after a retryable failure.
    #[must_use]
    pub fn thread_id(&self) -> Option<&ThreadId> {
        match self {
            Self::UnknownCompany { .. } | Self::Directory { .. } => None,
            Self::Api { thread_id, .. } => thread_id.as_ref(),
            Self::RunFailed { thread_id, .. }
            | Self::RunTimedOut { thread_id, .. }
            | Self::MissingReply { thread_id, .. }
            | Self::MalformedReply { thread_id, .. } => Some(thread_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_failed_display_names_identifiers() {
        let err = RelayError::RunFailed {
            thread_id: ThreadId::new("thread_1"),
            run_id: RunId::new("run_1"),
            status: RunStatus::Expired,
        };
        let text = err.to_string();
        assert!(text.contains("thread_1"));
        assert!(text.contains("run_1"));
        assert!(text.contains("expired"));
    }

    #[test]
    fn timed_out_exposes_thread_for_resume() {
        let err = RelayError::RunTimedOut {
            thread_id: ThreadId::new("thread_1"),
            run_id: RunId::new("run_1"),
            attempts: 25,
        };
        assert_eq!(err.thread_id(), Some(&ThreadId::new("thread_1")));
    }

    #[test]
    fn unknown_company_has_no_thread() {
        let err = RelayError::UnknownCompany {
            slug: Slug::normalize("ghost-co"),
        };
        assert_eq!(err.thread_id(), None);
    }
}
