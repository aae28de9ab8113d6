//! Chat turn domain types.

use amber_dialer_core::{AssistantId, RunId, Slug, ThreadId, TurnId};
use std::fmt;

/// Phases of one chat turn through the relay.
///
/// A turn moves strictly forward; the terminal phases are `Completed`,
/// `Failed`, and `TimedOut`. Errors carry the phase they interrupted so
/// callers know how far the turn got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// No thread yet; one must be created or supplied.
    NeedThread,
    /// A thread exists for this turn.
    ThreadReady,
    /// The user message has been appended.
    MessageSent,
    /// A run has been started.
    RunCreated,
    /// Waiting on the run to reach a terminal status.
    Polling,
    /// The run finished and the reply was extracted.
    Completed,
    /// The run ended in a terminal failure status.
    Failed,
    /// The polling budget ran out before a terminal status.
    TimedOut,
}

impl TurnPhase {
    /// Returns true once the turn will not advance further.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::TimedOut)
    }

    /// Returns the phase name used in logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NeedThread => "need_thread",
            Self::ThreadReady => "thread_ready",
            Self::MessageSent => "message_sent",
            Self::RunCreated => "run_created",
            Self::Polling => "polling",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::TimedOut => "timed_out",
        }
    }
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whose assistant a chat turn is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatTarget {
    /// A concrete assistant identifier, as returned by provisioning.
    Assistant(AssistantId),
    /// A company slug to resolve through the directory.
    Company(Slug),
}

/// The prospect's side of a chat turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    /// A message to append to the thread before running.
    Message(String),
    /// Elicit the assistant's opening line; nothing is appended.
    Initialize,
}

impl ChatInput {
    /// Interprets optional request text: absent or blank text is the
    /// initialize turn.
    #[must_use]
    pub fn from_text(text: Option<&str>) -> Self {
        match text {
            Some(t) if !t.trim().is_empty() => Self::Message(t.to_string()),
            _ => Self::Initialize,
        }
    }

    /// Returns true for the initialize turn.
    #[must_use]
    pub fn is_initialize(&self) -> bool {
        matches!(self, Self::Initialize)
    }
}

/// A completed chat turn.
#[derive(Debug, Clone)]
pub struct ChatReply {
    /// Local identifier for this turn, for log correlation.
    pub turn_id: TurnId,
    /// The thread the turn ran against; callers send it back next turn.
    pub thread_id: ThreadId,
    /// The run that produced the reply.
    pub run_id: RunId,
    /// The assistant's reply text.
    pub text: String,
}
