//! Wire types for the external assistants API.
//!
//! Threads, messages, and runs are owned by the remote service; these types
//! mirror the fields we consume and ignore the rest. Timestamps arrive as
//! unix seconds.

use amber_dialer_core::{ExternalMessageId, RunId, ThreadId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The lifecycle status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Accepted, not yet started.
    Queued,
    /// The assistant is producing a reply.
    InProgress,
    /// The run is waiting on a tool submission we never provide.
    RequiresAction,
    /// The API is cancelling the run.
    Cancelling,
    /// The reply is ready.
    Completed,
    /// The run failed remotely.
    Failed,
    /// The run was cancelled.
    Cancelled,
    /// The run sat unprocessed past its deadline.
    Expired,
    /// The run ended without a usable reply.
    Incomplete,
}

impl RunStatus {
    /// Returns true once the run will never change status again.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Failed | Self::Cancelled | Self::Expired | Self::Incomplete
        )
    }

    /// Returns the wire name of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::InProgress => "in_progress",
            Self::RequiresAction => "requires_action",
            Self::Cancelling => "cancelling",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
            Self::Incomplete => "incomplete",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An asynchronous computation producing the assistant's next reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    /// Run identifier.
    pub id: RunId,
    /// The thread the run executes against.
    pub thread_id: ThreadId,
    /// Current status.
    pub status: RunStatus,
    /// When the run was created, per the API's clock.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
}

/// The author of a thread message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The prospect.
    User,
    /// The sales-rep persona.
    Assistant,
}

/// One content part of a thread message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    /// Plain text content.
    Text { text: TextPayload },
    /// Any content type we do not render (images, files).
    #[serde(other)]
    Unsupported,
}

/// The body of a text content part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextPayload {
    /// The text itself.
    pub value: String,
}

/// A message stored in an external thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadMessage {
    /// Message identifier.
    pub id: ExternalMessageId,
    /// Who authored the message.
    pub role: MessageRole,
    /// Ordered content parts.
    pub content: Vec<MessageContent>,
    /// When the message was created, per the API's clock.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
}

impl ThreadMessage {
    /// Returns the first text part, if the message has one.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.content.iter().find_map(|part| match part {
            MessageContent::Text { text } => Some(text.value.as_str()),
            MessageContent::Unsupported => None,
        })
    }

    /// Returns true if the assistant authored this message.
    #[must_use]
    pub fn is_assistant(&self) -> bool {
        self.role == MessageRole::Assistant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses() {
        assert!(RunStatus::Completed.is_terminal());
        assert!(RunStatus::Failed.is_terminal());
        assert!(RunStatus::Expired.is_terminal());
        assert!(!RunStatus::Queued.is_terminal());
        assert!(!RunStatus::InProgress.is_terminal());
        assert!(!RunStatus::RequiresAction.is_terminal());
    }

    #[test]
    fn run_deserializes_from_wire_shape() {
        let json = r#"{
            "id": "run_abc",
            "thread_id": "thread_xyz",
            "status": "in_progress",
            "created_at": 1700000000
        }"#;
        let run: Run = serde_json::from_str(json).expect("parse");
        assert_eq!(run.id.as_str(), "run_abc");
        assert_eq!(run.status, RunStatus::InProgress);
    }

    #[test]
    fn message_text_extraction() {
        let json = r#"{
            "id": "msg_1",
            "role": "assistant",
            "content": [{"type": "text", "text": {"value": "Hello there"}}],
            "created_at": 1700000000
        }"#;
        let message: ThreadMessage = serde_json::from_str(json).expect("parse");
        assert!(message.is_assistant());
        assert_eq!(message.text(), Some("Hello there"));
    }

    #[test]
    fn unknown_content_type_is_unsupported() {
        let json = r#"{
            "id": "msg_2",
            "role": "assistant",
            "content": [{"type": "image_file", "image_file": {"file_id": "file_1"}}],
            "created_at": 1700000000
        }"#;
        let message: ThreadMessage = serde_json::from_str(json).expect("parse");
        assert_eq!(message.text(), None);
    }
}
