//! Conversation relay for amber-dialer.
//!
//! Drives one chat turn end to end against the external assistant service:
//! resolve the target assistant, ensure a thread, append the prospect's
//! message, start a run, poll it to a terminal status under a bounded
//! exponential-backoff schedule, and extract the text reply.

pub mod error;
pub mod poll;
pub mod relay;
pub mod turn;

pub use error::RelayError;
pub use poll::{Backoff, PollConfig};
pub use relay::ConversationRelay;
pub use turn::{ChatInput, ChatReply, ChatTarget, TurnPhase};
