//! The conversation relay.
//!
//! One chat turn: resolve the assistant, ensure a thread exists, append the
//! prospect's message, start a run, poll it to a terminal status, and
//! extract the reply text. The relay holds no session state between turns;
//! the caller carries the thread id forward.

use crate::error::RelayError;
use crate::poll::{Backoff, PollConfig};
use crate::turn::{ChatInput, ChatReply, ChatTarget, TurnPhase};
use amber_dialer_assistant::{AssistantApi, Run, RunStatus};
use amber_dialer_core::{AssistantId, ThreadId, TurnId};
use amber_dialer_directory::DirectoryStore;
use std::sync::Arc;
use tokio::time::{Instant, sleep};
use tracing::{debug, info, instrument, warn};

/// Relays chat turns between callers and the external assistant service.
pub struct ConversationRelay {
    api: Arc<dyn AssistantApi>,
    directory: Arc<dyn DirectoryStore>,
    poll: PollConfig,
}

impl ConversationRelay {
    /// Creates a relay over the given API and directory with the default
    /// polling schedule.
    #[must_use]
    pub fn new(api: Arc<dyn AssistantApi>, directory: Arc<dyn DirectoryStore>) -> Self {
        Self {
            api,
            directory,
            poll: PollConfig::default(),
        }
    }

    /// Replaces the polling schedule.
    #[must_use]
    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// Runs one chat turn and returns the assistant's reply.
    ///
    /// A missing `thread_id` starts a new conversation; the reply carries
    /// the thread id to send back on the next turn. An
    /// [`ChatInput::Initialize`] turn appends nothing and only elicits the
    /// assistant's opening line.
    pub async fn send(
        &self,
        target: &ChatTarget,
        input: ChatInput,
        thread_id: Option<ThreadId>,
    ) -> Result<ChatReply, RelayError> {
        let turn_id = TurnId::new();
        let mut phase = TurnPhase::NeedThread;

        let assistant_id = self.resolve(target).await?;

        let thread_id = match thread_id {
            Some(id) => id,
            None => {
                let id = self.api.create_thread().await.map_err(|source| {
                    RelayError::Api {
                        source,
                        phase,
                        thread_id: None,
                    }
                })?;
                debug!(%turn_id, thread_id = %id, "started new conversation thread");
                id
            }
        };
        phase = TurnPhase::ThreadReady;

        if let ChatInput::Message(text) = &input {
            self.api
                .add_user_message(&thread_id, text)
                .await
                .map_err(|source| RelayError::Api {
                    source,
                    phase,
                    thread_id: Some(thread_id.clone()),
                })?;
            phase = TurnPhase::MessageSent;
        }

        let run = self
            .api
            .create_run(&thread_id, &assistant_id)
            .await
            .map_err(|source| RelayError::Api {
                source,
                phase,
                thread_id: Some(thread_id.clone()),
            })?;
        debug!(%turn_id, run_id = %run.id, "run created");

        let run = self.poll_run(&thread_id, run, turn_id).await?;

        let text = self.latest_reply(&thread_id, &run).await?;
        info!(
            %turn_id,
            thread_id = %thread_id,
            run_id = %run.id,
            phase = %TurnPhase::Completed,
            "turn completed"
        );

        Ok(ChatReply {
            turn_id,
            thread_id,
            run_id: run.id,
            text,
        })
    }

    /// Resolves the chat target to a concrete assistant id.
    #[instrument(skip(self))]
    async fn resolve(&self, target: &ChatTarget) -> Result<AssistantId, RelayError> {
        match target {
            ChatTarget::Assistant(id) => Ok(id.clone()),
            ChatTarget::Company(slug) => self
                .directory
                .get(slug)
                .await
                .map_err(|source| RelayError::Directory { source })?
                .ok_or_else(|| RelayError::UnknownCompany { slug: slug.clone() }),
        }
    }

    /// Polls a run until it reaches a terminal status, within the attempt
    /// and wall-clock budgets of the polling schedule.
    async fn poll_run(
        &self,
        thread_id: &ThreadId,
        run: Run,
        turn_id: TurnId,
    ) -> Result<Run, RelayError> {
        let deadline = Instant::now() + self.poll.max_total;
        let mut backoff = Backoff::new(&self.poll);
        let mut attempts: u32 = 0;
        let mut current = run;

        while !current.status.is_terminal() {
            if attempts >= self.poll.max_attempts || Instant::now() >= deadline {
                warn!(
                    %turn_id,
                    thread_id = %thread_id,
                    run_id = %current.id,
                    attempts,
                    last_status = %current.status,
                    phase = %TurnPhase::TimedOut,
                    "run polling budget exhausted"
                );
                return Err(RelayError::RunTimedOut {
                    thread_id: thread_id.clone(),
                    run_id: current.id,
                    attempts,
                });
            }

            // Never sleep past the wall-clock deadline.
            let delay = backoff
                .delay()
                .min(deadline.saturating_duration_since(Instant::now()));
            sleep(delay).await;
            attempts += 1;

            current = self
                .api
                .get_run(thread_id, &current.id)
                .await
                .map_err(|source| RelayError::Api {
                    source,
                    phase: TurnPhase::Polling,
                    thread_id: Some(thread_id.clone()),
                })?;
            debug!(
                %turn_id,
                run_id = %current.id,
                status = %current.status,
                attempts,
                "run status checked"
            );
        }

        match current.status {
            RunStatus::Completed => Ok(current),
            status => {
                warn!(
                    %turn_id,
                    thread_id = %thread_id,
                    run_id = %current.id,
                    %status,
                    phase = %TurnPhase::Failed,
                    "run ended without a reply"
                );
                Err(RelayError::RunFailed {
                    thread_id: thread_id.clone(),
                    run_id: current.id,
                    status,
                })
            }
        }
    }

    /// Fetches the newest assistant reply created at-or-after the run.
    ///
    /// The guard keeps a slow turn from returning a reply left over from an
    /// earlier run on the same thread.
    async fn latest_reply(&self, thread_id: &ThreadId, run: &Run) -> Result<String, RelayError> {
        let messages =
            self.api
                .list_messages(thread_id)
                .await
                .map_err(|source| RelayError::Api {
                    source,
                    phase: TurnPhase::Polling,
                    thread_id: Some(thread_id.clone()),
                })?;

        // Messages arrive newest first.
        let reply = messages
            .iter()
            .find(|m| m.is_assistant() && m.created_at >= run.created_at)
            .ok_or_else(|| RelayError::MissingReply {
                thread_id: thread_id.clone(),
                run_id: run.id.clone(),
            })?;

        reply
            .text()
            .map(str::to_string)
            .ok_or_else(|| RelayError::MalformedReply {
                thread_id: thread_id.clone(),
                message_id: reply.id.clone(),
            })
    }
}
