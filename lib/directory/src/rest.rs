//! Redis-compatible REST directory backend.
//!
//! The production store is a managed Redis exposed over HTTPS: one
//! endpoint, bearer-token auth, each command posted as a JSON array
//! (`["SET", key, value]`), replies wrapped in a `{"result": ...}`
//! envelope. Company records live under the `company:` key namespace.

use crate::error::DirectoryError;
use crate::store::DirectoryStore;
use amber_dialer_core::{AssistantId, Slug};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value as JsonValue, json};
use std::time::Duration;
use tracing::{debug, instrument};

/// Key namespace for company records in the shared store.
const KEY_PREFIX: &str = "company:";

/// Request timeout for store commands.
const COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for the REST key-value store.
#[derive(Debug, Clone, Deserialize)]
pub struct RestKvConfig {
    /// Base URL of the store's REST endpoint.
    pub url: String,
    /// Bearer token authorizing commands.
    pub token: String,
}

/// Directory backed by a Redis-compatible REST store.
pub struct RestKvDirectory {
    config: RestKvConfig,
    client: reqwest::Client,
}

/// Reply envelope used by the store for every command.
#[derive(Debug, Deserialize)]
struct CommandReply {
    result: JsonValue,
}

impl RestKvDirectory {
    /// Creates a directory client for the given store.
    #[must_use]
    pub fn new(config: RestKvConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(COMMAND_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { config, client }
    }

    fn key(slug: &Slug) -> String {
        format!("{KEY_PREFIX}{slug}")
    }

    /// Sends one command to the store and unwraps the result envelope.
    async fn command(&self, command: JsonValue) -> Result<JsonValue, DirectoryError> {
        let response = self
            .client
            .post(&self.config.url)
            .bearer_auth(&self.config.token)
            .json(&command)
            .send()
            .await
            .map_err(|e| DirectoryError::StoreUnavailable {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectoryError::RequestFailed {
                status: status.as_u16(),
                reason: body,
            });
        }

        let reply: CommandReply =
            response
                .json()
                .await
                .map_err(|e| DirectoryError::MalformedResponse {
                    reason: e.to_string(),
                })?;

        Ok(reply.result)
    }
}

#[async_trait]
impl DirectoryStore for RestKvDirectory {
    #[instrument(skip(self, assistant_id), fields(slug = %slug))]
    async fn put(&self, slug: &Slug, assistant_id: &AssistantId) -> Result<(), DirectoryError> {
        self.command(json!(["SET", Self::key(slug), assistant_id.as_str()]))
            .await?;
        debug!("company mapping stored");
        Ok(())
    }

    #[instrument(skip(self), fields(slug = %slug))]
    async fn get(&self, slug: &Slug) -> Result<Option<AssistantId>, DirectoryError> {
        match self.command(json!(["GET", Self::key(slug)])).await? {
            JsonValue::Null => Ok(None),
            JsonValue::String(id) => Ok(Some(AssistantId::new(id))),
            other => Err(DirectoryError::MalformedResponse {
                reason: format!("unexpected GET result: {other}"),
            }),
        }
    }

    #[instrument(skip(self), fields(slug = %slug))]
    async fn delete(&self, slug: &Slug) -> Result<bool, DirectoryError> {
        let result = self.command(json!(["DEL", Self::key(slug)])).await?;
        let removed = result
            .as_u64()
            .ok_or_else(|| DirectoryError::MalformedResponse {
                reason: format!("unexpected DEL result: {result}"),
            })?;
        debug!(removed, "company mapping delete");
        Ok(removed > 0)
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Slug>, DirectoryError> {
        let result = self
            .command(json!(["KEYS", format!("{KEY_PREFIX}*")]))
            .await?;
        let keys = result
            .as_array()
            .ok_or_else(|| DirectoryError::MalformedResponse {
                reason: format!("unexpected KEYS result: {result}"),
            })?;

        // Stored keys were derived from normalized slugs, and normalization
        // is idempotent, so round-tripping through it is lossless.
        Ok(keys
            .iter()
            .filter_map(JsonValue::as_str)
            .filter_map(|key| key.strip_prefix(KEY_PREFIX))
            .map(Slug::normalize)
            .collect())
    }
}
