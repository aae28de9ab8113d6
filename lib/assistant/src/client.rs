//! Assistant API client.
//!
//! [`AssistantApi`] is the seam the relay and server depend on; the HTTP
//! implementation talks to the remote assistants/threads/runs service, and
//! tests substitute scripted fakes.

use crate::error::AssistantApiError;
use crate::persona::AssistantPersona;
use crate::types::{Run, ThreadMessage};
use amber_dialer_core::{AssistantId, ExternalMessageId, RunId, ThreadId};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default API endpoint.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model backing new assistants.
const DEFAULT_MODEL: &str = "gpt-4-1106-preview";

/// The assistants API is versioned behind a beta header.
const BETA_HEADER: (&str, &str) = ("OpenAI-Beta", "assistants=v2");

/// Request timeout for API calls. Assistant creation is the slowest call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Trait for the external assistant service.
#[async_trait]
pub trait AssistantApi: Send + Sync {
    /// Creates a persona-configured assistant and returns its identifier.
    async fn create_assistant(
        &self,
        persona: &AssistantPersona,
    ) -> Result<AssistantId, AssistantApiError>;

    /// Creates an empty conversation thread.
    async fn create_thread(&self) -> Result<ThreadId, AssistantApiError>;

    /// Appends a user message to a thread.
    async fn add_user_message(
        &self,
        thread_id: &ThreadId,
        text: &str,
    ) -> Result<ExternalMessageId, AssistantApiError>;

    /// Starts a run of an assistant against a thread.
    async fn create_run(
        &self,
        thread_id: &ThreadId,
        assistant_id: &AssistantId,
    ) -> Result<Run, AssistantApiError>;

    /// Fetches the current state of a run.
    async fn get_run(
        &self,
        thread_id: &ThreadId,
        run_id: &RunId,
    ) -> Result<Run, AssistantApiError>;

    /// Lists a thread's messages, newest first.
    async fn list_messages(
        &self,
        thread_id: &ThreadId,
    ) -> Result<Vec<ThreadMessage>, AssistantApiError>;
}

/// Configuration for the HTTP assistant client.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantApiConfig {
    /// API credential.
    pub api_key: String,
    /// Base URL of the API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model backing newly created assistants.
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

/// HTTP implementation of [`AssistantApi`].
pub struct HttpAssistantClient {
    config: AssistantApiConfig,
    client: reqwest::Client,
}

/// The `id` field shared by every created object.
#[derive(Debug, Deserialize)]
struct CreatedObject {
    id: String,
}

/// List envelope wrapping message pages.
#[derive(Debug, Deserialize)]
struct ListEnvelope<T> {
    data: Vec<T>,
}

impl HttpAssistantClient {
    /// Creates a client for the configured API.
    #[must_use]
    pub fn new(config: AssistantApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { config, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, AssistantApiError> {
        let request = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.config.api_key)
            .header(BETA_HEADER.0, BETA_HEADER.1)
            .json(&body);
        Self::execute(request).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AssistantApiError> {
        let request = self
            .client
            .get(self.url(path))
            .bearer_auth(&self.config.api_key)
            .header(BETA_HEADER.0, BETA_HEADER.1);
        Self::execute(request).await
    }

    async fn execute<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
    ) -> Result<T, AssistantApiError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AssistantApiError::Timeout
            } else {
                AssistantApiError::Unavailable {
                    reason: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AssistantApiError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantApiError::RequestFailed {
                status: status.as_u16(),
                reason: body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| AssistantApiError::ResponseParse {
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl AssistantApi for HttpAssistantClient {
    #[instrument(skip(self, persona), fields(company = %persona.company_name()))]
    async fn create_assistant(
        &self,
        persona: &AssistantPersona,
    ) -> Result<AssistantId, AssistantApiError> {
        let created: CreatedObject = self
            .post(
                "assistants",
                json!({
                    "name": persona.display_name(),
                    "instructions": persona.instructions(),
                    "model": self.config.model,
                }),
            )
            .await?;
        debug!(assistant_id = %created.id, "assistant created");
        Ok(AssistantId::new(created.id))
    }

    #[instrument(skip(self))]
    async fn create_thread(&self) -> Result<ThreadId, AssistantApiError> {
        let created: CreatedObject = self.post("threads", json!({})).await?;
        debug!(thread_id = %created.id, "thread created");
        Ok(ThreadId::new(created.id))
    }

    #[instrument(skip(self, text), fields(thread_id = %thread_id))]
    async fn add_user_message(
        &self,
        thread_id: &ThreadId,
        text: &str,
    ) -> Result<ExternalMessageId, AssistantApiError> {
        let created: CreatedObject = self
            .post(
                &format!("threads/{thread_id}/messages"),
                json!({ "role": "user", "content": text }),
            )
            .await?;
        Ok(ExternalMessageId::new(created.id))
    }

    #[instrument(skip(self), fields(thread_id = %thread_id, assistant_id = %assistant_id))]
    async fn create_run(
        &self,
        thread_id: &ThreadId,
        assistant_id: &AssistantId,
    ) -> Result<Run, AssistantApiError> {
        let run: Run = self
            .post(
                &format!("threads/{thread_id}/runs"),
                json!({ "assistant_id": assistant_id.as_str() }),
            )
            .await?;
        debug!(run_id = %run.id, status = %run.status, "run created");
        Ok(run)
    }

    #[instrument(skip(self), fields(thread_id = %thread_id, run_id = %run_id))]
    async fn get_run(
        &self,
        thread_id: &ThreadId,
        run_id: &RunId,
    ) -> Result<Run, AssistantApiError> {
        self.get(&format!("threads/{thread_id}/runs/{run_id}")).await
    }

    #[instrument(skip(self), fields(thread_id = %thread_id))]
    async fn list_messages(
        &self,
        thread_id: &ThreadId,
    ) -> Result<Vec<ThreadMessage>, AssistantApiError> {
        let envelope: ListEnvelope<ThreadMessage> =
            self.get(&format!("threads/{thread_id}/messages")).await?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AssistantApiConfig {
        AssistantApiConfig {
            api_key: "sk-test".to_string(),
            base_url: default_base_url(),
            model: default_model(),
        }
    }

    #[test]
    fn urls_join_cleanly() {
        let client = HttpAssistantClient::new(AssistantApiConfig {
            base_url: "https://api.example.com/v1/".to_string(),
            ..test_config()
        });
        assert_eq!(
            client.url("threads/thread_1/runs"),
            "https://api.example.com/v1/threads/thread_1/runs"
        );
    }

    #[test]
    fn config_defaults_apply() {
        let config: AssistantApiConfig =
            serde_json::from_str(r#"{"api_key": "sk-test"}"#).expect("parse");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn list_envelope_parses() {
        let json = r#"{"object": "list", "data": [], "has_more": false}"#;
        let envelope: ListEnvelope<crate::types::ThreadMessage> =
            serde_json::from_str(json).expect("parse");
        assert!(envelope.data.is_empty());
    }
}
