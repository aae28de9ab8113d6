//! Chat turn route.
//!
//! One `POST /chat` is one conversation turn. The caller addresses either a
//! concrete assistant id or a company slug, and carries the thread id
//! between turns; a missing or blank message is the initialize turn that
//! elicits the assistant's opening line.

use crate::error::ApiError;
use crate::state::AppState;
use amber_dialer_core::{AssistantId, Slug, ThreadId};
use amber_dialer_relay::{ChatInput, ChatTarget};
use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Body of `POST /chat`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The prospect's message; absent or blank requests the opening line.
    #[serde(default)]
    pub message: Option<String>,
    /// Direct assistant target.
    #[serde(default)]
    pub assistant_id: Option<String>,
    /// Company slug target, resolved through the directory.
    #[serde(default)]
    pub company_slug: Option<String>,
    /// Thread to continue; absent starts a new conversation.
    #[serde(default)]
    pub thread_id: Option<String>,
}

/// Response of `POST /chat`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    pub thread_id: ThreadId,
}

/// Runs one chat turn through the relay.
pub async fn send(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let target = match (&request.assistant_id, &request.company_slug) {
        (Some(id), _) if !id.trim().is_empty() => {
            ChatTarget::Assistant(AssistantId::new(id.trim()))
        }
        (_, Some(slug)) if !slug.trim().is_empty() => ChatTarget::Company(Slug::normalize(slug)),
        _ => {
            return Err(ApiError::BadRequest {
                message: "assistantId or companySlug is required".to_string(),
            });
        }
    };

    let input = ChatInput::from_text(request.message.as_deref());
    let thread_id = request
        .thread_id
        .filter(|id| !id.trim().is_empty())
        .map(ThreadId::new);

    let reply = state.relay.send(&target, input, thread_id).await?;

    Ok(Json(ChatResponse {
        reply: reply.text,
        thread_id: reply.thread_id,
    }))
}

#[cfg(test)]
mod tests {
    use crate::routes::testing::{CANNED_REPLY, request_json, test_router};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn chat_turn_returns_reply_and_thread() {
        let router = test_router();

        let (status, body) = request_json(
            &router,
            "POST",
            "/chat",
            Some(json!({ "assistantId": "asst_demo", "message": "yes" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"], CANNED_REPLY);
        assert_eq!(body["threadId"], "thread_demo");
    }

    #[tokio::test]
    async fn thread_id_is_reusable_on_the_next_turn() {
        let router = test_router();

        let (_, first) = request_json(
            &router,
            "POST",
            "/chat",
            Some(json!({ "assistantId": "asst_demo", "message": "yes" })),
        )
        .await;

        let (status, second) = request_json(
            &router,
            "POST",
            "/chat",
            Some(json!({
                "assistantId": "asst_demo",
                "message": "around $200 a month",
                "threadId": first["threadId"]
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["threadId"], first["threadId"]);
        assert!(!second["reply"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_message_runs_the_initialize_turn() {
        let router = test_router();

        let (status, body) = request_json(
            &router,
            "POST",
            "/chat",
            Some(json!({ "assistantId": "asst_demo" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(!body["reply"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_target_is_rejected() {
        let router = test_router();

        let (status, body) =
            request_json(&router, "POST", "/chat", Some(json!({ "message": "yes" }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "assistantId or companySlug is required");
    }

    #[tokio::test]
    async fn unknown_company_slug_is_not_found() {
        let router = test_router();

        let (status, _) = request_json(
            &router,
            "POST",
            "/chat",
            Some(json!({ "companySlug": "never-stored", "message": "yes" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn provisioned_company_chats_by_slug() {
        let router = test_router();

        request_json(
            &router,
            "POST",
            "/assistants",
            Some(json!({
                "companyName": "Test Solar Company",
                "contactName": "John Doe",
                "contactEmail": "john@testcompany.com"
            })),
        )
        .await;

        let (status, body) = request_json(
            &router,
            "POST",
            "/chat",
            Some(json!({ "companySlug": "test-solar-company", "message": "yes" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"], CANNED_REPLY);
    }
}
