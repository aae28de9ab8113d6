//! API error responses.
//!
//! The interactive surface gets a generic apologetic message on any
//! upstream failure; the distinguishing error is logged for operators.
//! Relay failures that happened on a live thread include the thread id in
//! the body so the page can retry the same conversation.

use amber_dialer_assistant::AssistantApiError;
use amber_dialer_directory::DirectoryError;
use amber_dialer_relay::RelayError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Generic message shown to prospects when a turn fails.
const APOLOGY: &str = "Sorry, something went wrong. Please try again.";

/// Errors surfaced by request handlers.
#[derive(Debug)]
pub enum ApiError {
    /// The request body or query was invalid.
    BadRequest { message: String },
    /// No assistant is mapped to the requested company.
    CompanyNotFound,
    /// The directory could not answer.
    Directory(DirectoryError),
    /// Provisioning failed against the assistant API.
    Assistant(AssistantApiError),
    /// A chat turn failed inside the relay.
    Relay(RelayError),
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        Self::Directory(err)
    }
}

impl From<AssistantApiError> for ApiError {
    fn from(err: AssistantApiError) -> Self {
        Self::Assistant(err)
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        Self::Relay(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            Self::CompanyNotFound | Self::Relay(RelayError::UnknownCompany { .. }) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "No assistant found for this company" })),
            )
                .into_response(),
            Self::Directory(err) => {
                tracing::error!(error = %err, "directory store failure");
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "error": APOLOGY })),
                )
                    .into_response()
            }
            Self::Assistant(err) => {
                let status = match err {
                    AssistantApiError::RateLimited => StatusCode::SERVICE_UNAVAILABLE,
                    _ => StatusCode::BAD_GATEWAY,
                };
                tracing::error!(error = %err, "assistant API failure");
                (status, Json(json!({ "error": APOLOGY }))).into_response()
            }
            Self::Relay(err) => {
                let status = match err {
                    RelayError::RunTimedOut { .. } => StatusCode::GATEWAY_TIMEOUT,
                    _ => StatusCode::BAD_GATEWAY,
                };
                tracing::error!(error = %err, "chat turn failed");

                let body = match err.thread_id() {
                    Some(thread_id) => json!({ "error": APOLOGY, "threadId": thread_id }),
                    None => json!({ "error": APOLOGY }),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
