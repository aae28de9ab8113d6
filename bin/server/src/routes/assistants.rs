//! Company assistant provisioning routes.
//!
//! `POST /assistants` creates the persona'd assistant remotely and stores
//! the slug mapping; `GET` and `DELETE` look up and remove mappings by the
//! `company` query parameter.

use crate::error::ApiError;
use crate::state::AppState;
use amber_dialer_assistant::AssistantPersona;
use amber_dialer_core::{AssistantId, Slug};
use amber_dialer_directory::CompanyRecord;
use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Body of `POST /assistants`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssistantRequest {
    /// The company the demo is branded for.
    #[serde(default)]
    pub company_name: String,
    /// The prospect the demo is personalized to.
    #[serde(default)]
    pub contact_name: String,
    /// Contact email captured with the demo request.
    #[serde(default)]
    pub contact_email: String,
    /// Prospect location, if known.
    #[serde(default)]
    pub location: Option<String>,
    /// Prospect job title, if known.
    #[serde(default)]
    pub title: Option<String>,
}

/// Response of `POST /assistants`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssistantResponse {
    pub assistant_id: AssistantId,
    pub slug: Slug,
    pub demo_url: String,
    pub calendar_link: String,
}

/// Query parameter shared by lookup and removal.
#[derive(Debug, Deserialize)]
pub struct CompanyQuery {
    pub company: String,
}

/// Response of `DELETE /assistants`.
#[derive(Debug, Serialize)]
pub struct RemoveResponse {
    pub removed: bool,
}

/// Provisions a company demo: creates the assistant remotely, stores the
/// slug mapping, and returns the shareable links.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateAssistantRequest>,
) -> Result<Json<CreateAssistantResponse>, ApiError> {
    for (field, value) in [
        ("companyName", &request.company_name),
        ("contactName", &request.contact_name),
        ("contactEmail", &request.contact_email),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::BadRequest {
                message: format!("{field} is required"),
            });
        }
    }

    let slug = Slug::normalize(&request.company_name);
    let calendar_link = state.links.calendar_link(&slug);

    let mut persona =
        AssistantPersona::new(request.company_name.as_str(), request.contact_name.as_str())
            .with_calendar_link(calendar_link.as_str());
    if let Some(location) = &request.location {
        persona = persona.with_location(location.as_str());
    }
    if let Some(title) = &request.title {
        persona = persona.with_title(title.as_str());
    }

    let assistant_id = state.api.create_assistant(&persona).await?;
    state.directory.put(&slug, &assistant_id).await?;
    tracing::info!(slug = %slug, assistant_id = %assistant_id, "company demo provisioned");

    let demo_url = state.links.demo_url(&slug);
    Ok(Json(CreateAssistantResponse {
        assistant_id,
        slug,
        demo_url,
        calendar_link,
    }))
}

/// Looks up the company record for a slug.
pub async fn lookup(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CompanyQuery>,
) -> Result<Json<CompanyRecord>, ApiError> {
    let slug = Slug::normalize(&query.company);
    match state.directory.get(&slug).await? {
        Some(assistant_id) => Ok(Json(CompanyRecord::new(slug, assistant_id))),
        None => Err(ApiError::CompanyNotFound),
    }
}

/// Removes the mapping for a company slug.
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CompanyQuery>,
) -> Result<Json<RemoveResponse>, ApiError> {
    let slug = Slug::normalize(&query.company);
    let removed = state.directory.delete(&slug).await?;
    tracing::info!(slug = %slug, removed, "company demo removal");
    Ok(Json(RemoveResponse { removed }))
}

#[cfg(test)]
mod tests {
    use crate::routes::testing::{request_json, test_router};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn provision_then_lookup_round_trips() {
        let router = test_router();

        let (status, created) = request_json(
            &router,
            "POST",
            "/assistants",
            Some(json!({
                "companyName": "Test Solar Company",
                "contactName": "John Doe",
                "contactEmail": "john@testcompany.com",
                "location": "Austin, TX"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["slug"], "test-solar-company");
        assert_eq!(
            created["demoUrl"],
            "https://demo.example.com/test-solar-company"
        );
        assert_eq!(
            created["calendarLink"],
            "https://calendly.com/test-solar-company"
        );

        let (status, found) = request_json(
            &router,
            "GET",
            "/assistants?company=test-solar-company",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(found["assistantId"], created["assistantId"]);
    }

    #[tokio::test]
    async fn unknown_company_is_not_found() {
        let router = test_router();
        let (status, body) =
            request_json(&router, "GET", "/assistants?company=never-stored", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn missing_required_fields_are_rejected() {
        let router = test_router();
        let (status, body) = request_json(
            &router,
            "POST",
            "/assistants",
            Some(json!({ "companyName": "Test Solar Company" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "contactName is required");
    }

    #[tokio::test]
    async fn removal_reports_whether_anything_was_removed() {
        let router = test_router();

        request_json(
            &router,
            "POST",
            "/assistants",
            Some(json!({
                "companyName": "Acme Solar LLC",
                "contactName": "Jordan Lee",
                "contactEmail": "jordan@acme.example"
            })),
        )
        .await;

        let (status, body) =
            request_json(&router, "DELETE", "/assistants?company=acme-solar", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["removed"], true);

        let (_, body) =
            request_json(&router, "DELETE", "/assistants?company=acme-solar", None).await;
        assert_eq!(body["removed"], false);
    }
}
