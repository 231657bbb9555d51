use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::validation;

use super::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRequest {
    user_email: Option<String>,
    request_type: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    status: Option<String>,
    role: Option<String>,
    user_email: Option<String>,
}

/// POST /requests - submit a role (or other) request; only one pending
/// request per (user, type) at a time.
pub async fn submit(
    State(state): State<AppState>,
    Json(body): Json<NewRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_email = validation::require(body.user_email.as_deref(), "userEmail")?;
    let request_type = validation::require(body.request_type.as_deref(), "requestType")?;
    let request = state
        .requests
        .submit(user_email, request_type, body.extra)
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /requests - pending requests, newest first.
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let requests = state.requests.list_pending().await?;
    Ok(Json(requests))
}

/// PATCH /requests/{id} - resolve a request via the workflow engine.
pub async fn resolve(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ResolveRequest>,
) -> Result<impl IntoResponse, AppError> {
    let status = validation::require(body.status.as_deref(), "status")?;
    let user_email = validation::require(body.user_email.as_deref(), "userEmail")?;
    let outcome = state
        .workflow
        .resolve(&id, status, body.role.as_deref(), user_email)
        .await?;
    Ok(Json(outcome))
}
