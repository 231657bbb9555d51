use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::error::AppError;
use crate::validation;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterUser {
    email: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// POST /users - register a user; duplicate emails are rejected.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterUser>,
) -> Result<impl IntoResponse, AppError> {
    let email = validation::require(body.email.as_deref(), "email")?;
    let user = state.users.register(email, body.extra).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users - list all users.
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = state.users.list().await?;
    Ok(Json(users))
}

/// GET /users/role/{email} - role lookup, defaulting to "user".
pub async fn role(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let role = state.users.role_of(&email).await?;
    Ok(Json(json!({ "role": role })))
}
