use axum::{
    extract::{Path, Query, State},
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
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    user_email: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct OrderQuery {
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    status: Option<String>,
}

/// POST /orders - place an order; starts pending and unpaid.
pub async fn place(
    State(state): State<AppState>,
    Json(body): Json<NewOrder>,
) -> Result<impl IntoResponse, AppError> {
    let user_email = validation::require(body.user_email.as_deref(), "userEmail")?;
    let order = state.orders.place(user_email, body.extra).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /orders?email= - a user's orders, newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
) -> Result<impl IntoResponse, AppError> {
    let email = validation::require(query.email.as_deref(), "email")?;
    let orders = state.orders.list_for(email).await?;
    Ok(Json(orders))
}

/// PATCH /orders/status/{id} - set orderStatus; paymentStatus is untouched.
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<StatusUpdate>,
) -> Result<impl IntoResponse, AppError> {
    validation::parse_id(&id)?;
    let status = validation::require(body.status.as_deref(), "status")?;
    state.orders.set_status(&id, status).await?;
    Ok(Json(json!({ "modified": true })))
}

/// PATCH /orders/payment/{id} - mark the order Paid; orderStatus is untouched.
pub async fn mark_paid(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    validation::parse_id(&id)?;
    state.orders.mark_paid(&id).await?;
    Ok(Json(json!({ "modified": true })))
}
