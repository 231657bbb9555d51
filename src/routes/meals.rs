use axum::{
    extract::{Path, Query, State},
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
pub struct MealListQuery {
    limit: Option<i64>,
}

/// GET /meals?limit= - list meals with an optional result cap.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<MealListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let meals = state.meals.list(query.limit.filter(|l| *l > 0)).await?;
    Ok(Json(meals))
}

/// GET /meals/{id} - 400 on malformed id, 404 if absent.
pub async fn find(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    validation::parse_id(&id)?;
    let meal = state.meals.find(&id).await?;
    Ok(Json(meal))
}

/// POST /meals - insert a chef-defined meal document.
pub async fn create(
    State(state): State<AppState>,
    Json(doc): Json<Map<String, Value>>,
) -> Result<impl IntoResponse, AppError> {
    let meal = state.meals.create(doc).await?;
    Ok((StatusCode::CREATED, Json(meal)))
}
