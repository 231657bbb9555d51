use axum::{
    extract::{Query, State},
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
pub struct NewFavorite {
    user_email: Option<String>,
    meal_id: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct FavoriteQuery {
    email: Option<String>,
}

/// POST /favorites - save a meal; duplicates for the same user are rejected.
pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<NewFavorite>,
) -> Result<impl IntoResponse, AppError> {
    let user_email = validation::require(body.user_email.as_deref(), "userEmail")?;
    let meal_id = validation::require(body.meal_id.as_deref(), "mealId")?;
    let favorite = state.favorites.add(user_email, meal_id, body.extra).await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

/// GET /favorites?email= - a user's saved meals.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<FavoriteQuery>,
) -> Result<impl IntoResponse, AppError> {
    let email = validation::require(query.email.as_deref(), "email")?;
    let favorites = state.favorites.list_for(email).await?;
    Ok(Json(favorites))
}
