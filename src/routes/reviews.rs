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
pub struct ReviewFilter {
    user_email: Option<String>,
    food_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    user_email: Option<String>,
    food_id: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// GET /reviews?userEmail=&foodId= - optional filters, AND-combined.
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ReviewFilter>,
) -> Result<impl IntoResponse, AppError> {
    let reviews = state
        .reviews
        .list(filter.user_email.as_deref(), filter.food_id.as_deref())
        .await?;
    Ok(Json(reviews))
}

/// POST /reviews - create a review; the date is server-stamped.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewReview>,
) -> Result<impl IntoResponse, AppError> {
    let user_email = validation::require(body.user_email.as_deref(), "userEmail")?;
    let food_id = validation::require(body.food_id.as_deref(), "foodId")?;
    let review = state.reviews.create(user_email, food_id, body.extra).await?;
    Ok((StatusCode::CREATED, Json(review)))
}
