use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{Map, Value};

use crate::error::AppError;

use super::AppState;

/// POST /payments - record a payment event; paidAt is server-stamped.
pub async fn record(
    State(state): State<AppState>,
    Json(doc): Json<Map<String, Value>>,
) -> Result<impl IntoResponse, AppError> {
    let payment = state.payments.record(doc).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}
