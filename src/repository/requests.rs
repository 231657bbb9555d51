use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::error::{conflict_on_unique, AppError};

use super::{new_id, now, strip_keys};

/// A role-change (or other) request. Starts `pending`; a partial unique
/// index keeps at most one pending request per (userEmail, requestType),
/// while resolved ones never block resubmission. Terminal states are set by
/// the workflow engine only.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequest {
    pub id: String,
    pub user_email: String,
    pub request_type: String,
    pub request_status: String,
    pub request_time: String,
    #[sqlx(json)]
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone)]
pub struct RequestRepo {
    pool: SqlitePool,
}

impl RequestRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn submit(
        &self,
        user_email: &str,
        request_type: &str,
        mut extra: Map<String, Value>,
    ) -> Result<RoleRequest, AppError> {
        strip_keys(
            &mut extra,
            &["id", "userEmail", "requestType", "requestStatus", "requestTime"],
        );

        let request = RoleRequest {
            id: new_id(),
            user_email: user_email.to_string(),
            request_type: request_type.to_string(),
            request_status: "pending".to_string(),
            request_time: now(),
            extra,
        };

        sqlx::query(
            "INSERT INTO requests (id, user_email, request_type, request_status, request_time, extra)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&request.id)
        .bind(&request.user_email)
        .bind(&request.request_type)
        .bind(&request.request_status)
        .bind(&request.request_time)
        .bind(Json(&request.extra))
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "a pending request of this type already exists"))?;

        Ok(request)
    }

    /// Pending requests only, newest first. Resolved requests drop out of
    /// the admin queue.
    pub async fn list_pending(&self) -> Result<Vec<RoleRequest>, AppError> {
        let requests = sqlx::query_as::<_, RoleRequest>(
            "SELECT id, user_email, request_type, request_status, request_time, extra
             FROM requests WHERE request_status = 'pending' ORDER BY request_time DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    pub async fn find(&self, id: &str) -> Result<RoleRequest, AppError> {
        sqlx::query_as::<_, RoleRequest>(
            "SELECT id, user_email, request_type, request_status, request_time, extra
             FROM requests WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("request"))
    }
}
