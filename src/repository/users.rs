use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::error::{conflict_on_unique, AppError};

use super::{new_id, now, strip_keys};

/// A registered user. `role` and `status` are server-owned: clients cannot
/// set them at registration, and `role` only changes through an approved
/// role request (see `workflow`).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: String,
    pub status: String,
    #[sqlx(json)]
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    pub created_at: String,
}

#[derive(Clone)]
pub struct UserRepo {
    pool: SqlitePool,
}

impl UserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a user. Email is the identity: a second registration with
    /// the same email is rejected and leaves the stored record untouched.
    pub async fn register(
        &self,
        email: &str,
        mut extra: Map<String, Value>,
    ) -> Result<User, AppError> {
        strip_keys(&mut extra, &["id", "email", "role", "status", "createdAt"]);

        let user = User {
            id: new_id(),
            email: email.to_string(),
            role: "user".to_string(),
            status: "active".to_string(),
            extra,
            created_at: now(),
        };

        sqlx::query(
            "INSERT INTO users (id, email, role, status, extra, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.role)
        .bind(&user.status)
        .bind(Json(&user.extra))
        .bind(&user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "user already exists"))?;

        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, email, role, status, extra, created_at
             FROM users ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Role lookup, defaulting to "user" when no record exists.
    pub async fn role_of(&self, email: &str) -> Result<String, AppError> {
        let role: Option<String> = sqlx::query_scalar("SELECT role FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(role.unwrap_or_else(|| "user".to_string()))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, role, status, extra, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
