use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::error::AppError;

use super::{new_id, now, strip_keys};

/// A meal listing. The document is chef-defined, so everything except the
/// identifier and creation time is carried as-is.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: String,
    #[sqlx(json)]
    #[serde(flatten)]
    pub doc: Map<String, Value>,
    pub created_at: String,
}

#[derive(Clone)]
pub struct MealRepo {
    pool: SqlitePool,
}

impl MealRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, mut doc: Map<String, Value>) -> Result<Meal, AppError> {
        strip_keys(&mut doc, &["id", "createdAt"]);

        let meal = Meal {
            id: new_id(),
            doc,
            created_at: now(),
        };

        sqlx::query("INSERT INTO meals (id, doc, created_at) VALUES (?, ?, ?)")
            .bind(&meal.id)
            .bind(Json(&meal.doc))
            .bind(&meal.created_at)
            .execute(&self.pool)
            .await?;

        Ok(meal)
    }

    /// List meals, newest first, with an optional result cap.
    pub async fn list(&self, limit: Option<i64>) -> Result<Vec<Meal>, AppError> {
        let meals = sqlx::query_as::<_, Meal>(
            "SELECT id, doc, created_at FROM meals ORDER BY created_at DESC LIMIT ?",
        )
        .bind(limit.unwrap_or(-1))
        .fetch_all(&self.pool)
        .await?;

        Ok(meals)
    }

    pub async fn find(&self, id: &str) -> Result<Meal, AppError> {
        sqlx::query_as::<_, Meal>("SELECT id, doc, created_at FROM meals WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("meal"))
    }
}
