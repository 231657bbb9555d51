use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::error::{conflict_on_unique, AppError};

use super::{new_id, now, strip_keys};

/// A user's saved meal. At most one per (userEmail, mealId) pair, enforced
/// by a unique index rather than a read-before-write check.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: String,
    pub user_email: String,
    pub meal_id: String,
    pub added_time: String,
    #[sqlx(json)]
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone)]
pub struct FavoriteRepo {
    pool: SqlitePool,
}

impl FavoriteRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn add(
        &self,
        user_email: &str,
        meal_id: &str,
        mut extra: Map<String, Value>,
    ) -> Result<Favorite, AppError> {
        strip_keys(&mut extra, &["id", "userEmail", "mealId", "addedTime"]);

        let favorite = Favorite {
            id: new_id(),
            user_email: user_email.to_string(),
            meal_id: meal_id.to_string(),
            added_time: now(),
            extra,
        };

        sqlx::query(
            "INSERT INTO favorites (id, user_email, meal_id, added_time, extra)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&favorite.id)
        .bind(&favorite.user_email)
        .bind(&favorite.meal_id)
        .bind(&favorite.added_time)
        .bind(Json(&favorite.extra))
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "meal already in favorites"))?;

        Ok(favorite)
    }

    pub async fn list_for(&self, user_email: &str) -> Result<Vec<Favorite>, AppError> {
        let favorites = sqlx::query_as::<_, Favorite>(
            "SELECT id, user_email, meal_id, added_time, extra
             FROM favorites WHERE user_email = ? ORDER BY added_time DESC",
        )
        .bind(user_email)
        .fetch_all(&self.pool)
        .await?;

        Ok(favorites)
    }
}
