use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{QueryBuilder, SqlitePool};

use crate::error::AppError;

use super::{new_id, now, strip_keys};

/// A meal review. `date` is always server-stamped; a client-supplied value
/// is discarded.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub user_email: String,
    pub food_id: String,
    pub date: String,
    #[sqlx(json)]
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone)]
pub struct ReviewRepo {
    pool: SqlitePool,
}

impl ReviewRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_email: &str,
        food_id: &str,
        mut extra: Map<String, Value>,
    ) -> Result<Review, AppError> {
        strip_keys(&mut extra, &["id", "userEmail", "foodId", "date"]);

        let review = Review {
            id: new_id(),
            user_email: user_email.to_string(),
            food_id: food_id.to_string(),
            date: now(),
            extra,
        };

        sqlx::query(
            "INSERT INTO reviews (id, user_email, food_id, date, extra) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&review.id)
        .bind(&review.user_email)
        .bind(&review.food_id)
        .bind(&review.date)
        .bind(Json(&review.extra))
        .execute(&self.pool)
        .await?;

        Ok(review)
    }

    /// List reviews, optionally narrowed by reviewer and/or meal.
    pub async fn list(
        &self,
        user_email: Option<&str>,
        food_id: Option<&str>,
    ) -> Result<Vec<Review>, AppError> {
        let mut query =
            QueryBuilder::new("SELECT id, user_email, food_id, date, extra FROM reviews WHERE 1 = 1");
        if let Some(email) = user_email {
            query.push(" AND user_email = ").push_bind(email);
        }
        if let Some(food) = food_id {
            query.push(" AND food_id = ").push_bind(food);
        }
        query.push(" ORDER BY date DESC");

        let reviews = query
            .build_query_as::<Review>()
            .fetch_all(&self.pool)
            .await?;

        Ok(reviews)
    }
}
