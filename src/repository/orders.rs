use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::error::AppError;

use super::{new_id, now, strip_keys};

/// A placed order. `orderStatus` and `paymentStatus` are independent axes:
/// an order can be Paid while still pending, and delivered while unpaid.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_email: String,
    pub order_status: String,
    pub payment_status: String,
    pub order_time: String,
    #[sqlx(json)]
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone)]
pub struct OrderRepo {
    pool: SqlitePool,
}

impl OrderRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Place an order. Both status fields start at their initial values no
    /// matter what the client sent, and `orderTime` is stamped here.
    pub async fn place(
        &self,
        user_email: &str,
        mut extra: Map<String, Value>,
    ) -> Result<Order, AppError> {
        strip_keys(
            &mut extra,
            &["id", "userEmail", "orderStatus", "paymentStatus", "orderTime"],
        );

        let order = Order {
            id: new_id(),
            user_email: user_email.to_string(),
            order_status: "pending".to_string(),
            payment_status: "Pending".to_string(),
            order_time: now(),
            extra,
        };

        sqlx::query(
            "INSERT INTO orders (id, user_email, order_status, payment_status, order_time, extra)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&order.id)
        .bind(&order.user_email)
        .bind(&order.order_status)
        .bind(&order.payment_status)
        .bind(&order.order_time)
        .bind(Json(&order.extra))
        .execute(&self.pool)
        .await?;

        Ok(order)
    }

    pub async fn list_for(&self, user_email: &str) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT id, user_email, order_status, payment_status, order_time, extra
             FROM orders WHERE user_email = ? ORDER BY order_time DESC",
        )
        .bind(user_email)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    pub async fn set_status(&self, id: &str, status: &str) -> Result<(), AppError> {
        let updated = sqlx::query("UPDATE orders SET order_status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if updated == 0 {
            return Err(AppError::NotFound("order"));
        }
        Ok(())
    }

    pub async fn mark_paid(&self, id: &str) -> Result<(), AppError> {
        let updated = sqlx::query("UPDATE orders SET payment_status = 'Paid' WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if updated == 0 {
            return Err(AppError::NotFound("order"));
        }
        Ok(())
    }

    pub async fn find(&self, id: &str) -> Result<Order, AppError> {
        sqlx::query_as::<_, Order>(
            "SELECT id, user_email, order_status, payment_status, order_time, extra
             FROM orders WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("order"))
    }
}
