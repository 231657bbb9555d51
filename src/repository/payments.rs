use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::error::AppError;

use super::{new_id, now, strip_keys};

/// A recorded payment event. Not transactionally linked to an order; the
/// order's own `paymentStatus` is flipped through its dedicated endpoint.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    #[sqlx(json)]
    #[serde(flatten)]
    pub doc: Map<String, Value>,
    pub paid_at: String,
}

#[derive(Clone)]
pub struct PaymentRepo {
    pool: SqlitePool,
}

impl PaymentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn record(&self, mut doc: Map<String, Value>) -> Result<Payment, AppError> {
        strip_keys(&mut doc, &["id", "paidAt"]);

        let payment = Payment {
            id: new_id(),
            doc,
            paid_at: now(),
        };

        sqlx::query("INSERT INTO payments (id, doc, paid_at) VALUES (?, ?, ?)")
            .bind(&payment.id)
            .bind(Json(&payment.doc))
            .bind(&payment.paid_at)
            .execute(&self.pool)
            .await?;

        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_pool;
    use serde_json::json;

    #[tokio::test]
    async fn test_record_stamps_paid_at() {
        let repo = PaymentRepo::new(test_pool().await);

        let Value::Object(doc) = json!({ "orderId": "o1", "amount": 25, "paidAt": "bogus" })
        else {
            unreachable!()
        };
        let payment = repo.record(doc).await.unwrap();

        assert_ne!(payment.paid_at, "bogus");
        assert!(!payment.doc.contains_key("paidAt"));
        assert_eq!(payment.doc["orderId"], "o1");
    }
}
