//! Request-approval workflow: resolves a pending request and, on approval,
//! propagates the granted role to the user record.
//!
//! The original service issued the two writes independently, so a crash
//! between them could leave an approved request whose user never got the
//! role. Here both writes share one transaction: either the request is
//! resolved and the role applied, or neither happened.

use serde::Serialize;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::validation;

pub const APPROVED: &str = "approved";
pub const REJECTED: &str = "rejected";

/// Outcome of a resolution: the request was updated, and `role` echoes the
/// role that was actually applied to the user (None when no role changed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub modified: bool,
    pub role: Option<String>,
}

#[derive(Clone)]
pub struct RequestWorkflow {
    pool: SqlitePool,
}

impl RequestWorkflow {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Resolve a pending request.
    ///
    /// Valid only while the request is `pending`; re-resolving an already
    /// resolved request is rejected as a conflict rather than silently
    /// re-applied. `user_email` must name the request's subject. The role
    /// update fires only when the target status is `approved` and a role
    /// was supplied.
    pub async fn resolve(
        &self,
        id: &str,
        status: &str,
        role: Option<&str>,
        user_email: &str,
    ) -> Result<Resolution, AppError> {
        validation::parse_id(id)?;
        let status = validation::require(Some(status), "status")?;
        let user_email = validation::require(Some(user_email), "userEmail")?;

        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE requests SET request_status = ?
             WHERE id = ? AND user_email = ? AND request_status = 'pending'",
        )
        .bind(status)
        .bind(id)
        .bind(user_email)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            let found: Option<(String, String)> =
                sqlx::query_as("SELECT user_email, request_status FROM requests WHERE id = ?")
                    .bind(id)
                    .fetch_optional(&mut *tx)
                    .await?;
            tx.rollback().await?;

            return Err(match found {
                None => AppError::NotFound("request"),
                Some((subject, _)) if subject != user_email => {
                    AppError::invalid("userEmail does not match the request subject")
                }
                Some(_) => AppError::conflict("request already resolved"),
            });
        }

        let mut applied_role = None;
        if status == APPROVED {
            if let Some(role) = role {
                let user_updated = sqlx::query("UPDATE users SET role = ? WHERE email = ?")
                    .bind(role)
                    .bind(user_email)
                    .execute(&mut *tx)
                    .await?
                    .rows_affected();
                if user_updated > 0 {
                    applied_role = Some(role.to_string());
                }
            }
        }

        tx.commit().await?;

        tracing::info!(
            request_id = %id,
            status = %status,
            role = ?applied_role,
            "Request resolved"
        );

        Ok(Resolution {
            modified: true,
            role: applied_role,
        })
    }
}
