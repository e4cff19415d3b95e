//! Liveness endpoint: `GET /health`.
//!
//! Not one of the dataset endpoints. It reports whether the store answers
//! and how many transactions the last seed left behind, which is the quickest
//! way to tell an unseeded (or half-seeded) database from an empty month.

use crate::{db::DbPool, error::AppError};
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// # Response (200 OK)
///
/// ```json
/// { "status": "ok", "storedTransactions": 60, "checkedAt": "2023-06-01T10:00:00Z" }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,

    /// Rows currently in `transactions`; 0 before `/api/init` has run
    pub stored_transactions: i64,

    pub checked_at: DateTime<Utc>,
}

/// An unreachable database surfaces as the standard 500 error body.
pub async fn health_check(State(pool): State<DbPool>) -> Result<Json<HealthResponse>, AppError> {
    let stored_transactions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
        .fetch_one(&pool)
        .await?;

    Ok(Json(HealthResponse {
        status: "ok",
        stored_transactions,
        checked_at: Utc::now(),
    }))
}
