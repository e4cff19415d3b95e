//! Error types and HTTP error response handling.
//!
//! Every failure the service can hit is converted into an HTTP 500 with a
//! JSON body carrying the raw error message:
//!
//! ```json
//! { "error": "Database error: pool timed out while waiting for an open connection" }
//! ```

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Seed fetch errors**: the upstream data source failed or returned garbage
/// - **Database errors**: any `sqlx::Error` from store operations
/// - **Query errors**: the query string could not be decoded at all
///
/// An unrecognised `month` is deliberately absent: it yields empty results.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Fetching or decoding the seed data failed.
    #[error("Seed fetch error: {0}")]
    SeedFetch(#[from] reqwest::Error),

    /// Database operation failed (e.g., connection error, query error).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Query string failed to deserialize (duplicate key, bad encoding).
    #[error("Invalid query string: {0}")]
    Query(#[from] QueryRejection),
}

/// Convert AppError into an HTTP response.
///
/// All variants map to 500 Internal Server Error with `{ "error": message }`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        tracing::error!(error = %message, "request failed");

        let body = Json(json!({ "error": message }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_error_response() {
        let response = AppError::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("Database error:"));
        assert!(message.contains("no rows returned"));
    }
}
