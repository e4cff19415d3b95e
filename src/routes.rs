//! HTTP router and shared handler state.

use crate::{config::Config, db::DbPool, handlers};
use axum::{Router, extract::FromRef, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// State shared with every handler.
///
/// Handlers that only query the store extract `State<DbPool>` directly.
#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: DbPool,

    /// Where `/api/init` fetches its dataset from
    pub seed_url: String,
}

impl AppState {
    pub fn new(pool: DbPool, config: &Config) -> Self {
        Self {
            pool,
            seed_url: config.seed_url.clone(),
        }
    }
}

impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/init", get(handlers::transactions::init_database))
        .route(
            "/api/transactions",
            get(handlers::transactions::list_transactions),
        )
        .route("/api/statistics", get(handlers::analytics::statistics))
        .route("/api/barchart", get(handlers::analytics::bar_chart))
        .route("/api/piechart", get(handlers::analytics::pie_chart))
        .route("/api/combined", get(handlers::analytics::combined))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::unreachable_pool;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState {
            pool: unreachable_pool(),
            seed_url: "http://127.0.0.1:1/product_transaction.json".to_string(),
        })
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_unknown_month_lists_nothing() {
        let (status, body) = get_json("/api/transactions?month=Smarch&search=shirt&page=2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_unknown_month_statistics_are_zero() {
        let (status, body) = get_json("/api/statistics?month=Smarch").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalAmount"], 0.0);
        assert_eq!(body["soldItems"], 0);
        assert_eq!(body["notSoldItems"], 0);
    }

    #[tokio::test]
    async fn test_missing_month_bar_chart_has_ten_buckets() {
        let (status, body) = get_json("/api/barchart").await;

        assert_eq!(status, StatusCode::OK);
        let buckets = body.as_array().unwrap();
        assert_eq!(buckets.len(), 10);
        assert_eq!(buckets[0]["range"], "0-100");
        assert_eq!(buckets[9]["range"], "901-above");
    }

    #[tokio::test]
    async fn test_unknown_month_combined_matches_individual_endpoints() {
        let (_, combined) = get_json("/api/combined?month=xyz").await;
        let (_, statistics) = get_json("/api/statistics?month=xyz").await;
        let (_, bar_chart) = get_json("/api/barchart?month=xyz").await;
        let (_, pie_chart) = get_json("/api/piechart?month=xyz").await;

        assert_eq!(combined["statistics"], statistics);
        assert_eq!(combined["barChart"], bar_chart);
        assert_eq!(combined["pieChart"], pie_chart);
    }

    #[tokio::test]
    async fn test_store_failure_is_500_with_message() {
        for uri in [
            "/api/transactions?month=January",
            "/api/statistics?month=January",
            "/api/piechart?month=jan",
            "/api/combined?month=March",
        ] {
            let (status, body) = get_json(uri).await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
            assert!(
                body["error"].as_str().unwrap().starts_with("Database error:"),
                "{}",
                uri
            );
        }
    }

    #[tokio::test]
    async fn test_init_with_unreachable_source() {
        let (status, body) = get_json("/api/init").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().starts_with("Seed fetch error:"));
    }

    #[tokio::test]
    async fn test_undecodable_query_is_500_json() {
        for uri in [
            "/api/statistics?month=Smarch&month=xyz",
            "/api/transactions?month=jan&page=1&page=2",
            "/api/combined?month=May&month=June",
        ] {
            let response = app()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
            assert_eq!(
                response.headers()["content-type"],
                "application/json",
                "{}",
                uri
            );

            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert!(
                body["error"]
                    .as_str()
                    .unwrap()
                    .starts_with("Invalid query string:"),
                "{}",
                uri
            );
        }
    }

    #[tokio::test]
    async fn test_health_reports_unreachable_store() {
        let (status, body) = get_json("/health").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().starts_with("Database error:"));
    }
}
