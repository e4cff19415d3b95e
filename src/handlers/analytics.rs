//! Analytics HTTP handlers.
//!
//! - GET /api/statistics - Total amount, sold and unsold counts
//! - GET /api/barchart - Price range histogram
//! - GET /api/piechart - Item count per category
//! - GET /api/combined - All three in one response
//!
//! Every endpoint takes a `month` query parameter. An unrecognised month is
//! not an error: the response describes an empty month. A query string that
//! cannot be decoded at all is, and goes out as the usual 500 error body.

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        analytics::{CategoryCount, CombinedResponse, PriceRangeCount, Statistics},
        transaction::MonthParams,
    },
    services::analytics_service,
};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

/// # Response (200)
///
/// ```json
/// { "totalAmount": 1199, "soldItems": 2, "notSoldItems": 1 }
/// ```
pub async fn statistics(
    State(pool): State<DbPool>,
    query: Result<Query<MonthParams>, QueryRejection>,
) -> Result<Json<Statistics>, AppError> {
    let Query(params) = query?;
    let statistics = analytics_service::statistics(&pool, &params.month).await?;
    Ok(Json(statistics))
}

/// # Response (200)
///
/// Always ten buckets, in price order:
///
/// ```json
/// [ { "range": "0-100", "count": 1 }, { "range": "101-200", "count": 0 } ]
/// ```
pub async fn bar_chart(
    State(pool): State<DbPool>,
    query: Result<Query<MonthParams>, QueryRejection>,
) -> Result<Json<Vec<PriceRangeCount>>, AppError> {
    let Query(params) = query?;
    let buckets = analytics_service::bar_chart(&pool, &params.month).await?;
    Ok(Json(buckets))
}

/// # Response (200)
///
/// ```json
/// [ { "_id": "electronics", "itemCount": 2 } ]
/// ```
pub async fn pie_chart(
    State(pool): State<DbPool>,
    query: Result<Query<MonthParams>, QueryRejection>,
) -> Result<Json<Vec<CategoryCount>>, AppError> {
    let Query(params) = query?;
    let categories = analytics_service::pie_chart(&pool, &params.month).await?;
    Ok(Json(categories))
}

/// Statistics, histogram and category breakdown computed in-process.
pub async fn combined(
    State(pool): State<DbPool>,
    query: Result<Query<MonthParams>, QueryRejection>,
) -> Result<Json<CombinedResponse>, AppError> {
    let Query(params) = query?;
    let combined = analytics_service::combined(&pool, &params.month).await?;
    Ok(Json(combined))
}
