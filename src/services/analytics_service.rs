//! Analytics service - month statistics, price histogram, category breakdown.
//!
//! Each view reads a projection of the month's records and reduces it
//! in-process. An unrecognised month never reaches the database: it yields
//! the empty-month result of each view.

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        analytics::{
            CategoryCount, CombinedResponse, MonthSale, PriceRangeCount, Statistics,
            category_breakdown, price_histogram,
        },
        month::MonthRange,
    },
    services::transaction_service::push_filters,
};
use sqlx::QueryBuilder;

/// Fetch the analytics projection of every record sold in `month`.
async fn month_sales(pool: &DbPool, month: &str) -> Result<Vec<MonthSale>, AppError> {
    let Some(range) = MonthRange::resolve(month) else {
        tracing::debug!(month, "unrecognised month, nothing to aggregate");
        return Ok(Vec::new());
    };

    let mut query = QueryBuilder::new("SELECT price, sold, category FROM transactions");
    push_filters(&mut query, &range, None);

    let sales = query.build_query_as::<MonthSale>().fetch_all(pool).await?;

    Ok(sales)
}

/// Total sale amount plus sold and unsold item counts for `month`.
pub async fn statistics(pool: &DbPool, month: &str) -> Result<Statistics, AppError> {
    let sales = month_sales(pool, month).await?;
    Ok(Statistics::from_sales(&sales))
}

/// Ten fixed price buckets with the number of records in each.
pub async fn bar_chart(pool: &DbPool, month: &str) -> Result<Vec<PriceRangeCount>, AppError> {
    let sales = month_sales(pool, month).await?;
    Ok(price_histogram(&sales))
}

/// Item count per category present in `month`.
pub async fn pie_chart(pool: &DbPool, month: &str) -> Result<Vec<CategoryCount>, AppError> {
    let sales = month_sales(pool, month).await?;
    Ok(category_breakdown(&sales))
}

/// All three views for `month`.
///
/// One read feeds all three aggregations, so the parts of the response
/// always describe the same snapshot. A failed read fails the whole
/// response; no partial result is returned.
pub async fn combined(pool: &DbPool, month: &str) -> Result<CombinedResponse, AppError> {
    let sales = month_sales(pool, month).await?;

    Ok(CombinedResponse {
        statistics: Statistics::from_sales(&sales),
        bar_chart: price_histogram(&sales),
        pie_chart: category_breakdown(&sales),
    })
}
