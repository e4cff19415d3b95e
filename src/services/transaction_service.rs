//! Transaction listing - month window, search filter and pagination.
//!
//! Queries are assembled with `sqlx::QueryBuilder` so every user supplied
//! value is bound, never spliced into the SQL text.

use crate::{
    db::DbPool,
    error::AppError,
    models::{month::MonthRange, transaction::Transaction},
};
use sqlx::{Postgres, QueryBuilder};

const TRANSACTION_COLUMNS: &str =
    "SELECT id, title, description, price, category, image, sold, date_of_sale FROM transactions";

/// Parsed `search` query parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilter {
    /// ILIKE pattern matching the term as a literal substring
    pub pattern: String,

    /// Exact price to match, present only when the term is numeric
    pub price: Option<f64>,
}

impl SearchFilter {
    /// Returns `None` for an empty term, which disables filtering.
    pub fn parse(term: &str) -> Option<Self> {
        if term.is_empty() {
            return None;
        }

        let price = term
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite());

        Some(Self {
            pattern: format!("%{}%", escape_like(term)),
            price,
        })
    }
}

/// Escape LIKE metacharacters so the term only matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Append `WHERE` clauses for the month window and optional search filter.
pub fn push_filters<'a>(
    builder: &mut QueryBuilder<'a, Postgres>,
    range: &MonthRange,
    search: Option<&'a SearchFilter>,
) {
    builder
        .push(" WHERE date_of_sale >= ")
        .push_bind(range.start)
        .push(" AND date_of_sale < ")
        .push_bind(range.end);

    if let Some(filter) = search {
        builder
            .push(" AND (title ILIKE ")
            .push_bind(&filter.pattern)
            .push(" OR description ILIKE ")
            .push_bind(&filter.pattern);

        if let Some(price) = filter.price {
            builder.push(" OR price = ").push_bind(price);
        }

        builder.push(")");
    }
}

/// Build the paginated listing query.
fn list_query<'a>(
    range: &MonthRange,
    search: Option<&'a SearchFilter>,
    offset: i64,
    limit: i64,
) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new(TRANSACTION_COLUMNS);
    push_filters(&mut builder, range, search);

    builder
        .push(" ORDER BY row_id OFFSET ")
        .push_bind(offset)
        .push(" LIMIT ")
        .push_bind(limit);

    builder
}

/// List one page of transactions sold in `month`, optionally filtered.
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `month` - Month name; unrecognised values return an empty page
/// * `search` - Substring for title/description, or an exact price
/// * `offset` / `limit` - Rows to skip and page size, applied after filtering
///
/// # Errors
///
/// - `Database`: the query failed
pub async fn list_transactions(
    pool: &DbPool,
    month: &str,
    search: &str,
    offset: i64,
    limit: i64,
) -> Result<Vec<Transaction>, AppError> {
    let Some(range) = MonthRange::resolve(month) else {
        tracing::debug!(month, "unrecognised month, returning empty page");
        return Ok(Vec::new());
    };

    let filter = SearchFilter::parse(search);
    let mut query = list_query(&range, filter.as_ref(), offset, limit);

    let transactions = query
        .build_query_as::<Transaction>()
        .fetch_all(pool)
        .await?;

    Ok(transactions)
}
