//! Seed loader - replaces the whole `transactions` table with upstream data.
//!
//! # Known gap
//!
//! Delete and insert are separate statements, not one database transaction.
//! If the insert fails after the delete succeeded, the table is left empty
//! until the next successful seed.

use crate::{db::DbPool, error::AppError, models::transaction::SeedTransaction};
use sqlx::{Postgres, QueryBuilder};

/// Rows per multi-row INSERT. Eight binds per row keeps each statement far
/// below PostgreSQL's 65535 bind parameter limit.
const INSERT_CHUNK: usize = 1000;

/// Fetch the seed records from `url`.
///
/// # Errors
///
/// - `SeedFetch`: request failed, timed out, returned a non-2xx status, or
///   the body is not a JSON array of transaction records
pub async fn fetch_seed(url: &str) -> Result<Vec<SeedTransaction>, AppError> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    let records = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<Vec<SeedTransaction>>()
        .await?;

    tracing::info!(count = records.len(), "Fetched seed data");

    Ok(records)
}

/// Delete every stored transaction, then insert `records` verbatim.
///
/// Returns the number of inserted rows.
pub async fn replace_all(pool: &DbPool, records: &[SeedTransaction]) -> Result<u64, AppError> {
    let deleted = sqlx::query("DELETE FROM transactions")
        .execute(pool)
        .await?
        .rows_affected();
    tracing::info!(deleted, "Cleared transactions");

    let mut inserted = 0;
    for chunk in records.chunks(INSERT_CHUNK) {
        let mut query = insert_query(chunk);
        let result = query.build().execute(pool).await;

        match result {
            Ok(done) => inserted += done.rows_affected(),
            Err(e) => {
                tracing::warn!(inserted, "Seed insert failed after clearing transactions");
                return Err(e.into());
            }
        }
    }

    tracing::info!(inserted, "Seeded transactions");

    Ok(inserted)
}

/// Multi-row INSERT for one chunk. `chunk` must not be empty.
fn insert_query(chunk: &[SeedTransaction]) -> QueryBuilder<'_, Postgres> {
    let mut builder = QueryBuilder::new(
        "INSERT INTO transactions (id, title, description, price, category, image, sold, date_of_sale) ",
    );

    builder.push_values(chunk, |mut row, record| {
        row.push_bind(record.id)
            .push_bind(&record.title)
            .push_bind(&record.description)
            .push_bind(record.price)
            .push_bind(&record.category)
            .push_bind(&record.image)
            .push_bind(record.sold)
            .push_bind(record.date_of_sale);
    });

    builder
}

/// Fetch from `url` and replace the stored dataset.
pub async fn seed(pool: &DbPool, url: &str) -> Result<u64, AppError> {
    let records = fetch_seed(url).await?;
    replace_all(pool, &records).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{analytics_service, transaction_service};
    use chrono::{TimeZone, Utc};

    fn record(title: &str) -> SeedTransaction {
        SeedTransaction {
            id: Some(1),
            title: title.to_string(),
            description: String::new(),
            price: 10.0,
            category: "misc".to_string(),
            image: None,
            sold: false,
            date_of_sale: Some(Utc.with_ymd_and_hms(2023, 1, 5, 0, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_insert_query_binds_every_column() {
        let records = vec![record("a"), record("b")];
        let query = insert_query(&records);

        assert_eq!(
            query.sql(),
            "INSERT INTO transactions (id, title, description, price, category, image, sold, date_of_sale) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8), ($9, $10, $11, $12, $13, $14, $15, $16)"
        );
    }

    #[tokio::test]
    async fn test_fetch_seed_unreachable_source() {
        let result = fetch_seed("http://127.0.0.1:1/seed.json").await;
        assert!(matches!(result, Err(AppError::SeedFetch(_))));
    }

    fn january(day: u32, price: f64, sold: bool, category: &str) -> SeedTransaction {
        SeedTransaction::sample(
            "item",
            price,
            sold,
            category,
            Utc.with_ymd_and_hms(2023, 1, day, 12, 0, 0).unwrap(),
        )
    }

    async fn stored_rows(pool: &DbPool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_replace_all_replaces_previous_rows(pool: DbPool) {
        let first = vec![
            january(3, 10.0, true, "a"),
            january(4, 20.0, false, "b"),
            january(5, 30.0, true, "c"),
        ];
        assert_eq!(replace_all(&pool, &first).await.unwrap(), 3);
        assert_eq!(stored_rows(&pool).await, 3);

        let second = vec![january(6, 40.0, false, "d")];
        assert_eq!(replace_all(&pool, &second).await.unwrap(), 1);
        assert_eq!(stored_rows(&pool).await, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_empty_seed_leaves_every_view_empty(pool: DbPool) {
        replace_all(&pool, &[january(3, 50.0, true, "a"), january(9, 150.0, false, "b")])
            .await
            .unwrap();
        assert_eq!(
            analytics_service::statistics(&pool, "January").await.unwrap().sold_items,
            1
        );

        assert_eq!(replace_all(&pool, &[]).await.unwrap(), 0);
        assert_eq!(stored_rows(&pool).await, 0);

        let listed = transaction_service::list_transactions(&pool, "January", "", 0, 10)
            .await
            .unwrap();
        assert!(listed.is_empty());

        let combined = analytics_service::combined(&pool, "January").await.unwrap();
        assert_eq!(combined.statistics.total_amount, 0.0);
        assert_eq!(combined.statistics.sold_items, 0);
        assert_eq!(combined.statistics.not_sold_items, 0);
        assert_eq!(combined.bar_chart.len(), 10);
        assert!(combined.bar_chart.iter().all(|bucket| bucket.count == 0));
        assert!(combined.pie_chart.is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_undated_record_stored_but_matches_no_month(pool: DbPool) {
        let mut undated = january(3, 75.0, true, "a");
        undated.date_of_sale = None;

        assert_eq!(replace_all(&pool, &[undated]).await.unwrap(), 1);
        assert_eq!(stored_rows(&pool).await, 1);

        for month in ["January", "February", "December"] {
            let stats = analytics_service::statistics(&pool, month).await.unwrap();
            assert_eq!(stats.sold_items + stats.not_sold_items, 0, "{}", month);
        }
    }
}
