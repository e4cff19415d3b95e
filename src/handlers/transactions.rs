//! Transaction HTTP handlers.
//!
//! This module implements the dataset endpoints:
//! - GET /api/init - Replace the stored dataset with the upstream seed data
//! - GET /api/transactions - Page through one month's transactions

use crate::{
    db::DbPool,
    error::AppError,
    models::transaction::{ListParams, Transaction},
    routes::AppState,
    services::{seed_service, transaction_service},
};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Seed the database.
///
/// Destructive: every stored transaction is deleted before the fetched
/// records are inserted.
///
/// # Response (200)
///
/// ```json
/// { "message": "Database initialized with 60 transactions" }
/// ```
pub async fn init_database(State(state): State<AppState>) -> Result<Json<MessageResponse>, AppError> {
    let inserted = seed_service::seed(&state.pool, &state.seed_url).await?;

    Ok(Json(MessageResponse {
        message: format!("Database initialized with {} transactions", inserted),
    }))
}

/// List transactions for a month.
///
/// # Query Parameters
///
/// - `month` - Month name or abbreviation (e.g. `March`, `mar`)
/// - `search` - Substring of title/description, or an exact price
/// - `page` - 1-based page number, default 1
/// - `perPage` - Page size, default 10
///
/// # Response (200)
///
/// ```json
/// [
///   {
///     "id": 1,
///     "title": "Fjallraven  Foldsack No. 1 Backpack",
///     "description": "Your perfect pack for everyday use",
///     "price": 329.85,
///     "category": "men's clothing",
///     "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
///     "sold": false,
///     "dateOfSale": "2023-03-27T14:59:54Z"
///   }
/// ]
/// ```
pub async fn list_transactions(
    State(pool): State<DbPool>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let Query(params) = query?;
    let transactions = transaction_service::list_transactions(
        &pool,
        &params.month,
        &params.search,
        params.offset(),
        params.per_page(),
    )
    .await?;

    Ok(Json(transactions))
}
