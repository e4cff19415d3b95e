//! Transaction data models and API request types.
//!
//! This module defines:
//! - `Transaction`: a stored sale record, as returned to clients
//! - `SeedTransaction`: a record as delivered by the upstream seed source
//! - `ListParams` / `MonthParams`: query-string parameters

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};

/// Represents a transaction record from the database.
///
/// # Database Table
///
/// Maps to the `transactions` table. The surrogate `row_id` key is never
/// selected, so it does not appear here.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Product identifier from the seed source
    pub id: Option<i64>,

    pub title: String,

    pub description: String,

    /// Sale price, currency-agnostic
    pub price: f64,

    pub category: String,

    pub image: Option<String>,

    pub sold: bool,

    pub date_of_sale: Option<DateTime<Utc>>,
}

/// A record from the seed data source.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": 1,
///   "title": "Fjallraven  Foldsack No. 1 Backpack",
///   "price": 329.85,
///   "description": "Your perfect pack for everyday use",
///   "category": "men's clothing",
///   "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
///   "sold": false,
///   "dateOfSale": "2021-11-27T20:29:54+05:30"
/// }
/// ```
///
/// Only type coercion happens here: numbers and booleans may arrive as JSON
/// strings (`"329.85"`, `"7"`, `"true"`), missing fields take their
/// defaults, and a missing `dateOfSale` is stored as NULL.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedTransaction {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub id: Option<i64>,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub price: f64,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub image: Option<String>,

    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub sold: bool,

    #[serde(default)]
    pub date_of_sale: Option<DateTime<Utc>>,
}

#[cfg(test)]
impl SeedTransaction {
    /// Record with the fields the queries look at; the rest left empty.
    pub fn sample(title: &str, price: f64, sold: bool, category: &str, at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            description: String::new(),
            price,
            category: category.to_string(),
            image: None,
            sold,
            date_of_sale: Some(at),
        }
    }
}

/// Query parameters for `GET /api/transactions`.
///
/// Numbers arrive as strings and are coerced leniently: anything that does
/// not parse falls back to the default, anything below 1 is clamped to 1.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub month: String,
}

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 10;

impl ListParams {
    /// 1-based page number.
    pub fn page(&self) -> i64 {
        coerce_positive(self.page.as_deref(), DEFAULT_PAGE)
    }

    pub fn per_page(&self) -> i64 {
        coerce_positive(self.per_page.as_deref(), DEFAULT_PER_PAGE)
    }

    /// Number of matching rows to skip.
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.per_page())
    }
}

fn coerce_positive(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(default)
        .max(1)
}

/// Query parameters for the analytics endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct MonthParams {
    #[serde(default)]
    pub month: String,
}
