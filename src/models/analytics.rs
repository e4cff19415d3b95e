//! Analytics response types and the aggregations that produce them.
//!
//! All three views are computed from the same projection of a month's
//! records ([`MonthSale`]), so a view is a pure function of that slice.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

/// The columns the analytics views need from one stored record.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct MonthSale {
    pub price: f64,
    pub sold: bool,
    pub category: String,
}

/// Summary statistics for one month.
///
/// # JSON Example
///
/// ```json
/// { "totalAmount": 1199, "soldItems": 2, "notSoldItems": 1 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Sum of `price` over sold and unsold records alike
    #[serde(serialize_with = "serialize_amount")]
    pub total_amount: f64,
    pub sold_items: i64,
    pub not_sold_items: i64,
}

impl Statistics {
    pub fn from_sales(sales: &[MonthSale]) -> Self {
        sales.iter().fold(Self::default(), |mut stats, sale| {
            stats.total_amount += sale.price;
            if sale.sold {
                stats.sold_items += 1;
            } else {
                stats.not_sold_items += 1;
            }
            stats
        })
    }
}

/// Whole amounts go out as JSON integers (`1199`, not `1199.0`).
fn serialize_amount<S: Serializer>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    // Beyond 2^53 an f64 no longer holds every integer exactly
    if amount.fract() == 0.0 && amount.abs() < 9_007_199_254_740_992.0 {
        serializer.serialize_i64(*amount as i64)
    } else {
        serializer.serialize_f64(*amount)
    }
}

/// Number of fixed price buckets in the histogram.
pub const PRICE_BUCKETS: usize = 10;

const BUCKET_WIDTH: f64 = 100.0;

/// One histogram entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRangeCount {
    /// Bucket label, e.g. `"101-200"` or `"901-above"`
    pub range: String,
    pub count: i64,
}

/// Label of bucket `index`: `0-100`, `101-200`, ..., `801-900`, `901-above`.
pub fn bucket_label(index: usize) -> String {
    let index = index.min(PRICE_BUCKETS - 1);
    let low = if index == 0 { 0 } else { index * 100 + 1 };

    if index == PRICE_BUCKETS - 1 {
        format!("{}-above", low)
    } else {
        format!("{}-{}", low, (index + 1) * 100)
    }
}

/// Bucket a price falls into.
///
/// Upper bounds are inclusive, so `100` lands in the first bucket and
/// `100.5` in the second. Prices at or below 100 (negatives included) go to
/// the first bucket, everything above 900 to the last.
pub fn bucket_index(price: f64) -> usize {
    if price.is_nan() || price <= BUCKET_WIDTH {
        return 0;
    }

    let index = (price / BUCKET_WIDTH).ceil() - 1.0;
    if index >= (PRICE_BUCKETS - 1) as f64 {
        PRICE_BUCKETS - 1
    } else {
        index as usize
    }
}

/// Count sales per price bucket. Always returns all ten buckets in order.
pub fn price_histogram(sales: &[MonthSale]) -> Vec<PriceRangeCount> {
    let mut counts = [0i64; PRICE_BUCKETS];
    for sale in sales {
        counts[bucket_index(sale.price)] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(index, &count)| PriceRangeCount {
            range: bucket_label(index),
            count,
        })
        .collect()
}

/// One category breakdown entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    #[serde(rename = "_id")]
    pub category: String,
    pub item_count: i64,
}

/// Count sales per category present in `sales`, sorted by category name.
pub fn category_breakdown(sales: &[MonthSale]) -> Vec<CategoryCount> {
    let mut groups: BTreeMap<&str, i64> = BTreeMap::new();
    for sale in sales {
        *groups.entry(sale.category.as_str()).or_default() += 1;
    }

    groups
        .into_iter()
        .map(|(category, item_count)| CategoryCount {
            category: category.to_string(),
            item_count,
        })
        .collect()
}

/// Response body for `GET /api/combined`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedResponse {
    pub statistics: Statistics,
    pub bar_chart: Vec<PriceRangeCount>,
    pub pie_chart: Vec<CategoryCount>,
}
