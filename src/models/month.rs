//! Month name resolution and the sale-date window derived from it.
//!
//! Every query except seeding is scoped to one calendar month of
//! [`SALE_YEAR`]. The window is half-open: it includes the first instant of
//! the month and excludes the first instant of the following month.

use chrono::{DateTime, Month, NaiveDate, Utc};

/// Year every month query is resolved against.
///
/// Queries never look at other years, whatever the stored `dateOfSale` says.
pub const SALE_YEAR: i32 = 2023;

/// Half-open `[start, end)` interval over `date_of_sale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl MonthRange {
    /// Resolve a month name (`"March"`), abbreviation (`"mar"`) or number
    /// (`"3"`) to its window in [`SALE_YEAR`].
    ///
    /// Returns `None` for anything unrecognised; callers treat that as a
    /// window matching nothing.
    pub fn resolve(month: &str) -> Option<Self> {
        let index = parse_month(month)?;
        Self::for_month(SALE_YEAR, index)
    }

    /// Window for a 1-based month index.
    ///
    /// December rolls over to January of the next year.
    pub fn for_month(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };

        Some(Self {
            start: start.and_hms_opt(0, 0, 0)?.and_utc(),
            end: end.and_hms_opt(0, 0, 0)?.and_utc(),
        })
    }
}

/// Parse a month string into a 1-based index.
fn parse_month(month: &str) -> Option<u32> {
    let month = month.trim();
    if month.is_empty() {
        return None;
    }

    if let Ok(index) = month.parse::<u32>() {
        return (1..=12).contains(&index).then_some(index);
    }

    // chrono accepts full names and three-letter abbreviations, any case
    month.parse::<Month>().ok().map(|m| m.number_from_month())
}
