//! Data models and API response types.

/// Statistics, histogram and category breakdown views
pub mod analytics;
/// Month name resolution and sale-date windows
pub mod month;
/// Stored and seeded transaction records
pub mod transaction;
