//! HTTP request handlers (route handlers).
//!
//! Each handler extracts the pool and query parameters, calls into a
//! service, and returns JSON or an `AppError`.

/// Statistics, bar chart, pie chart and combined endpoints
pub mod analytics;
/// Service health endpoint
pub mod health;
/// Seeding and listing endpoints
pub mod transactions;
