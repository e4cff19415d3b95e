//! Business logic services.
//!
//! Services hold the query and aggregation logic, separated from HTTP
//! handlers. Every function takes the database pool as an argument.

pub mod analytics_service;
pub mod seed_service;
pub mod transaction_service;
