//! Application configuration management.
//!
//! Configuration comes from environment variables, deserialized with `envy`
//! into a type-safe struct. A `.env` file is honoured when present.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `SEED_URL` (optional): JSON array served to `/api/init`
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_seed_url")]
    pub seed_url: String,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_seed_url() -> String {
    "https://s3.amazonaws.com/roxiler.com/product_transaction.json".to_string()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a value cannot be
    /// parsed into its expected type.
    pub fn from_env() -> Result<Self, envy::Error> {
        // Does nothing if no .env file exists
        dotenvy::dotenv().ok();

        envy::from_env::<Config>()
    }

    /// Build a configuration from an explicit set of variables.
    #[cfg(test)]
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }
}
