use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub sendgrid_api_key: String,
    pub sendgrid_template_id: String,
    pub from_email: String,
    pub from_name: String,
    pub api_secret: String,
    /// Whitelist server endpoint; absent disables whitelist notifications.
    pub whitelist_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            sendgrid_api_key: env::var("SENDGRID_API_KEY")
                .context("SENDGRID_API_KEY must be set")?,
            sendgrid_template_id: env::var("SENDGRID_TEMPLATE_ID")
                .context("SENDGRID_TEMPLATE_ID must be set")?,
            from_email: env::var("FROM_EMAIL").context("FROM_EMAIL must be set")?,
            from_name: env::var("FROM_NAME").context("FROM_NAME must be set")?,
            api_secret: env::var("API_SECRET").context("API_SECRET must be set")?,
            whitelist_url: env::var("WHITELIST_URL").ok(),
        })
    }
}
