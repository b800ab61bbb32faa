// Main entry point for API server

use anyhow::{Context, Result};
use sendgrid::{SendGridOptions, SendGridService};
use server_core::kernel::{
    BaseWhitelistService, PgMemberStore, SendGridAdapter, ServerDeps, WhitelistClient,
};
use server_core::{server::build_app, Config};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Club Onboarding API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Wire dependencies
    let sendgrid = Arc::new(SendGridService::new(SendGridOptions {
        api_key: config.sendgrid_api_key.clone(),
        from_email: config.from_email.clone(),
        from_name: config.from_name.clone(),
    }));
    let whitelist = config
        .whitelist_url
        .clone()
        .map(|url| Arc::new(WhitelistClient::new(url)) as Arc<dyn BaseWhitelistService>);
    if whitelist.is_none() {
        tracing::info!("No WHITELIST_URL configured, whitelist notifications disabled");
    }

    let deps = Arc::new(ServerDeps::new(
        Arc::new(PgMemberStore::new(pool)),
        Arc::new(SendGridAdapter::new(
            sendgrid,
            config.sendgrid_template_id.clone(),
        )),
        whitelist,
    ));

    // Build application
    let app = build_app(deps, config.api_secret.clone());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
