// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use openai_client::StructuredMode;
use sentiment_core::kernel::{BaseCommentSource, HostedModel, ServerDeps, YoutubeAdapter};
use sentiment_core::server::{build_app, HttpOptions};
use sentiment_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use youtube_client::YoutubeClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sentiment_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting comment sentiment API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        sentiment_model = %config.sentiment.model,
        translation_model = %config.translation.model,
        youtube_enabled = config.youtube_api_key.is_some(),
        "Configuration loaded"
    );

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Hosted models; neither provider guarantees strict json_schema support
    let sentiment_ai = HostedModel::from_endpoint(&config.sentiment, config.llm_timeout)?
        .with_structured_mode(StructuredMode::JsonObject);
    let translation_ai = HostedModel::from_endpoint(&config.translation, config.llm_timeout)?
        .with_structured_mode(StructuredMode::JsonObject)
        .with_temperature(0.2);

    let comment_source = config.youtube_api_key.clone().map(|key| {
        Arc::new(YoutubeAdapter::new(Arc::new(YoutubeClient::new(key))))
            as Arc<dyn BaseCommentSource>
    });

    let deps = ServerDeps::new(
        pool,
        Arc::new(sentiment_ai),
        Arc::new(translation_ai),
        comment_source,
    );

    // Build application
    let app = build_app(deps, &HttpOptions::from(&config));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        // Keep serving; the process can still be killed
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
