//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::kernel::ServerDeps;
use crate::server::routes::{
    analytics_handler, analyze_sentiment_handler, chat_handler, create_comment_handler,
    health_handler, languages_handler, list_comments_handler, translate_handler,
    youtube_comments_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub deps: Arc<ServerDeps>,
}

/// HTTP-level settings
#[derive(Debug, Clone, Default)]
pub struct HttpOptions {
    /// Empty allows any origin
    pub allowed_origins: Vec<String>,
    /// Per-IP requests per second; None disables rate limiting
    pub rate_limit_per_second: Option<u64>,
}

impl From<&Config> for HttpOptions {
    fn from(config: &Config) -> Self {
        Self {
            allowed_origins: config.allowed_origins.clone(),
            rate_limit_per_second: config.rate_limit_per_second,
        }
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps, options: &HttpOptions) -> Router {
    let app_state = AppState {
        db_pool: deps.db_pool.clone(),
        deps: Arc::new(deps),
    };

    let api = Router::new()
        .route(
            "/comments",
            get(list_comments_handler).post(create_comment_handler),
        )
        .route("/analyze-sentiment", post(analyze_sentiment_handler))
        .route("/analytics", get(analytics_handler))
        .route("/chat", post(chat_handler))
        .route("/translate", post(translate_handler))
        .route("/languages", get(languages_handler))
        .route("/youtube-comments", get(youtube_comments_handler));

    // Rate limiting applies to the API only, never to health checks
    let api = match options.rate_limit_per_second.filter(|rate| *rate > 0) {
        Some(per_second) => {
            // One token replenished every 1000/n ms, bucket holds n.
            // The client IP comes from proxy headers or ConnectInfo (see main).
            match GovernorConfigBuilder::default()
                .key_extractor(SmartIpKeyExtractor)
                .per_millisecond((1000 / per_second).max(1))
                .burst_size(u32::try_from(per_second).unwrap_or(u32::MAX))
                .use_headers()
                .finish()
            {
                Some(config) => {
                    tracing::info!(per_second, "Per-IP rate limiting enabled");
                    api.layer(GovernorLayer {
                        config: Arc::new(config),
                    })
                }
                None => {
                    tracing::warn!(per_second, "Invalid rate limit, rate limiting disabled");
                    api
                }
            }
        }
        None => api,
    };

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors_layer(&options.allowed_origins))
        .layer(TraceLayer::new_for_http())
}
