//! Server dependencies for activities (using traits for testability)
//!
//! This module provides the central dependency container used by all domain activities.
//! All external services use trait abstractions to enable testing.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use youtube_client::YoutubeClient;

use crate::kernel::{BaseAI, BaseCommentSource};

// =============================================================================
// YoutubeClient Adapter (implements BaseCommentSource trait)
// =============================================================================

/// Wrapper around YoutubeClient that implements BaseCommentSource
///
/// Errors keep their `YoutubeError` type inside the `anyhow::Error` so the
/// HTTP layer can recover the upstream status code.
pub struct YoutubeAdapter(pub Arc<YoutubeClient>);

impl YoutubeAdapter {
    pub fn new(client: Arc<YoutubeClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseCommentSource for YoutubeAdapter {
    async fn fetch_comment_texts(&self, video_id: &str, max_results: u32) -> Result<Vec<String>> {
        Ok(self.0.fetch_comment_texts(video_id, max_results).await?)
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to activities (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// Sentiment scoring and the chat assistant
    pub sentiment_ai: Arc<dyn BaseAI>,
    /// Translation and language detection
    pub translation_ai: Arc<dyn BaseAI>,
    /// YouTube comment feed (optional, not all envs have an API key)
    pub comment_source: Option<Arc<dyn BaseCommentSource>>,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        sentiment_ai: Arc<dyn BaseAI>,
        translation_ai: Arc<dyn BaseAI>,
        comment_source: Option<Arc<dyn BaseCommentSource>>,
    ) -> Self {
        Self {
            db_pool,
            sentiment_ai,
            translation_ai,
            comment_source,
        }
    }

    /// Version string stored with each sentiment analysis
    pub fn sentiment_model_version(&self) -> &str {
        self.sentiment_ai.model_name()
    }
}
