use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::PgPool;

use super::sentiment::{Emotions, Sentiment, SentimentResult};
use crate::common::{CommentId, SentimentAnalysisId};

/// Stored sentiment analysis - at most one per comment
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SentimentAnalysis {
    pub id: SentimentAnalysisId,
    pub comment_id: CommentId,
    pub sentiment: Sentiment,
    pub confidence_score: f64,
    pub emotions: Option<Json<Emotions>>,
    pub keywords: Vec<String>,
    /// When scoring was performed (not when the comment was posted)
    pub analyzed_at: DateTime<Utc>,
    pub model_version: String,
    pub created_at: DateTime<Utc>,
}

impl SentimentAnalysis {
    /// Store the analysis for a comment
    ///
    /// Re-scoring a comment replaces its previous analysis.
    pub async fn upsert(
        comment_id: CommentId,
        result: &SentimentResult,
        model_version: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO sentiment_analysis (
                id, comment_id, sentiment, confidence_score, emotions, keywords, model_version
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (comment_id) DO UPDATE SET
                sentiment = EXCLUDED.sentiment,
                confidence_score = EXCLUDED.confidence_score,
                emotions = EXCLUDED.emotions,
                keywords = EXCLUDED.keywords,
                model_version = EXCLUDED.model_version,
                analyzed_at = NOW()
            RETURNING *
            "#,
        )
        .bind(SentimentAnalysisId::new())
        .bind(comment_id)
        .bind(result.sentiment)
        .bind(result.confidence)
        .bind(Json(result.emotions))
        .bind(&result.keywords)
        .bind(model_version)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_comment(comment_id: CommentId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM sentiment_analysis WHERE comment_id = $1")
            .bind(comment_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }
}
