use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domains::sentiment::Sentiment;

/// One scored comment, as read for aggregation
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct SentimentRecord {
    pub sentiment: Sentiment,
    pub confidence: f64,
    /// When scoring was performed (not when the comment was posted)
    pub analyzed_at: DateTime<Utc>,
    pub platform: String,
    pub keywords: Vec<String>,
}

/// A scored record together with its comment text
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SampledRecord {
    #[sqlx(flatten)]
    pub record: SentimentRecord,
    pub content: String,
}

impl SentimentRecord {
    /// Every record analyzed at or after `since`, optionally for one platform
    pub async fn find_records_since(
        since: DateTime<Utc>,
        platform: Option<&str>,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT sa.sentiment,
                   sa.confidence_score AS confidence,
                   sa.analyzed_at,
                   c.platform,
                   sa.keywords
            FROM sentiment_analysis sa
            JOIN comments c ON c.id = sa.comment_id
            WHERE sa.analyzed_at >= $1
              AND ($2::TEXT IS NULL OR c.platform = $2)
            ORDER BY sa.analyzed_at
            "#,
        )
        .bind(since)
        .bind(platform)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}

impl SampledRecord {
    /// Newest-first records analyzed at or after `since`, with comment text
    pub async fn find_recent_with_content(
        since: DateTime<Utc>,
        limit: i64,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT sa.sentiment,
                   sa.confidence_score AS confidence,
                   sa.analyzed_at,
                   c.platform,
                   sa.keywords,
                   c.content
            FROM sentiment_analysis sa
            JOIN comments c ON c.id = sa.comment_id
            WHERE sa.analyzed_at >= $1
            ORDER BY sa.analyzed_at DESC
            LIMIT $2
            "#,
        )
        .bind(since)
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
