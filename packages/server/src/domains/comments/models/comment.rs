use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::common::{CommentId, Page};
use crate::domains::sentiment::{Emotions, Sentiment, SentimentAnalysis};

pub const DEFAULT_LANGUAGE_CODE: &str = "en";

/// Comment - one collected social media comment
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub platform: String,
    pub platform_post_id: Option<String>,
    pub author_username: Option<String>,
    pub author_display_name: Option<String>,
    pub posted_at: Option<DateTime<Utc>>,
    pub collected_at: DateTime<Utc>,
    pub language_code: String,
    pub translated_content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for collecting a comment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewComment {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub platform: String,
    pub platform_post_id: Option<String>,
    pub author_username: Option<String>,
    pub author_display_name: Option<String>,
    pub posted_at: Option<DateTime<Utc>>,
    pub language_code: Option<String>,
}

impl NewComment {
    pub fn validate(&self) -> Result<()> {
        if self.content.trim().is_empty() || self.platform.trim().is_empty() {
            bail!("Content and platform are required");
        }
        Ok(())
    }
}

/// The sentiment fields embedded in a listed comment
#[derive(Debug, Clone, Serialize)]
pub struct EmbeddedAnalysis {
    pub sentiment: Sentiment,
    pub confidence_score: f64,
    pub emotions: Option<Emotions>,
    pub keywords: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
}

impl From<SentimentAnalysis> for EmbeddedAnalysis {
    fn from(analysis: SentimentAnalysis) -> Self {
        Self {
            sentiment: analysis.sentiment,
            confidence_score: analysis.confidence_score,
            emotions: analysis.emotions.map(|Json(e)| e),
            keywords: analysis.keywords,
            analyzed_at: analysis.analyzed_at,
        }
    }
}

/// A comment with its analysis, if it has been scored
#[derive(Debug, Clone, Serialize)]
pub struct CommentWithSentiment {
    #[serde(flatten)]
    pub comment: Comment,
    pub sentiment_analysis: Option<EmbeddedAnalysis>,
}

/// Optional filters for listing
#[derive(Debug, Clone, Default)]
pub struct CommentFilter {
    pub platform: Option<String>,
    pub sentiment: Option<Sentiment>,
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    #[sqlx(flatten)]
    comment: Comment,
    sa_sentiment: Option<Sentiment>,
    sa_confidence_score: Option<f64>,
    sa_emotions: Option<Json<Emotions>>,
    sa_keywords: Option<Vec<String>>,
    sa_analyzed_at: Option<DateTime<Utc>>,
}

impl From<CommentRow> for CommentWithSentiment {
    fn from(row: CommentRow) -> Self {
        // LEFT JOIN: all analysis columns are null together
        let sentiment_analysis = match (row.sa_sentiment, row.sa_confidence_score, row.sa_analyzed_at)
        {
            (Some(sentiment), Some(confidence_score), Some(analyzed_at)) => Some(EmbeddedAnalysis {
                sentiment,
                confidence_score,
                emotions: row.sa_emotions.map(|Json(e)| e),
                keywords: row.sa_keywords.unwrap_or_default(),
                analyzed_at,
            }),
            _ => None,
        };
        Self {
            comment: row.comment,
            sentiment_analysis,
        }
    }
}

impl Comment {
    /// Insert a new comment
    pub async fn insert(input: &NewComment, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO comments (
                id, content, platform, platform_post_id, author_username,
                author_display_name, posted_at, language_code
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(CommentId::new())
        .bind(&input.content)
        .bind(&input.platform)
        .bind(&input.platform_post_id)
        .bind(&input.author_username)
        .bind(&input.author_display_name)
        .bind(input.posted_at)
        .bind(
            input
                .language_code
                .as_deref()
                .filter(|code| !code.trim().is_empty())
                .unwrap_or(DEFAULT_LANGUAGE_CODE),
        )
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: CommentId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Newest first, with each comment's analysis embedded
    ///
    /// A sentiment filter keeps only comments whose analysis has that label.
    pub async fn list_with_sentiment(
        filter: &CommentFilter,
        page: Page,
        pool: &PgPool,
    ) -> Result<Vec<CommentWithSentiment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT c.*,
                   sa.sentiment AS sa_sentiment,
                   sa.confidence_score AS sa_confidence_score,
                   sa.emotions AS sa_emotions,
                   sa.keywords AS sa_keywords,
                   sa.analyzed_at AS sa_analyzed_at
            FROM comments c
            LEFT JOIN sentiment_analysis sa ON sa.comment_id = c.id
            WHERE ($1::TEXT IS NULL OR c.platform = $1)
              AND ($2::sentiment IS NULL OR sa.sentiment = $2)
            ORDER BY c.created_at DESC, c.id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filter.platform.as_deref())
        .bind(filter.sentiment)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Store a translation and the detected source language
    ///
    /// Returns None when the comment does not exist.
    pub async fn update_translation(
        id: CommentId,
        translated_content: &str,
        language_code: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE comments
            SET translated_content = $2,
                language_code = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(translated_content)
        .bind(language_code)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_comment_requires_content_and_platform() {
        let ok = NewComment {
            content: "Loving the new release".to_string(),
            platform: "twitter".to_string(),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        let blank_content = NewComment {
            content: "   ".to_string(),
            ..ok.clone()
        };
        assert!(blank_content.validate().is_err());

        let no_platform = NewComment {
            platform: String::new(),
            ..ok
        };
        assert!(no_platform.validate().is_err());
    }

    #[test]
    fn test_new_comment_deserializes_with_missing_fields() {
        let input: NewComment = serde_json::from_str(r#"{"platform": "reddit"}"#).unwrap();
        assert!(input.content.is_empty());
        assert!(input.validate().is_err());
    }
}
