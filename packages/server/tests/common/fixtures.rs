//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.

use anyhow::Result;
use sentiment_core::domains::comments::{Comment, NewComment};
use sentiment_core::domains::sentiment::{Emotions, Sentiment, SentimentAnalysis, SentimentResult};
use sqlx::PgPool;
use uuid::Uuid;

/// Platform name no other test uses, so aggregates can be filtered to it
pub fn unique_platform() -> String {
    format!("test-{}", Uuid::new_v4().simple())
}

/// A positive model response with the given keywords
pub fn positive_result(keywords: &[&str]) -> SentimentResult {
    SentimentResult {
        sentiment: Sentiment::Positive,
        confidence: 0.9,
        emotions: Emotions {
            joy: 0.85,
            ..Default::default()
        },
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        reasoning: "Enthusiastic praise".to_string(),
    }
}

/// Insert a comment without scoring it
pub async fn create_test_comment(pool: &PgPool, content: &str, platform: &str) -> Result<Comment> {
    Comment::insert(
        &NewComment {
            content: content.to_string(),
            platform: platform.to_string(),
            ..Default::default()
        },
        pool,
    )
    .await
}

/// Insert a comment and store an analysis for it
pub async fn create_scored_comment(
    pool: &PgPool,
    content: &str,
    platform: &str,
    sentiment: Sentiment,
    confidence: f64,
    keywords: &[&str],
) -> Result<Comment> {
    let comment = create_test_comment(pool, content, platform).await?;
    let result = SentimentResult {
        sentiment,
        confidence,
        emotions: Emotions::default(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        reasoning: "fixture".to_string(),
    };
    SentimentAnalysis::upsert(comment.id, &result, "fixture-model", pool).await?;
    Ok(comment)
}
