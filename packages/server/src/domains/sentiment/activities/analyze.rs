//! Sentiment scoring via the hosted model

use anyhow::{Context, Result};
use futures::future::join_all;
use openai_client::{strip_code_blocks, StructuredOutput};
use tracing::{debug, warn};

use crate::common::{truncate_chars, CommentId};
use crate::domains::sentiment::models::{SentimentAnalysis, SentimentResult};
use crate::kernel::{BaseAI, ServerDeps};

const SYSTEM_PROMPT: &str = "You analyze the sentiment of social media comments. \
Be objective and consider context, sarcasm, and nuanced language.";

fn user_prompt(text: &str) -> String {
    format!(
        r#"Analyze the sentiment of this social media comment: "{}"

Please provide:
1. Overall sentiment (positive, negative, or neutral)
2. Confidence score (0-1)
3. Emotion scores for joy, anger, fear, sadness, surprise, disgust (0-1 each)
4. Key words/phrases that influenced the sentiment
5. Brief reasoning for your analysis"#,
        text
    )
}

/// Ask the model for a structured score and validate it.
async fn request_score(text: &str, ai: &dyn BaseAI) -> Result<SentimentResult> {
    let raw = ai
        .generate_structured(
            SYSTEM_PROMPT,
            &user_prompt(text),
            SentimentResult::strict_schema(),
        )
        .await?;

    let parsed: SentimentResult = serde_json::from_str(strip_code_blocks(&raw))
        .context("Sentiment response did not match the expected shape")?;
    parsed.validate()
}

/// Score one text. Never fails: any model or validation error yields the
/// neutral fallback.
pub async fn analyze_sentiment(text: &str, ai: &dyn BaseAI) -> SentimentResult {
    match request_score(text, ai).await {
        Ok(result) => {
            debug!(
                sentiment = %result.sentiment,
                confidence = result.confidence,
                "Scored text"
            );
            result
        }
        Err(e) => {
            warn!(
                error = %e,
                text_preview = %truncate_chars(text, 80),
                "Sentiment analysis failed, defaulting to neutral"
            );
            SentimentResult::fallback("Analysis failed, defaulted to neutral")
        }
    }
}

/// Score many texts concurrently. Output order matches input order.
pub async fn analyze_sentiment_batch(texts: &[String], ai: &dyn BaseAI) -> Vec<SentimentResult> {
    join_all(texts.iter().map(|text| analyze_sentiment(text, ai))).await
}

/// Score a comment's text and store the analysis against it.
pub async fn score_comment(
    comment_id: CommentId,
    text: &str,
    deps: &ServerDeps,
) -> Result<(SentimentResult, SentimentAnalysis)> {
    let result = analyze_sentiment(text, deps.sentiment_ai.as_ref()).await;
    let stored = SentimentAnalysis::upsert(
        comment_id,
        &result,
        deps.sentiment_model_version(),
        &deps.db_pool,
    )
    .await
    .context("Failed to save sentiment analysis")?;
    Ok((result, stored))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::sentiment::models::{Emotions, Sentiment};
    use crate::kernel::MockAI;

    fn positive() -> SentimentResult {
        SentimentResult {
            sentiment: Sentiment::Positive,
            confidence: 0.92,
            emotions: Emotions {
                joy: 0.9,
                surprise: 0.2,
                ..Default::default()
            },
            keywords: vec!["love".to_string(), "amazing".to_string()],
            reasoning: "Strong praise".to_string(),
        }
    }

    #[tokio::test]
    async fn test_analyze_parses_structured_response() {
        let ai = MockAI::new().with_json_response(&positive());

        let result = analyze_sentiment("I love this, amazing!", &ai).await;

        assert_eq!(result, positive());
        assert_eq!(ai.call_count(), 1);
        assert!(ai.calls()[0].structured);
        assert!(ai.was_called_with("I love this, amazing!"));
    }

    #[tokio::test]
    async fn test_analyze_accepts_fenced_json() {
        let json = serde_json::to_string(&positive()).unwrap();
        let ai = MockAI::new().with_response(format!("```json\n{}\n```", json));

        assert_eq!(analyze_sentiment("great", &ai).await.sentiment, Sentiment::Positive);
    }

    #[tokio::test]
    async fn test_analyze_falls_back_on_provider_error() {
        let ai = MockAI::new().with_error("503 upstream unavailable");

        let result = analyze_sentiment("whatever", &ai).await;

        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.confidence, 0.5);
        assert!(result.keywords.is_empty());
    }

    #[tokio::test]
    async fn test_analyze_falls_back_on_out_of_range_confidence() {
        let mut bad = positive();
        bad.confidence = 7.0;
        let ai = MockAI::new().with_json_response(&bad);

        assert_eq!(analyze_sentiment("hmm", &ai).await.sentiment, Sentiment::Neutral);
    }

    #[tokio::test]
    async fn test_analyze_falls_back_on_garbage() {
        let ai = MockAI::new().with_response("I think it's pretty positive!");

        assert_eq!(analyze_sentiment("hmm", &ai).await.confidence, 0.5);
    }

    #[tokio::test]
    async fn test_batch_preserves_order_with_per_item_fallback() {
        let ai = MockAI::new()
            .with_json_response(&positive())
            .with_error("timeout")
            .with_json_response(&positive());
        let texts = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        let results = analyze_sentiment_batch(&texts, &ai).await;

        assert_eq!(results.len(), 3);
        assert_eq!(ai.call_count(), 3);
        let neutral = results
            .iter()
            .filter(|r| r.sentiment == Sentiment::Neutral)
            .count();
        assert_eq!(neutral, 1);
    }

    #[tokio::test]
    async fn test_batch_of_nothing_makes_no_calls() {
        let ai = MockAI::new();
        assert!(analyze_sentiment_batch(&[], &ai).await.is_empty());
        assert_eq!(ai.call_count(), 0);
    }
}
