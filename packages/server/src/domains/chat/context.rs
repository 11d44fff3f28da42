//! Grounding text for the chat assistant.

use std::fmt::Write;

use crate::common::{percent, truncate_chars};
use crate::domains::analytics::{AggregateSummary, SampledRecord};
use crate::domains::sentiment::Sentiment;

pub const TOP_PLATFORMS: usize = 3;
pub const TOP_KEYWORDS: usize = 5;
pub const SAMPLE_COMMENTS: usize = 5;
const SAMPLE_PREVIEW_CHARS: usize = 100;

/// Render the analytics block placed in the assistant's prompt.
pub fn build_analytics_context(
    summary: &AggregateSummary,
    top_keywords: &[String],
    samples: &[SampledRecord],
) -> String {
    let total = summary.total_count;
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(
        out,
        "Current Sentiment Analysis Data (Last {} days):",
        summary.window_days
    );
    let _ = writeln!(out, "- Total Comments: {}", total);
    for sentiment in Sentiment::ALL {
        let count = summary.sentiment_counts.get(sentiment);
        let _ = writeln!(
            out,
            "- {}: {} ({}%)",
            capitalize(sentiment.as_str()),
            count,
            percent(count, total)
        );
    }
    let _ = writeln!(
        out,
        "- Average Confidence: {}%",
        (summary.average_confidence * 100.0).round() as u64
    );

    let platforms = summary
        .platforms_by_volume()
        .into_iter()
        .take(TOP_PLATFORMS)
        .map(|(name, count)| format!("{} ({})", name, count))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(out, "- Top Platforms: {}", platforms);

    let keywords = top_keywords
        .iter()
        .take(TOP_KEYWORDS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(out, "- Top Keywords: {}", keywords);

    out.push_str("\nRecent Sample Comments:\n");
    if samples.is_empty() {
        out.push_str("No recent comments\n");
    }
    for sample in samples.iter().take(SAMPLE_COMMENTS) {
        let _ = writeln!(
            out,
            "- [{}] {}...",
            sample.record.sentiment.as_str().to_uppercase(),
            truncate_chars(&sample.content, SAMPLE_PREVIEW_CHARS)
        );
    }

    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::analytics::{aggregate, SentimentRecord};
    use chrono::Utc;
    use std::num::NonZeroU32;

    fn sampled(sentiment: Sentiment, platform: &str, content: &str) -> SampledRecord {
        SampledRecord {
            record: SentimentRecord {
                sentiment,
                confidence: 0.8,
                analyzed_at: Utc::now(),
                platform: platform.to_string(),
                keywords: vec![],
            },
            content: content.to_string(),
        }
    }

    fn summarize(samples: &[SampledRecord]) -> AggregateSummary {
        let records: Vec<SentimentRecord> = samples.iter().map(|s| s.record.clone()).collect();
        aggregate(&records, NonZeroU32::new(7).unwrap(), None)
    }

    #[test]
    fn test_context_with_data() {
        let samples = vec![
            sampled(Sentiment::Positive, "twitter", "Love it"),
            sampled(Sentiment::Positive, "twitter", "Great update"),
            sampled(Sentiment::Negative, "reddit", "Broken again"),
            sampled(Sentiment::Neutral, "youtube", "Watched it"),
        ];
        let keywords = vec!["love".to_string(), "update".to_string()];

        let context = build_analytics_context(&summarize(&samples), &keywords, &samples);

        assert!(context.contains("(Last 7 days)"));
        assert!(context.contains("- Total Comments: 4"));
        assert!(context.contains("- Positive: 2 (50%)"));
        assert!(context.contains("- Negative: 1 (25%)"));
        assert!(context.contains("- Neutral: 1 (25%)"));
        assert!(context.contains("- Average Confidence: 80%"));
        assert!(context.contains("- Top Platforms: twitter (2), "));
        assert!(context.contains("- Top Keywords: love, update"));
        assert!(context.contains("- [POSITIVE] Love it..."));
        assert!(context.contains("- [NEGATIVE] Broken again..."));
    }

    #[test]
    fn test_context_without_data() {
        let summary = summarize(&[]);

        let context = build_analytics_context(&summary, &[], &[]);

        assert!(context.contains("- Total Comments: 0"));
        assert!(context.contains("- Positive: 0 (0%)"));
        assert!(context.contains("- Average Confidence: 0%"));
        assert!(context.contains("No recent comments"));
    }

    #[test]
    fn test_limits_platforms_and_samples() {
        let samples: Vec<SampledRecord> = ["a", "b", "c", "d", "e", "f", "g"]
            .iter()
            .map(|p| sampled(Sentiment::Neutral, p, &format!("from {}", p)))
            .collect();

        let context = build_analytics_context(&summarize(&samples), &[], &samples);

        let platforms_line = context
            .lines()
            .find(|l| l.starts_with("- Top Platforms:"))
            .unwrap();
        assert_eq!(platforms_line.matches('(').count(), 3);
        assert_eq!(context.matches("- [NEUTRAL]").count(), 5);
        assert!(!context.contains("from f"));
    }

    #[test]
    fn test_sample_preview_truncates_to_100_chars() {
        let long = "x".repeat(250);
        let samples = vec![sampled(Sentiment::Positive, "twitter", &long)];

        let context = build_analytics_context(&summarize(&samples), &[], &samples);

        assert!(context.contains(&format!("- [POSITIVE] {}...\n", "x".repeat(100))));
        assert!(!context.contains(&"x".repeat(101)));
    }
}
